//! # Parser
//!
//! A streaming lexer and parser for BareIO script source.
//!
//! ## Architecture
//!
//! ```text
//!  impl Read (file, &[u8], …)
//!      │
//!      ▼
//!  ┌────────┐    Token stream     ┌────────┐
//!  │ Lexer  │ ──────────────────▶ │ Parser │ ──────────▶ ast::Script
//!  └────────┘  (impl Iterator)    └────────┘
//! ```
//!
//! ```rust
//! use parser::ast::MessageKind;
//!
//! let script = parser::parse("\"Bare IO!\" print\nhalt").unwrap();
//! assert_eq!(script.messages.len(), 4);
//! assert_eq!(script.messages[2].kind, MessageKind::ResetContext);
//! ```
//!
//! Names are not resolved here; `frobnicate` parses like `print` and is
//! rejected later by the image builder.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

use std::io::Read;

pub use ast::{Message, MessageKind, Script};
pub use lexer::Lexer;
pub use parser::{ParseError, Parser};
pub use span::{Pos, Span};
pub use token::{Token, TokenKind};

/// Parse `source` as one top-level script.
pub fn parse(source: &str) -> Result<Script, ParseError> {
    Parser::new(Lexer::from_str(source)).parse_script()
}

/// Parse raw source bytes; string literals need not be UTF-8.
pub fn parse_bytes(source: &[u8]) -> Result<Script, ParseError> {
    Parser::new(Lexer::new(source)).parse_script()
}

/// Parse a script streamed from `reader`.
pub fn parse_reader<R: Read>(reader: R) -> Result<Script, ParseError> {
    Parser::new(Lexer::new(reader)).parse_script()
}
