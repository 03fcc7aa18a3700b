/// Token types produced by the script lexer.
use crate::span::Span;

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Integer literal, e.g. `42`, `-7`.
    Integer(i64),
    /// String literal bytes without the surrounding quotes.
    String(Vec<u8>),
    /// Message name, e.g. `print`, `printRange`.
    Name(String),

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,` between argument scripts.
    Comma,
    /// A line break; resets the receiver to the script's context.
    Newline,

    /// End of input.
    Eof,
    /// An unrecognized character or malformed token.
    Error(String),
}

impl TokenKind {
    /// Human-readable name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::String(_) => "string",
            Self::Name(_) => "message name",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Comma => "`,`",
            Self::Newline => "newline",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}

/// A token with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// The original source text of this token.
    pub lexeme: String,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        span: Span,
        lexeme: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            span,
            lexeme: lexeme.into(),
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}
