use crate::ast::{Message, MessageKind, Script};
use crate::span::{Pos, Span};
use crate::token::{Token, TokenKind};

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

impl std::error::Error for ParseError {}

/// Deepest `( … )` nesting accepted before parsing stops with an error.
pub const MAX_NESTING: usize = 256;

/// Recursive-descent parser over a token stream.
///
/// ```text
/// script   := message*
/// message  := STRING | INTEGER | NEWLINE | NAME arguments?
/// arguments:= "(" script ("," script)* ")"
/// ```
///
/// An argument script ends at `,` or `)`; the top-level script ends at end
/// of input, where stray `,` and `)` are errors.
pub struct Parser<I: Iterator<Item = Token>> {
    tokens: std::iter::Peekable<I>,
    last_span: Span,
    depth: usize,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Self {
            tokens: tokens.peekable(),
            last_span: Span::point(Pos::origin()),
            depth: 0,
        }
    }

    fn peek_kind(&mut self) -> &TokenKind {
        match self.tokens.peek() {
            Some(tok) => &tok.kind,
            None => &TokenKind::Eof,
        }
    }

    fn peek_span(&mut self) -> Span {
        match self.tokens.peek() {
            Some(tok) => tok.span,
            None => Span::point(self.last_span.end),
        }
    }

    fn advance(&mut self) -> Token {
        match self.tokens.next() {
            Some(tok) => {
                self.last_span = tok.span;
                tok
            }
            None => Token::new(TokenKind::Eof, Span::point(self.last_span.end), ""),
        }
    }

    /// Parse the whole input as one script.
    pub fn parse_script(&mut self) -> Result<Script, ParseError> {
        let script = self.parse_messages()?;
        let tok = self.advance();
        match tok.kind {
            TokenKind::Eof => Ok(script),
            other => Err(ParseError::new(
                format!("unexpected {} outside an argument list", other.name()),
                tok.span,
            )),
        }
    }

    /// Messages up to, not including, the next `,`, `)` or end of input.
    fn parse_messages(&mut self) -> Result<Script, ParseError> {
        let start = self.peek_span();
        let mut messages = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Eof | TokenKind::Comma | TokenKind::RParen => break,
                _ => messages.push(self.parse_message()?),
            }
        }
        let span = match (messages.first(), messages.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::point(start.start),
        };
        Ok(Script::new(messages, span))
    }

    fn parse_message(&mut self) -> Result<Message, ParseError> {
        let tok = self.advance();
        let kind = match tok.kind {
            TokenKind::String(bytes) => MessageKind::String(bytes),
            TokenKind::Integer(value) => MessageKind::Integer(value),
            TokenKind::Newline => MessageKind::ResetContext,
            TokenKind::Name(name) => return self.parse_send(name, tok.span),
            TokenKind::LParen => {
                return Err(ParseError::new(
                    "argument list without a message name",
                    tok.span,
                ));
            }
            TokenKind::Error(message) => {
                return Err(ParseError::new(message, tok.span));
            }
            other => {
                return Err(ParseError::new(
                    format!("unexpected {}", other.name()),
                    tok.span,
                ));
            }
        };
        Ok(Message::new(kind, tok.span))
    }

    fn parse_send(
        &mut self,
        name: String,
        name_span: Span,
    ) -> Result<Message, ParseError> {
        let mut arguments = Vec::new();
        let mut span = name_span;

        if matches!(self.peek_kind(), TokenKind::LParen) {
            let open = self.advance();
            if self.depth >= MAX_NESTING {
                return Err(ParseError::new(
                    "argument lists nested too deeply",
                    open.span,
                ));
            }
            self.depth += 1;
            let parsed = self.parse_arguments(&name, open.span);
            self.depth -= 1;
            let (parsed, close) = parsed?;
            arguments = parsed;
            span = name_span.to(close);
        }

        Ok(Message::new(
            MessageKind::Send {
                name,
                name_span,
                arguments,
            },
            span,
        ))
    }

    /// Argument scripts after `(`; returns them with the span of `)`.
    fn parse_arguments(
        &mut self,
        name: &str,
        open: Span,
    ) -> Result<(Vec<Script>, Span), ParseError> {
        let mut arguments = Vec::new();
        loop {
            arguments.push(self.parse_messages()?);
            let tok = self.advance();
            match tok.kind {
                TokenKind::Comma => continue,
                TokenKind::RParen => return Ok((arguments, tok.span)),
                _ => {
                    return Err(ParseError::new(
                        format!("unclosed argument list of `{name}`"),
                        open,
                    ));
                }
            }
        }
    }
}
