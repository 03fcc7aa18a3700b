/// Streaming lexer for BareIO scripts.
///
/// The [`Lexer`] consumes bytes from any [`std::io::Read`] source and
/// implements [`Iterator`] over [`Token`]s, tracking byte offset, line and
/// column for every token.
///
/// # Syntax
///
/// | Input              | Token                              |
/// |--------------------|------------------------------------|
/// | `"…"`              | string, raw bytes, no escapes      |
/// | `-?(0\|[1-9][0-9]*)` | integer                          |
/// | `( ) ,`            | argument list punctuation          |
/// | `\n`, `\r\n`       | newline, a context reset           |
/// | anything else      | message name up to a delimiter     |
///
/// Spaces and tabs separate tokens and are otherwise ignored.
use std::io::{self, Read};

use crate::span::{Pos, Span};
use crate::token::{Token, TokenKind};

/// Bytes that end a message name.
fn is_delimiter(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r' | b'(' | b')' | b',' | b'"')
}

// ═══════════════════════════════════════════════════════════════════
// Read buffer: one byte at a time over Read
// ═══════════════════════════════════════════════════════════════════

/// `-` followed by a digit and `\r\n` are the longest lookaheads needed.
const LOOKAHEAD: usize = 2;

struct ReadBuf<R: Read> {
    reader: R,
    buf: [u8; LOOKAHEAD],
    /// How many valid bytes are in `buf` starting from index 0.
    filled: usize,
    reader_eof: bool,
    /// Read failure, reported once the buffered bytes are consumed.
    error: Option<io::Error>,
    offset: usize,
    line: usize,
    column: usize,
}

impl<R: Read> ReadBuf<R> {
    fn new(reader: R) -> Self {
        let mut rb = Self {
            reader,
            buf: [0u8; LOOKAHEAD],
            filled: 0,
            reader_eof: false,
            error: None,
            offset: 0,
            line: 1,
            column: 1,
        };
        rb.fill();
        rb
    }

    fn fill(&mut self) {
        while !self.reader_eof && self.filled < LOOKAHEAD {
            let mut one = [0u8; 1];
            match self.reader.read(&mut one) {
                Ok(0) => self.reader_eof = true,
                Ok(_) => {
                    self.buf[self.filled] = one[0];
                    self.filled += 1;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.error = Some(err);
                    self.reader_eof = true;
                }
            }
        }
    }

    fn pos(&self) -> Pos {
        Pos::new(self.offset, self.line, self.column)
    }

    fn peek_ahead(&self, n: usize) -> Option<u8> {
        (n < self.filled).then(|| self.buf[n])
    }

    fn advance(&mut self) -> Option<u8> {
        if self.filled == 0 {
            return None;
        }
        let b = self.buf[0];
        self.buf.copy_within(1..self.filled, 0);
        self.filled -= 1;
        self.fill();

        self.offset += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Lexer
// ═══════════════════════════════════════════════════════════════════

pub struct Lexer<R: Read> {
    rb: ReadBuf<R>,
    emitted_eof: bool,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            rb: ReadBuf::new(reader),
            emitted_eof: false,
        }
    }
}

impl<'a> Lexer<&'a [u8]> {
    /// Create a new lexer from a source string.
    pub fn from_str(source: &'a str) -> Self {
        Self::new(source.as_bytes())
    }
}

impl<R: Read> Lexer<R> {
    fn pos(&self) -> Pos {
        self.rb.pos()
    }

    fn peek(&self) -> Option<u8> {
        self.rb.peek_ahead(0)
    }

    fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.rb.peek_ahead(n)
    }

    fn advance(&mut self) -> Option<u8> {
        self.rb.advance()
    }

    fn skip_blanks(&mut self) {
        while let Some(b' ' | b'\t') = self.peek() {
            self.advance();
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos();
        let b = self.advance().unwrap_or_default();
        Token::new(kind, Span::new(start, self.pos()), (b as char).to_string())
    }

    fn lex_newline(&mut self) -> Token {
        let start = self.pos();
        let mut raw = String::new();
        if self.peek() == Some(b'\r') {
            self.advance();
            raw.push('\r');
            if self.peek() != Some(b'\n') {
                return Token::new(
                    TokenKind::Error("carriage return without line feed".into()),
                    Span::new(start, self.pos()),
                    raw,
                );
            }
        }
        self.advance();
        raw.push('\n');
        Token::new(TokenKind::Newline, Span::new(start, self.pos()), raw)
    }

    /// String literal: everything up to the next `"`, newlines included.
    fn lex_string(&mut self) -> Token {
        let start = self.pos();
        self.advance(); // opening `"`
        let mut value = Vec::new();
        loop {
            match self.advance() {
                Some(b'"') => break,
                Some(b) => value.push(b),
                None => {
                    let raw = format!("\"{}", String::from_utf8_lossy(&value));
                    return Token::new(
                        TokenKind::Error("unterminated string".into()),
                        Span::new(start, self.pos()),
                        raw,
                    );
                }
            }
        }
        let raw = format!("\"{}\"", String::from_utf8_lossy(&value));
        Token::new(TokenKind::String(value), Span::new(start, self.pos()), raw)
    }

    /// Bytes up to the next delimiter.
    fn take_word(&mut self) -> Vec<u8> {
        let mut word = Vec::new();
        while let Some(b) = self.peek() {
            if is_delimiter(b) {
                break;
            }
            word.push(b);
            self.advance();
        }
        word
    }

    fn lex_integer(&mut self) -> Token {
        let start = self.pos();
        let word = self.take_word();
        let raw = String::from_utf8_lossy(&word).into_owned();
        let span = Span::new(start, self.pos());

        let digits = raw.strip_prefix('-').unwrap_or(&raw);
        let kind = if !digits.bytes().all(|b| b.is_ascii_digit()) {
            TokenKind::Error(format!("malformed integer literal `{raw}`"))
        } else if digits.len() > 1 && digits.starts_with('0') {
            TokenKind::Error(format!("leading zero in integer literal `{raw}`"))
        } else {
            match raw.parse::<i64>() {
                Ok(value) => TokenKind::Integer(value),
                Err(_) => TokenKind::Error(format!(
                    "integer literal `{raw}` does not fit in 64 bits"
                )),
            }
        };
        Token::new(kind, span, raw)
    }

    fn lex_name(&mut self) -> Token {
        let start = self.pos();
        let word = self.take_word();
        let name = String::from_utf8_lossy(&word).into_owned();
        Token::new(
            TokenKind::Name(name.clone()),
            Span::new(start, self.pos()),
            name,
        )
    }

    fn next_token(&mut self) -> Token {
        self.skip_blanks();
        let Some(b) = self.peek() else {
            let pos = self.pos();
            if let Some(err) = self.rb.error.take() {
                return Token::new(
                    TokenKind::Error(format!("cannot read source: {err}")),
                    Span::point(pos),
                    "",
                );
            }
            return Token::new(TokenKind::Eof, Span::point(pos), "");
        };

        match b {
            b'\n' | b'\r' => self.lex_newline(),
            b'"' => self.lex_string(),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b',' => self.single(TokenKind::Comma),
            b'0'..=b'9' => self.lex_integer(),
            b'-' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.lex_integer()
            }
            _ => self.lex_name(),
        }
    }
}

impl<R: Read> Iterator for Lexer<R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let tok = self.next_token();
        if tok.is_eof() {
            self.emitted_eof = true;
        }
        Some(tok)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════
