//! Core Brisk lexer: converts source text to a token stream.
//!
//! Features:
//! - Keywords, identifiers, decimal number literals
//! - `//` line comments and all whitespace skipped (statements end with `;`)
//! - Near-miss operators (`==`, `&`, `|`) reported with a suggestion and
//!   recovered as the intended token
//! - Error recovery: collects up to 20 errors instead of stopping at the first

use brisk_types::{Diagnostic, Diagnostics, ErrorCode, SourceFile, Span};

use crate::token::{Token, TokenKind};

/// The Brisk lexer.
pub struct Lexer<'src> {
    source: &'src [u8],
    source_file: &'src SourceFile,
    /// Current byte offset into `source`.
    pos: usize,
    errors: Diagnostics,
}

/// Result of lexing: tokens + any errors collected.
pub struct LexResult {
    /// The token stream (always ends with [`TokenKind::Eof`]).
    pub tokens: Vec<Token>,
    pub errors: Diagnostics,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: source_file.source.as_bytes(),
            source_file,
            pos: 0,
            errors: Diagnostics::empty(),
        }
    }

    /// Lex the entire source file into a token stream.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();
        loop {
            if self.errors.is_full() {
                break;
            }
            let token = self.scan_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, self.span_from(self.pos)));
        }

        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn eat_byte(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn span_from(&self, start: usize) -> Span {
        self.source_file.span(start, self.pos)
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let source_line = self.source_file.line(span.line).unwrap_or("");
        let err = Diagnostic::new(&self.source_file.name, code, message, span, source_line);
        self.errors.push(err);
    }

    fn emit_error_with_suggestion(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) {
        let source_line = self.source_file.line(span.line).unwrap_or("");
        let err = Diagnostic::new(&self.source_file.name, code, message, span, source_line)
            .with_suggestion(suggestion);
        self.errors.push(err);
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip whitespace and `//` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while !matches!(self.peek(), None | Some(b'\n')) {
                        self.pos += 1;
                    }
                }
                _ => return,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Token scanning
    // ─────────────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Token {
        loop {
            if let Some(token) = self.scan_one() {
                return token;
            }
            if self.errors.is_full() {
                return Token::new(TokenKind::Eof, self.span_from(self.pos));
            }
        }
    }

    /// Scan one token; `None` means an unexpected character was skipped.
    fn scan_one(&mut self) -> Option<Token> {
        self.skip_trivia();

        let start = self.pos;
        let Some(ch) = self.peek() else {
            return Some(Token::new(TokenKind::Eof, self.span_from(start)));
        };
        self.pos += 1;

        let kind = match ch {
            b'0'..=b'9' => return Some(self.scan_number(start)),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return Some(self.scan_identifier(start)),

            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b';' => TokenKind::Semicolon,

            b'=' => {
                if self.peek() != Some(b'=') {
                    TokenKind::Eq
                } else {
                    self.pos += 1;
                    if !self.eat_byte(b'=') {
                        let span = self.span_from(start);
                        self.emit_error_with_suggestion(
                            ErrorCode::UNEXPECTED_CHARACTER,
                            "'==' is not an operator",
                            span,
                            "use '===' to compare values",
                        );
                    }
                    TokenKind::StrictEq
                }
            }

            b'&' | b'|' => {
                let doubled = self.eat_byte(ch);
                let kind = if ch == b'&' {
                    TokenKind::AndAnd
                } else {
                    TokenKind::OrOr
                };
                if !doubled {
                    let span = self.span_from(start);
                    self.emit_error_with_suggestion(
                        ErrorCode::UNEXPECTED_CHARACTER,
                        format!("unexpected character '{}'", ch as char),
                        span,
                        format!("use '{kind}' for the logical operator"),
                    );
                }
                kind
            }

            _ => {
                // Step over the whole (possibly multi-byte) character.
                let bad = self.source_file.source[start..].chars().next().unwrap_or('?');
                self.pos = start + bad.len_utf8();
                let span = self.span_from(start);
                self.emit_error(
                    ErrorCode::UNEXPECTED_CHARACTER,
                    format!("unexpected character '{bad}'"),
                    span,
                );
                return None;
            }
        };

        Some(Token::new(kind, self.span_from(start)))
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            if matches!(self.peek(), Some(b'0'..=b'9')) {
                while let Some(b'0'..=b'9') = self.peek() {
                    self.pos += 1;
                }
            } else {
                let span = self.span_from(start);
                self.emit_error_with_suggestion(
                    ErrorCode::INVALID_NUMBER,
                    "expected digits after the decimal point",
                    span,
                    format!("write '{}0'", self.source_file.slice(span)),
                );
            }
        }

        let span = self.span_from(start);
        let text = self.source_file.slice(span).trim_end_matches('.');
        let value: f64 = text.parse().unwrap_or(0.0);
        Token::new(TokenKind::NumberLit(value), span)
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }

        let span = self.span_from(start);
        let text = self.source_file.slice(span);
        let kind = TokenKind::from_keyword(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Token::new(kind, span)
    }
}
