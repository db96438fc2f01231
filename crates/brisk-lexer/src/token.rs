//! Token types for the Brisk lexer.
//!
//! Defines [`TokenKind`] covering every lexeme in Brisk and [`Token`],
//! which pairs a kind with a source [`Span`].

use brisk_types::Span;
use std::fmt;

/// The reserved identifiers. The lexer emits a keyword token for each one
/// instead of [`TokenKind::Identifier`].
pub const ALL_KEYWORDS: &[&str] = &["let", "if", "else", "while", "print", "true", "false"];

/// A single token produced by the Brisk lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` if this token is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

/// Every token kind in the Brisk language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// `42`, `3.14`
    NumberLit(f64),
    True,
    False,

    /// User-defined identifier: `x`, `total_count`
    Identifier(String),

    // ── Keywords ─────────────────────────────────────────────
    Let,
    If,
    Else,
    While,
    Print,

    // ── Operators ────────────────────────────────────────────
    /// `===`
    StrictEq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    Plus,
    Minus,
    Star,
    Slash,
    Less,
    Greater,

    // ── Punctuation ──────────────────────────────────────────
    /// `=` (declaration and assignment)
    Eq,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,

    Eof,
}

impl TokenKind {
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "let" => TokenKind::Let,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "print" => TokenKind::Print,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        })
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Keywords that begin a statement; the parser resynchronizes on these.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Let | TokenKind::If | TokenKind::While | TokenKind::Print
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::NumberLit(n) => write!(f, "{n}"),
            TokenKind::True => f.write_str("true"),
            TokenKind::False => f.write_str("false"),
            TokenKind::Identifier(s) => f.write_str(s),
            TokenKind::Let => f.write_str("let"),
            TokenKind::If => f.write_str("if"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::While => f.write_str("while"),
            TokenKind::Print => f.write_str("print"),
            TokenKind::StrictEq => f.write_str("==="),
            TokenKind::AndAnd => f.write_str("&&"),
            TokenKind::OrOr => f.write_str("||"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::Eq => f.write_str("="),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}
