use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of diagnostics stored before the front end stops.
pub const MAX_ERRORS: usize = 20;

/// Numeric diagnostic code (E100–E199, all syntax).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    pub const UNEXPECTED_TOKEN: Self = Self(100);
    pub const UNCLOSED_BRACE: Self = Self(101);
    pub const UNEXPECTED_CHARACTER: Self = Self(102);
    pub const INVALID_NUMBER: Self = Self(103);
    pub const NESTING_LIMIT_EXCEEDED: Self = Self(104);
    pub const CHAINED_COMPARISON: Self = Self(105);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured syntax diagnostic from the lexer or parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{file}:{span}: {code} {message}")]
pub struct Diagnostic {
    /// Source file name.
    pub file: String,
    pub code: ErrorCode,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The source line the span starts on.
    pub source_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            message: message.into(),
            span,
            source_line: source_line.into(),
            suggestion: None,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Render the diagnostic with its source line and a caret marker.
    pub fn render(&self) -> String {
        let mut out = self.to_string();
        if !self.source_line.is_empty() {
            let width = self.span.end.saturating_sub(self.span.start).max(1);
            let pad = (self.span.col as usize).saturating_sub(1);
            out.push_str(&format!(
                "\n  | {}\n  | {}{}",
                self.source_line,
                " ".repeat(pad),
                "^".repeat(width)
            ));
        }
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!("\n  = help: {suggestion}"));
        }
        out
    }
}

/// Diagnostics collected by a front-end stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub total_errors: usize,
}

impl Diagnostics {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// `true` once [`MAX_ERRORS`] have been reported.
    pub fn is_full(&self) -> bool {
        self.total_errors >= MAX_ERRORS
    }

    /// Add an error, storing at most [`MAX_ERRORS`] but counting all of them.
    pub fn push(&mut self, error: Diagnostic) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    /// Append another stage's diagnostics.
    pub fn extend(&mut self, other: Diagnostics) {
        let overflow = other.total_errors - other.errors.len();
        for error in other.errors {
            self.push(error);
        }
        self.total_errors += overflow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(code: ErrorCode, message: &str) -> Diagnostic {
        Diagnostic::new("t.bk", code, message, Span::new(4, 5, 1, 5), "let = 1;")
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::UNEXPECTED_TOKEN.to_string(), "E100");
        assert_eq!(ErrorCode::CHAINED_COMPARISON.to_string(), "E105");
    }

    #[test]
    fn test_diagnostic_display_and_render() {
        let d = diag(ErrorCode::UNEXPECTED_TOKEN, "expected identifier, got '='")
            .with_suggestion("name the variable");
        assert_eq!(d.to_string(), "t.bk:1:5: E100 expected identifier, got '='");
        let rendered = d.render();
        assert!(rendered.contains("  | let = 1;"));
        assert!(rendered.contains("  |     ^"));
        assert!(rendered.ends_with("= help: name the variable"));
    }

    #[test]
    fn test_diagnostic_json_shape() {
        let json = serde_json::to_value(diag(ErrorCode::UNEXPECTED_TOKEN, "boom")).unwrap();
        assert_eq!(json["code"], 100);
        assert_eq!(json["line"], 1);
        assert_eq!(json["column"], 5);
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn test_diagnostics_cap() {
        let mut errs = Diagnostics::empty();
        for i in 0..25 {
            errs.push(diag(ErrorCode::UNEXPECTED_CHARACTER, &format!("error {i}")));
        }
        assert_eq!(errs.errors.len(), MAX_ERRORS);
        assert_eq!(errs.total_errors, 25);
        assert!(errs.is_full());
    }

    #[test]
    fn test_diagnostics_extend_keeps_counts() {
        let mut lex = Diagnostics::empty();
        lex.push(diag(ErrorCode::UNEXPECTED_CHARACTER, "a"));
        let mut parse = Diagnostics::empty();
        parse.push(diag(ErrorCode::UNEXPECTED_TOKEN, "b"));
        parse.push(diag(ErrorCode::UNCLOSED_BRACE, "c"));
        lex.extend(parse);
        assert_eq!(lex.total_errors, 3);
        assert_eq!(lex.errors[2].code, ErrorCode::UNCLOSED_BRACE);
    }
}
