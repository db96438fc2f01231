use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location span.
///
/// `start`/`end` are byte offsets into the source text (end exclusive);
/// `line`/`col` locate `start` and are 1-based for human-readable messages.
/// The default span (all zeros) marks nodes that did not come from source
/// text, such as decoded or hand-built ASTs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    #[serde(rename = "column")]
    pub col: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, line: u32, col: u32) -> Self {
        Self {
            start,
            end,
            line,
            col,
        }
    }

    /// Returns `true` for spans that carry no source position.
    pub fn is_synthetic(&self) -> bool {
        self.line == 0
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        if self.is_synthetic() {
            return other;
        }
        if other.is_synthetic() {
            return self;
        }
        let first = if self.start <= other.start { self } else { other };
        Span::new(
            first.start,
            self.end.max(other.end),
            first.line,
            first.col,
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Holds the source text for span construction and error reporting.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Create a new source file.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// 1-based line and column of a byte offset.
    ///
    /// Offsets past the end clamp to the end of the last line.
    pub fn location(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.source.len());
        let idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let col = self.source[self.line_starts[idx]..offset].chars().count();
        (idx as u32 + 1, col as u32 + 1)
    }

    /// Build a span over `start..end`.
    pub fn span(&self, start: usize, end: usize) -> Span {
        let (line, col) = self.location(start);
        Span::new(start, end, line, col)
    }

    /// Source text covered by a span.
    pub fn slice(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or("")
    }

    /// Extract a source line by 1-based line number.
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line(&self, line_number: u32) -> Option<&str> {
        let idx = line_number.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches('\r'))
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_orders_by_start() {
        let a = Span::new(10, 14, 2, 3);
        let b = Span::new(2, 5, 1, 3);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(2, 14, 1, 3));
        assert_eq!(b.merge(a), merged);
    }

    #[test]
    fn test_span_merge_ignores_synthetic() {
        let real = Span::new(4, 8, 1, 5);
        assert_eq!(real.merge(Span::default()), real);
        assert_eq!(Span::default().merge(real), real);
    }

    #[test]
    fn test_span_display() {
        let s = Span::new(0, 3, 3, 7);
        assert_eq!(format!("{s}"), "3:7");
    }

    #[test]
    fn test_location_and_span() {
        let src = SourceFile::new("t.bk", "let x = 1;\nx = 2;");
        assert_eq!(src.location(0), (1, 1));
        assert_eq!(src.location(4), (1, 5));
        assert_eq!(src.location(11), (2, 1));
        assert_eq!(src.location(999), (2, 7));
        let span = src.span(11, 12);
        assert_eq!(span.line, 2);
        assert_eq!(src.slice(span), "x");
    }

    #[test]
    fn test_source_file_line_extraction() {
        let src = SourceFile::new("t.bk", "line one\r\nline two\nline three");
        assert_eq!(src.line(1), Some("line one"));
        assert_eq!(src.line(2), Some("line two"));
        assert_eq!(src.line(3), Some("line three"));
        assert_eq!(src.line(0), None);
        assert_eq!(src.line(4), None);
        assert_eq!(src.line_count(), 3);
    }

    #[test]
    fn test_source_file_empty() {
        let src = SourceFile::new("t.bk", "");
        assert_eq!(src.line_count(), 1);
        assert_eq!(src.line(1), Some(""));
        assert_eq!(src.location(0), (1, 1));
    }
}
