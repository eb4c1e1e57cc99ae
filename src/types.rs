//! Core data types shared across the rendering pipeline.

// ---------------------------------------------------------------------------
// Classified input lines
// ---------------------------------------------------------------------------

/// A single input line after classification.
///
/// Classification is stateful: the same raw line classifies differently
/// depending on prior lines (see [`crate::classify::ClassifierState`]), so a
/// `ClassifiedLine` is only meaningful relative to the stream it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedLine {
    /// ATX heading: 1–6 leading `#` followed by whitespace.
    Heading { level: u8, content: String },
    /// Opening code fence, with the language tag (may be empty).
    CodeFenceStart { lang: String },
    /// Closing code fence.
    CodeFenceEnd,
    /// Verbatim line inside an open code fence.
    CodeLine { content: String },
    /// 3+ of `-`, `*`, or `_` alone on the line.
    HorizontalRule,
    /// Pipe-delimited data row; kept raw until the table flushes.
    TableRow { raw: String },
    /// Pipe-delimited alignment row (`|---|:---:|---:|`).
    TableSeparator { raw: String },
    /// `> quoted text`.
    Blockquote { content: String },
    /// `- item`, `* item`, or `+ item`.
    BulletItem { content: String },
    /// `1. item` — the number is preserved verbatim, never renumbered.
    NumberedItem { number: String, content: String },
    /// Empty (or whitespace-only) line.
    Blank,
    /// Anything that matched no other rule.
    PlainText { content: String },
}

impl ClassifiedLine {
    /// Whether this line participates in table accumulation.
    pub fn is_table(&self) -> bool {
        matches!(
            self,
            ClassifiedLine::TableRow { .. } | ClassifiedLine::TableSeparator { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// Styled output
// ---------------------------------------------------------------------------

/// A segment of styled text within a line.
///
/// Styling is semantic: `token` names a style (`heading.1`, `pattern.desc`,
/// …) resolved by a [`crate::theme::TokenStyler`] at paint time. `bold` and
/// `italic` are ANSI attributes emitted before the styler is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledSegment {
    /// The text content.
    pub text: String,
    /// Semantic style token, or `None` for default foreground.
    pub token: Option<String>,
    /// Whether this segment is bold.
    pub bold: bool,
    /// Whether this segment is italic.
    pub italic: bool,
}

impl StyledSegment {
    /// A segment with no token and no attributes.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A segment styled with a semantic token.
    pub fn token(text: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            token: Some(token.into()),
            ..Default::default()
        }
    }
}

/// A single line of styled output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    /// The styled segments making up this line.
    pub segments: Vec<StyledSegment>,
}

impl StyledLine {
    /// Creates a new styled line from segments.
    pub fn new(segments: Vec<StyledSegment>) -> Self {
        Self { segments }
    }

    /// Creates a plain unstyled line from text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            segments: vec![StyledSegment::plain(text)],
        }
    }

    /// Append a segment.
    pub fn push(&mut self, segment: StyledSegment) {
        self.segments.push(segment);
    }

    /// Display width of the line (marker stripping has already happened by
    /// the time text reaches a segment, so this is a plain char count).
    pub fn width(&self) -> usize {
        self.segments
            .iter()
            .map(|s| s.text.chars().count())
            .sum()
    }

    /// The unstyled text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_table() {
        assert!(
            ClassifiedLine::TableRow {
                raw: "| a |".into()
            }
            .is_table()
        );
        assert!(
            ClassifiedLine::TableSeparator {
                raw: "|---|".into()
            }
            .is_table()
        );
        assert!(!ClassifiedLine::Blank.is_table());
        assert!(
            !ClassifiedLine::PlainText {
                content: "| not closed".into()
            }
            .is_table()
        );
    }

    #[test]
    fn test_styled_line_width_and_text() {
        let mut line = StyledLine::plain("hello ");
        line.push(StyledSegment::token("world", "pattern.desc"));
        assert_eq!(line.width(), 11);
        assert_eq!(line.text(), "hello world");
    }

    #[test]
    fn test_plain_segment_has_no_style() {
        let seg = StyledSegment::plain("x");
        assert_eq!(seg.token, None);
        assert!(!seg.bold);
        assert!(!seg.italic);
    }
}
