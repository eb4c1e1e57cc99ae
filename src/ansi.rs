//! ANSI escape emission for styled lines.
//!
//! The renderers produce [`StyledLine`]s tagged with semantic tokens; this
//! module is where those become terminal bytes. Attributes (`bold`, `italic`)
//! are emitted as SGR codes before the [`TokenStyler`] is consulted for a
//! color, so attribute handling never depends on the provider in use.

use crate::theme::{Color, TokenStyler};
use crate::types::StyledLine;

/// SGR reset.
pub const RESET: &str = "\x1b[0m";
/// SGR bold attribute.
pub const BOLD: &str = "\x1b[1m";
/// SGR italic attribute.
pub const ITALIC: &str = "\x1b[3m";

/// 24-bit foreground color escape for an RGB triple.
pub fn fg(color: Color) -> String {
    let [r, g, b] = color;
    format!("\x1b[38;2;{r};{g};{b}m")
}

/// Paint a styled line into a single ANSI-escaped string.
///
/// With `no_color` set, every escape is suppressed and only the text is
/// emitted — layout is preserved exactly.
pub fn paint(line: &StyledLine, styler: &dyn TokenStyler, no_color: bool) -> String {
    if no_color {
        return line.text();
    }

    let mut out = String::new();
    for seg in &line.segments {
        if seg.text.is_empty() {
            continue;
        }
        let mut styled = false;
        if seg.bold {
            out.push_str(BOLD);
            styled = true;
        }
        if seg.italic {
            out.push_str(ITALIC);
            styled = true;
        }
        if let Some(token) = &seg.token
            && let Some(color) = styler.resolve(token)
        {
            out.push_str(&fg(color));
            styled = true;
        }
        out.push_str(&seg.text);
        if styled {
            out.push_str(RESET);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DefaultStyler;
    use crate::types::{StyledLine, StyledSegment};

    fn styler() -> DefaultStyler {
        DefaultStyler::default()
    }

    #[test]
    fn test_plain_segment_has_no_escapes() {
        let line = StyledLine::plain("hello");
        assert_eq!(paint(&line, &styler(), false), "hello");
    }

    #[test]
    fn test_token_segment_gets_color_and_reset() {
        let line = StyledLine::new(vec![StyledSegment::token("Title", "heading.1")]);
        let painted = paint(&line, &styler(), false);
        assert_eq!(painted, format!("{}Title{RESET}", fg([137, 220, 235])));
    }

    #[test]
    fn test_bold_precedes_color() {
        let mut seg = StyledSegment::token("x", "heading.1");
        seg.bold = true;
        let painted = paint(&StyledLine::new(vec![seg]), &styler(), false);
        assert!(painted.starts_with(BOLD));
        assert!(painted.ends_with(RESET));
    }

    #[test]
    fn test_unknown_token_renders_text_only() {
        let line = StyledLine::new(vec![StyledSegment::token("x", "bogus")]);
        assert_eq!(paint(&line, &styler(), false), "x");
    }

    #[test]
    fn test_no_color_strips_everything_but_text() {
        let mut seg = StyledSegment::token("bolded", "heading.2");
        seg.bold = true;
        let line = StyledLine::new(vec![StyledSegment::plain("a "), seg]);
        assert_eq!(paint(&line, &styler(), true), "a bolded");
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        let line = StyledLine::new(vec![
            StyledSegment::token("", "heading.1"),
            StyledSegment::plain("x"),
        ]);
        assert_eq!(paint(&line, &styler(), false), "x");
    }
}
