//! Stateful line classification.
//!
//! [`ClassifierState::classify`] turns one raw line into a
//! [`ClassifiedLine`]. The classifier is deliberately not a pure function of
//! the line: while a code fence is open, every line is verbatim code, so
//! lines must be fed in stream order, exactly once each.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::ClassifiedLine;

fn re_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```\s*([^`\s]*)\s*$").unwrap())
}

fn re_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap())
}

fn re_horizontal_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap())
}

fn re_blockquote() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*>\s?(.*)$").unwrap())
}

fn re_bullet() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[-*+]\s+(.*)$").unwrap())
}

fn re_numbered() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\.\s+(.*)$").unwrap())
}

/// Mutable classifier state, owned by the caller and threaded through every
/// `classify` call for one document.
#[derive(Debug, Clone, Default)]
pub struct ClassifierState {
    /// Whether a code fence is currently open.
    pub in_code_fence: bool,
    /// Language tag of the open fence (empty when none was given).
    pub fence_language: String,
}

impl ClassifierState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one raw line, advancing fence state as needed.
    ///
    /// Rules are checked in a fixed order, first match wins, and no input can
    /// fail: anything unrecognized falls through to `PlainText`.
    pub fn classify(&mut self, line: &str) -> ClassifiedLine {
        let trimmed = line.trim();

        // Fence delimiters toggle regardless of what else the line resembles.
        if let Some(caps) = re_fence().captures(trimmed) {
            if self.in_code_fence {
                self.in_code_fence = false;
                self.fence_language.clear();
                return ClassifiedLine::CodeFenceEnd;
            }
            self.in_code_fence = true;
            self.fence_language = caps[1].to_string();
            return ClassifiedLine::CodeFenceStart {
                lang: self.fence_language.clone(),
            };
        }

        if self.in_code_fence {
            return ClassifiedLine::CodeLine {
                content: line.to_string(),
            };
        }

        if trimmed.is_empty() {
            return ClassifiedLine::Blank;
        }

        if let Some(caps) = re_heading().captures(line) {
            return ClassifiedLine::Heading {
                level: caps[1].len() as u8,
                content: caps[2].to_string(),
            };
        }

        // Checked before lists so `---` is a rule, not a bullet. A table
        // separator never reaches this rule: it starts with `|`.
        if re_horizontal_rule().is_match(trimmed) {
            return ClassifiedLine::HorizontalRule;
        }

        if trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|') {
            if is_table_separator(trimmed) {
                return ClassifiedLine::TableSeparator {
                    raw: trimmed.to_string(),
                };
            }
            return ClassifiedLine::TableRow {
                raw: trimmed.to_string(),
            };
        }

        if let Some(caps) = re_blockquote().captures(line) {
            return ClassifiedLine::Blockquote {
                content: caps[1].to_string(),
            };
        }

        if let Some(caps) = re_bullet().captures(line) {
            return ClassifiedLine::BulletItem {
                content: caps[1].to_string(),
            };
        }

        if let Some(caps) = re_numbered().captures(line) {
            return ClassifiedLine::NumberedItem {
                number: caps[1].to_string(),
                content: caps[2].to_string(),
            };
        }

        ClassifiedLine::PlainText {
            content: line.to_string(),
        }
    }
}

/// A separator row strips to nothing once `|`, `:`, `-`, and whitespace are
/// removed; anything else in the row makes it a data row.
fn is_table_separator(row: &str) -> bool {
    row.chars()
        .all(|c| c == '|' || c == ':' || c == '-' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassifiedLine::*;

    fn classify_all(lines: &[&str]) -> Vec<ClassifiedLine> {
        let mut state = ClassifierState::new();
        lines.iter().map(|l| state.classify(l)).collect()
    }

    #[test]
    fn test_heading_levels() {
        let mut state = ClassifierState::new();
        assert_eq!(
            state.classify("# Title"),
            Heading {
                level: 1,
                content: "Title".into()
            }
        );
        assert_eq!(
            state.classify("###### deep"),
            Heading {
                level: 6,
                content: "deep".into()
            }
        );
        // Seven hashes is not a heading.
        assert!(matches!(state.classify("####### nope"), PlainText { .. }));
        // No space after the hashes is not a heading.
        assert!(matches!(state.classify("#nospace"), PlainText { .. }));
    }

    #[test]
    fn test_fence_round_trip() {
        let out = classify_all(&["```bash", "echo hi", "```"]);
        assert_eq!(
            out,
            vec![
                CodeFenceStart {
                    lang: "bash".into()
                },
                CodeLine {
                    content: "echo hi".into()
                },
                CodeFenceEnd,
            ]
        );
    }

    #[test]
    fn test_fence_state_wins_over_other_rules() {
        let out = classify_all(&["```", "# not a heading", "| not | a table |", "```"]);
        assert!(matches!(out[1], CodeLine { .. }));
        assert!(matches!(out[2], CodeLine { .. }));
        assert_eq!(out[3], CodeFenceEnd);
    }

    #[test]
    fn test_fence_flag_resets() {
        let mut state = ClassifierState::new();
        state.classify("```rust");
        assert!(state.in_code_fence);
        assert_eq!(state.fence_language, "rust");
        state.classify("```");
        assert!(!state.in_code_fence);
        assert_eq!(state.fence_language, "");
    }

    #[test]
    fn test_blank() {
        let mut state = ClassifierState::new();
        assert_eq!(state.classify(""), Blank);
        assert_eq!(state.classify("   "), Blank);
    }

    #[test]
    fn test_horizontal_rule_variants() {
        let mut state = ClassifierState::new();
        for line in ["---", "----", "***", "___"] {
            assert_eq!(state.classify(line), HorizontalRule, "{line}");
        }
        // Too short.
        assert!(matches!(state.classify("--"), PlainText { .. }));
    }

    #[test]
    fn test_table_rows_and_separator() {
        let mut state = ClassifierState::new();
        assert!(matches!(state.classify("| a | b |"), TableRow { .. }));
        assert!(matches!(
            state.classify("|---|:---:|"),
            TableSeparator { .. }
        ));
        // Missing trailing pipe: not a table line.
        assert!(matches!(state.classify("| a | b"), PlainText { .. }));
    }

    #[test]
    fn test_separator_is_not_horizontal_rule() {
        let mut state = ClassifierState::new();
        assert!(matches!(
            state.classify("|---|---|"),
            TableSeparator { .. }
        ));
    }

    #[test]
    fn test_blockquote() {
        let mut state = ClassifierState::new();
        assert_eq!(
            state.classify("> quoted"),
            Blockquote {
                content: "quoted".into()
            }
        );
        assert_eq!(
            state.classify(">bare"),
            Blockquote {
                content: "bare".into()
            }
        );
    }

    #[test]
    fn test_lists() {
        let mut state = ClassifierState::new();
        assert_eq!(
            state.classify("- item"),
            BulletItem {
                content: "item".into()
            }
        );
        assert_eq!(
            state.classify("  * indented"),
            BulletItem {
                content: "indented".into()
            }
        );
        assert_eq!(
            state.classify("12. step"),
            NumberedItem {
                number: "12".into(),
                content: "step".into()
            }
        );
        // The number is preserved, not parsed down to a canonical form.
        assert_eq!(
            state.classify("03. step"),
            NumberedItem {
                number: "03".into(),
                content: "step".into()
            }
        );
    }

    #[test]
    fn test_plain_text_fallthrough() {
        let mut state = ClassifierState::new();
        assert_eq!(
            state.classify("just some words"),
            PlainText {
                content: "just some words".into()
            }
        );
    }
}
