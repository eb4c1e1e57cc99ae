//! Text measurement, inline emphasis parsing, and word wrapping.

use crate::types::StyledSegment;

/// Continuation lines never shrink below this many columns.
const CONT_WIDTH_FLOOR: usize = 20;

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// Remove all emphasis and inline-code markers (`**`, `*`, `` ` ``).
pub fn strip_markers(text: &str) -> String {
    text.chars().filter(|c| *c != '*' && *c != '`').collect()
}

/// Display width of `text`: formatting markers take zero columns.
pub fn visual_width(text: &str) -> usize {
    strip_markers(text).chars().count()
}

// ---------------------------------------------------------------------------
// Inline emphasis
// ---------------------------------------------------------------------------

/// Parse inline emphasis in a single pass, producing styled segments.
///
/// Matched `` ` ``…`` ` `` becomes a `code.inline` span (opaque — markers
/// inside it are literal), matched `**`…`**` becomes bold, matched single
/// `*`…`*` becomes italic. Span content keeps `base_token` for color so
/// emphasis inside a heading stays in the heading's color. Unterminated
/// markers are literal characters.
pub fn inline_format(text: &str, base_token: &str) -> Vec<StyledSegment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments: Vec<StyledSegment> = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    let flush = |literal: &mut String, segments: &mut Vec<StyledSegment>| {
        if !literal.is_empty() {
            segments.push(base_segment(std::mem::take(literal), base_token));
        }
    };

    while i < chars.len() {
        match chars[i] {
            '`' => {
                if let Some(close) = find_char(&chars, i + 1, '`') {
                    flush(&mut literal, &mut segments);
                    let content: String = chars[i + 1..close].iter().collect();
                    segments.push(StyledSegment::token(content, "code.inline"));
                    i = close + 1;
                    continue;
                }
                literal.push('`');
                i += 1;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    if let Some(close) = find_double_star(&chars, i + 2) {
                        flush(&mut literal, &mut segments);
                        let content: String = chars[i + 2..close].iter().collect();
                        let mut seg = base_segment(content, base_token);
                        seg.bold = true;
                        segments.push(seg);
                        i = close + 2;
                        continue;
                    }
                    // Unterminated `**`: both stars are literal.
                    literal.push_str("**");
                    i += 2;
                } else {
                    if let Some(close) = find_char(&chars, i + 1, '*') {
                        flush(&mut literal, &mut segments);
                        let content: String = chars[i + 1..close].iter().collect();
                        let mut seg = base_segment(content, base_token);
                        seg.italic = true;
                        segments.push(seg);
                        i = close + 1;
                        continue;
                    }
                    literal.push('*');
                    i += 1;
                }
            }
            c => {
                literal.push(c);
                i += 1;
            }
        }
    }

    flush(&mut literal, &mut segments);
    segments
}

fn base_segment(text: String, base_token: &str) -> StyledSegment {
    if base_token == "text" {
        StyledSegment::plain(text)
    } else {
        StyledSegment::token(text, base_token)
    }
}

fn find_char(chars: &[char], from: usize, needle: char) -> Option<usize> {
    (from..chars.len()).find(|&j| chars[j] == needle)
}

fn find_double_star(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == '*' && chars[j + 1] == '*')
}

// ---------------------------------------------------------------------------
// Word wrapping
// ---------------------------------------------------------------------------

/// Greedy word wrap with a fixed continuation indent.
///
/// The first line is limited to `width`; continuation lines are prefixed
/// with `indent` and limited to `width - indent` (floored at 20 columns).
/// Words are never split: a single word longer than the limit gets a line
/// of its own.
pub fn word_wrap(text: &str, width: usize, indent: &str) -> Vec<String> {
    let indent_width = indent.chars().count();
    let cont_width = width.saturating_sub(indent_width).max(CONT_WIDTH_FLOOR);
    let chunks = wrap_chunks(text, width.max(1), cont_width);

    chunks
        .into_iter()
        .enumerate()
        .map(|(n, chunk)| {
            if n == 0 {
                chunk
            } else {
                format!("{indent}{chunk}")
            }
        })
        .collect()
}

/// Greedy word wrap where the first line and continuation lines have
/// independently supplied widths and no indent is applied — the caller pads
/// continuation lines itself.
pub fn word_wrap_variable(text: &str, first_width: usize, cont_width: usize) -> Vec<String> {
    wrap_chunks(text, first_width.max(1), cont_width.max(1))
}

fn wrap_chunks(text: &str, first_width: usize, cont_width: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let limit = if chunks.is_empty() {
            first_width
        } else {
            cont_width
        };
        let needed = current.chars().count()
            + if current.is_empty() { 0 } else { 1 }
            + word.chars().count();
        if !current.is_empty() && needed > limit {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
