//! Table accumulation and bordered rendering.
//!
//! Tables are atomic: rows accumulate in a [`TableBuffer`] while consecutive
//! input lines classify as table rows or separators, and nothing is emitted
//! until the buffer flushes — triggered by the first non-table line or by
//! end of input. Flushing computes per-column widths from the content,
//! shrinks them proportionally when the terminal is too narrow, renders the
//! bordered table, and clears the buffer.

use crate::text::{inline_format, visual_width};
use crate::types::{StyledLine, StyledSegment};

/// Columns never shrink below this many content columns.
const MIN_COL_WIDTH: usize = 5;

// ---------------------------------------------------------------------------
// Configuration types
// ---------------------------------------------------------------------------

/// Visual style for table borders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// Unicode box-drawing: `┌─┬─┐`, `│ │ │`, `├─┼─┤`, `└─┴─┘`
    #[default]
    Unicode,
    /// ASCII: `+---+---+`, `| | |`, `+---+---+`
    Ascii,
    /// Rounded corners: `╭─┬─╮`, `│ │ │`, `├─┼─┤`, `╰─┴─╯`
    Rounded,
}

/// Column alignment, parsed from the separator row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

// ---------------------------------------------------------------------------
// Accumulation
// ---------------------------------------------------------------------------

/// Accumulated table rows and separator-derived alignments.
///
/// Non-empty only while a table is actively accumulating.
#[derive(Clone, Debug, Default)]
pub struct TableBuffer {
    rows: Vec<String>,
    alignments: Vec<Alignment>,
}

impl TableBuffer {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a raw data row (kept verbatim until flush).
    pub fn push_row(&mut self, raw: &str) {
        self.rows.push(raw.to_string());
    }

    /// Record a separator row: parsed once into per-column alignments, not
    /// added to the rows.
    pub fn push_separator(&mut self, raw: &str) {
        self.alignments = parse_cells(raw).iter().map(|c| parse_alignment(c)).collect();
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.alignments.clear();
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }
}

/// Parse a pipe-delimited row into trimmed cells, dropping the empty
/// boundary cells produced by the leading/trailing pipes.
pub fn parse_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix('|')
        .unwrap_or(trimmed)
        .strip_suffix('|')
        .unwrap_or(trimmed);
    inner.split('|').map(|s| s.trim().to_string()).collect()
}

/// Parse alignment from a separator cell (`:---:` → Center).
fn parse_alignment(cell: &str) -> Alignment {
    let c = cell.trim();
    match (c.starts_with(':'), c.ends_with(':')) {
        (true, true) => Alignment::Center,
        (false, true) => Alignment::Right,
        _ => Alignment::Left,
    }
}

// ---------------------------------------------------------------------------
// Box-drawing character sets
// ---------------------------------------------------------------------------

struct BoxChars {
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    horizontal: char,
    vertical: char,
    top_tee: char,
    bottom_tee: char,
    left_tee: char,
    right_tee: char,
    cross: char,
}

impl BoxChars {
    fn for_style(style: &TableStyle) -> Self {
        match style {
            TableStyle::Unicode => Self {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
                top_tee: '┬',
                bottom_tee: '┴',
                left_tee: '├',
                right_tee: '┤',
                cross: '┼',
            },
            TableStyle::Ascii => Self {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
                top_tee: '+',
                bottom_tee: '+',
                left_tee: '+',
                right_tee: '+',
                cross: '+',
            },
            TableStyle::Rounded => Self {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
                top_tee: '┬',
                bottom_tee: '┴',
                left_tee: '├',
                right_tee: '┤',
                cross: '┼',
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Renders an accumulated [`TableBuffer`] into bordered styled lines.
pub struct TableRenderer {
    style: TableStyle,
}

impl TableRenderer {
    pub fn new(style: TableStyle) -> Self {
        Self { style }
    }

    /// Render the buffer: top border, header row, header separator, data
    /// rows, bottom border. For `N` accumulated rows the output is always
    /// `N + 3` lines.
    ///
    /// `max_width` (when non-zero) constrains the full table; `pad` is the
    /// left padding the caller will add, reserved here so the shrunk table
    /// still fits.
    pub fn render(&self, buffer: &TableBuffer, pad: usize, max_width: usize) -> Vec<StyledLine> {
        let rows: Vec<Vec<String>> = buffer.rows().iter().map(|r| parse_cells(r)).collect();
        if rows.is_empty() {
            return Vec::new();
        }

        let cols = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let widths = self.column_widths(&rows, cols, pad, max_width);
        let chars = BoxChars::for_style(&self.style);
        let alignments = buffer.alignments();

        let mut lines = Vec::with_capacity(rows.len() + 3);
        lines.push(border_line(
            &widths,
            chars.top_left,
            chars.top_tee,
            chars.top_right,
            chars.horizontal,
        ));
        lines.push(data_line(&rows[0], &widths, alignments, &chars, true));
        lines.push(border_line(
            &widths,
            chars.left_tee,
            chars.cross,
            chars.right_tee,
            chars.horizontal,
        ));
        for row in &rows[1..] {
            lines.push(data_line(row, &widths, alignments, &chars, false));
        }
        lines.push(border_line(
            &widths,
            chars.bottom_left,
            chars.bottom_tee,
            chars.bottom_right,
            chars.horizontal,
        ));
        lines
    }

    /// Natural per-column widths, shrunk proportionally (with a floor) when
    /// the bordered table would overflow the available width.
    fn column_widths(
        &self,
        rows: &[Vec<String>],
        cols: usize,
        pad: usize,
        max_width: usize,
    ) -> Vec<usize> {
        let mut widths = vec![1usize; cols];
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(visual_width(cell));
            }
        }

        if max_width > 0 {
            // Per column: border + two padding spaces, plus the final border.
            let overhead = cols * 3 + 1;
            let available = max_width.saturating_sub(pad + overhead);
            let total: usize = widths.iter().sum();
            if total > available {
                log::debug!("table overflow: {total} content cols into {available}, shrinking");
                for w in &mut widths {
                    *w = (*w * available / total).max(MIN_COL_WIDTH);
                }
            }
        }
        widths
    }
}

fn border_line(widths: &[usize], left: char, mid: char, right: char, fill: char) -> StyledLine {
    let mut text = String::new();
    text.push(left);
    for (i, &w) in widths.iter().enumerate() {
        for _ in 0..w + 2 {
            text.push(fill);
        }
        text.push(if i < widths.len() - 1 { mid } else { right });
    }
    StyledLine::new(vec![StyledSegment::token(text, "table.border")])
}

fn data_line(
    cells: &[String],
    widths: &[usize],
    alignments: &[Alignment],
    chars: &BoxChars,
    is_header: bool,
) -> StyledLine {
    let vertical = chars.vertical.to_string();
    let mut line = StyledLine::new(vec![StyledSegment::token(
        vertical.clone(),
        "table.border",
    )]);

    for (i, &width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let alignment = alignments.get(i).unwrap_or(&Alignment::Left);

        line.push(StyledSegment::plain(" "));
        let (segments, content_width) = cell_segments(cell, width, is_header);
        let (lead, trail) = alignment_padding(content_width, width, alignment);
        if lead > 0 {
            line.push(StyledSegment::plain(" ".repeat(lead)));
        }
        for seg in segments {
            line.push(seg);
        }
        if trail > 0 {
            line.push(StyledSegment::plain(" ".repeat(trail)));
        }
        line.push(StyledSegment::plain(" "));
        line.push(StyledSegment::token(vertical.clone(), "table.border"));
    }
    line
}

/// Inline-format a cell and truncate it to the column width, keeping as many
/// styled spans intact as fit and marking the cut with an ellipsis.
fn cell_segments(cell: &str, width: usize, is_header: bool) -> (Vec<StyledSegment>, usize) {
    let mut segments = if is_header {
        inline_format(cell, "table.header")
            .into_iter()
            .map(|mut seg| {
                seg.bold = true;
                seg
            })
            .collect()
    } else {
        inline_format(cell, "text")
    };

    let mut total: usize = segments.iter().map(|s| s.text.chars().count()).sum();
    if total > width {
        let mut kept = Vec::new();
        let mut used = 0;
        // Leave one column for the ellipsis unless there is no room at all.
        let budget = if width > 1 { width - 1 } else { width };
        for mut seg in segments {
            let len = seg.text.chars().count();
            if used + len <= budget {
                used += len;
                kept.push(seg);
                continue;
            }
            let room = budget - used;
            if room > 0 {
                seg.text = seg.text.chars().take(room).collect();
                used += room;
                kept.push(seg);
            }
            break;
        }
        if width > 1 {
            kept.push(StyledSegment::plain("…"));
            used += 1;
        }
        segments = kept;
        total = used;
    }
    (segments, total)
}

fn alignment_padding(content: usize, width: usize, alignment: &Alignment) -> (usize, usize) {
    let padding = width.saturating_sub(content);
    match alignment {
        Alignment::Left => (0, padding),
        Alignment::Right => (padding, 0),
        Alignment::Center => (padding / 2, padding - padding / 2),
    }
}
