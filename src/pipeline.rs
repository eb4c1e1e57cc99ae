//! Render dispatcher: the per-line state machine over classified lines.
//!
//! [`Renderer`] consumes one raw line at a time, classifies it, manages
//! table-accumulation transitions, invokes hooks in their fixed order, and
//! dispatches to the type-specific renderer — which may itself consult the
//! pattern engine and the text utilities. All mutable state lives in
//! [`RenderState`], owned by the renderer and threaded explicitly; rendering
//! two documents concurrently means two renderers (the pattern registry may
//! be shared immutably).

use crate::ansi;
use crate::classify::ClassifierState;
use crate::hooks::{HookContext, HookSet, ListMarker, RenderHook};
use crate::patterns::PatternSet;
use crate::table::{TableBuffer, TableRenderer, TableStyle};
use crate::text::{inline_format, word_wrap};
use crate::theme::{DefaultStyler, TokenStyler};
use crate::types::{ClassifiedLine, StyledLine, StyledSegment};

// ---------------------------------------------------------------------------
// Options and state
// ---------------------------------------------------------------------------

/// Rendering configuration.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Terminal width in columns.
    pub width: usize,
    /// Left padding in columns, applied to every emitted line.
    pub pad: usize,
    /// Whether the pattern grammar runs at all. Disabled, every line falls
    /// back to inline formatting only.
    pub patterns_enabled: bool,
    /// Suppress all color/attribute emission, preserving layout and text.
    pub no_color: bool,
    /// Collapse a pattern-matched numbered item to one truncated line
    /// instead of an expanded header+body block.
    pub truncate_mode: bool,
    /// Table border style.
    pub table_style: TableStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            pad: 0,
            patterns_enabled: true,
            no_color: false,
            truncate_mode: false,
            table_style: TableStyle::Unicode,
        }
    }
}

/// All mutable state of one rendering stream.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    /// Classifier state (fence flag, fence language).
    pub classifier: ClassifierState,
    /// Table rows accumulated and not yet flushed.
    pub table: TableBuffer,
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// The line-at-a-time markdown renderer.
pub struct Renderer {
    options: RenderOptions,
    styler: Box<dyn TokenStyler>,
    patterns: PatternSet,
    hooks: HookSet,
    state: RenderState,
}

impl Renderer {
    /// A renderer with the default styler, built-in patterns, and no hooks.
    pub fn new(options: RenderOptions) -> Self {
        Self::with_styler(options, Box::new(DefaultStyler::default()))
    }

    /// A renderer with a caller-provided color provider.
    pub fn with_styler(options: RenderOptions, styler: Box<dyn TokenStyler>) -> Self {
        Self {
            options,
            styler,
            patterns: PatternSet::with_builtins(),
            hooks: HookSet::new(),
            state: RenderState::default(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Current stream state (fence flag, table buffer).
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// The pattern registry, for registering or removing patterns.
    pub fn patterns_mut(&mut self) -> &mut PatternSet {
        &mut self.patterns
    }

    /// Register a render hook. Hooks run in registration order.
    pub fn add_hook(&mut self, hook: Box<dyn RenderHook>) {
        self.hooks.register(hook);
    }

    /// Render one raw input line, returning the ANSI output lines it
    /// produced — possibly none while a table is accumulating.
    pub fn render_line(&mut self, raw: &str) -> Vec<String> {
        let line = self.state.classifier.classify(raw);
        log::trace!("classified {raw:?} as {line:?}");
        let ctx = self.hook_context();
        let mut out: Vec<StyledLine> = Vec::new();

        // A pending table flushes before any other line type renders.
        if !line.is_table() && !self.state.table.is_empty() {
            self.flush_table(&mut out);
        }

        if !self.hooks.pre_line(&line, &ctx, &mut out) {
            self.dispatch(&line, &ctx, &mut out);
        }
        self.hooks.post_line(&line, &ctx, &mut out);

        self.paint(out)
    }

    /// Signal end of input: flushes a dangling table and closes a dangling
    /// code fence so the output is always well-formed.
    pub fn finish(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        if self.state.classifier.in_code_fence {
            log::debug!("input ended inside a code fence; closing it");
            self.state.classifier.in_code_fence = false;
            self.state.classifier.fence_language.clear();
            out.push(StyledLine::new(vec![StyledSegment::token("```", "fence")]));
        }
        if !self.state.table.is_empty() {
            self.flush_table(&mut out);
        }
        self.paint(out)
    }

    /// Convenience driver: render a whole sequence of lines and finish.
    pub fn render<I, S>(&mut self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = Vec::new();
        for line in lines {
            out.extend(self.render_line(line.as_ref()));
        }
        out.extend(self.finish());
        out
    }

    // -----------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------

    fn dispatch(&mut self, line: &ClassifiedLine, ctx: &HookContext, out: &mut Vec<StyledLine>) {
        let width = self.content_width();
        match line {
            ClassifiedLine::TableRow { raw } => {
                let raw = self.hooks.transform(raw);
                self.state.table.push_row(&raw);
            }
            ClassifiedLine::TableSeparator { raw } => {
                let raw = self.hooks.transform(raw);
                self.state.table.push_separator(&raw);
            }
            ClassifiedLine::Heading { level, content } => {
                let content = self.hooks.transform(content);
                if !self.hooks.render_heading(*level, &content, ctx, out) {
                    let token = format!("heading.{level}");
                    let hashes = "#".repeat(usize::from(*level));
                    let mut styled = StyledLine::new(vec![StyledSegment::token(
                        format!("{hashes} "),
                        token.clone(),
                    )]);
                    for seg in inline_format(&content, &token) {
                        styled.push(seg);
                    }
                    out.push(styled);
                }
            }
            ClassifiedLine::CodeFenceStart { lang } => {
                out.push(StyledLine::new(vec![StyledSegment::token(
                    format!("```{lang}"),
                    "fence",
                )]));
            }
            ClassifiedLine::CodeFenceEnd => {
                out.push(StyledLine::new(vec![StyledSegment::token("```", "fence")]));
            }
            ClassifiedLine::CodeLine { content } => {
                let content = self.hooks.transform(content);
                if !self.hooks.render_code(&content, ctx, out) {
                    out.push(StyledLine::new(vec![StyledSegment::token(
                        content,
                        "code.block",
                    )]));
                }
            }
            ClassifiedLine::Blockquote { content } => {
                let content = self.hooks.transform(content);
                if !self.hooks.render_quote(&content, ctx, out) {
                    let mut styled = StyledLine::new(vec![StyledSegment::token("│ ", "quote")]);
                    for seg in inline_format(&content, "text") {
                        styled.push(seg);
                    }
                    out.push(styled);
                }
            }
            ClassifiedLine::BulletItem { content } => {
                let content = self.hooks.transform(content);
                if !self.hooks.render_list(ListMarker::Bullet, &content, ctx, out) {
                    self.render_list_item("• ", &content, false, out);
                }
            }
            ClassifiedLine::NumberedItem { number, content } => {
                let content = self.hooks.transform(content);
                let marker = ListMarker::Numbered(number);
                if !self.hooks.render_list(marker, &content, ctx, out) {
                    self.render_list_item(&format!("{number}. "), &content, true, out);
                }
            }
            ClassifiedLine::HorizontalRule => {
                if !self.hooks.render_hr(ctx, out) {
                    out.push(StyledLine::new(vec![StyledSegment::token(
                        "─".repeat(width),
                        "rule",
                    )]));
                }
            }
            ClassifiedLine::Blank => out.push(StyledLine::default()),
            ClassifiedLine::PlainText { content } => {
                let content = self.hooks.transform(content);
                if self.options.patterns_enabled {
                    let rendered = self.patterns.render(&content, "text", width, 0);
                    if rendered.matched {
                        out.extend(rendered.lines);
                        return;
                    }
                }
                for chunk in word_wrap(&content, width, "") {
                    out.push(StyledLine::new(inline_format(&chunk, "text")));
                }
            }
        }
    }

    /// Default list-item rendering: marker prefix, then pattern-rendered or
    /// wrapped content with a marker-width-aware indent.
    fn render_list_item(
        &mut self,
        prefix: &str,
        content: &str,
        numbered: bool,
        out: &mut Vec<StyledLine>,
    ) {
        let width = self.content_width();
        let prefix_width = prefix.chars().count();
        let avail = width.saturating_sub(prefix_width).max(1);

        if self.options.patterns_enabled && self.patterns.match_text(content).is_some() {
            let rendered = self.patterns.render(content, "text", avail, prefix_width);
            let mut lines = rendered.lines.into_iter();
            let Some(head) = lines.next() else {
                return;
            };

            if numbered && self.options.truncate_mode {
                let truncated = lines.next().is_some();
                let mut styled =
                    StyledLine::new(vec![StyledSegment::token(prefix, "list.marker")]);
                for seg in truncate_segments(head, avail, truncated).segments {
                    styled.push(seg);
                }
                out.push(styled);
                return;
            }

            let mut styled = StyledLine::new(vec![StyledSegment::token(prefix, "list.marker")]);
            for seg in head.segments {
                styled.push(seg);
            }
            out.push(styled);
            // Continuation lines already carry the marker-width indent.
            out.extend(lines);
            return;
        }

        let indent = " ".repeat(prefix_width);
        let mut chunks = word_wrap(content, avail, &indent).into_iter();
        if let Some(head) = chunks.next() {
            let mut styled = StyledLine::new(vec![StyledSegment::token(prefix, "list.marker")]);
            for seg in inline_format(&head, "text") {
                styled.push(seg);
            }
            out.push(styled);
        }
        for chunk in chunks {
            out.push(StyledLine::new(inline_format(&chunk, "text")));
        }
    }

    fn flush_table(&mut self, out: &mut Vec<StyledLine>) {
        log::debug!("flushing table of {} rows", self.state.table.rows().len());
        let renderer = TableRenderer::new(self.options.table_style.clone());
        out.extend(renderer.render(&self.state.table, self.options.pad, self.options.width));
        self.state.table.clear();
    }

    fn hook_context(&self) -> HookContext {
        HookContext {
            width: self.content_width(),
            pad: self.options.pad,
        }
    }

    fn content_width(&self) -> usize {
        self.options.width.saturating_sub(self.options.pad).max(1)
    }

    fn paint(&self, lines: Vec<StyledLine>) -> Vec<String> {
        let pad = " ".repeat(self.options.pad);
        lines
            .into_iter()
            .map(|line| {
                let painted = ansi::paint(&line, self.styler.as_ref(), self.options.no_color);
                if painted.is_empty() || pad.is_empty() {
                    painted
                } else {
                    format!("{pad}{painted}")
                }
            })
            .collect()
    }
}

/// Cut a styled line down to `avail` columns, appending an ellipsis when the
/// line overflowed or further lines were dropped.
fn truncate_segments(line: StyledLine, avail: usize, force_ellipsis: bool) -> StyledLine {
    let width = line.width();
    if width <= avail && !force_ellipsis {
        return line;
    }
    let budget = if avail > 1 { avail - 1 } else { avail };
    let mut kept = Vec::new();
    let mut used = 0;
    for mut seg in line.segments {
        let len = seg.text.chars().count();
        if used + len <= budget {
            used += len;
            kept.push(seg);
            continue;
        }
        let room = budget - used;
        if room > 0 {
            seg.text = seg.text.chars().take(room).collect();
            kept.push(seg);
        }
        break;
    }
    if avail > 1 {
        kept.push(StyledSegment::plain("…"));
    }
    StyledLine::new(kept)
}
