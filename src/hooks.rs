//! Render hook extension points.
//!
//! External code intercepts rendering by implementing [`RenderHook`] and
//! registering it on a [`HookSet`]. Every method defaults to "unclaimed", so
//! an implementation overrides only the points it cares about. Hooks run in
//! registration order and the first one to claim a point wins; when none
//! claims, the default renderer runs.
//!
//! Fixed call order per line: `transform_content` (on the raw content) →
//! `pre_line` → the type-specific point (`render_heading`, `render_code`,
//! `render_quote`, `render_list`, `render_hr`) → `post_line`.

use crate::types::{ClassifiedLine, StyledLine};

/// Layout information passed to every hook point.
#[derive(Debug, Clone, Copy)]
pub struct HookContext {
    /// Usable width in columns for the content region.
    pub width: usize,
    /// Left padding the dispatcher applies to emitted lines.
    pub pad: usize,
}

/// The marker of a list item, for `render_list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker<'a> {
    Bullet,
    /// The verbatim number of a numbered item.
    Numbered(&'a str),
}

/// A rendering interceptor. Claiming methods return `true` to take over the
/// line; `false` falls through to the next hook and then the default
/// renderer. Claimed output is appended to `out`.
pub trait RenderHook: Send + Sync {
    /// Runs before the type-specific point for every line. Claiming here
    /// suppresses the type-specific rendering entirely (including table
    /// accumulation — the hook takes full responsibility for the line).
    fn pre_line(
        &self,
        _line: &ClassifiedLine,
        _ctx: &HookContext,
        _out: &mut Vec<StyledLine>,
    ) -> bool {
        false
    }

    fn render_heading(
        &self,
        _level: u8,
        _content: &str,
        _ctx: &HookContext,
        _out: &mut Vec<StyledLine>,
    ) -> bool {
        false
    }

    fn render_code(&self, _content: &str, _ctx: &HookContext, _out: &mut Vec<StyledLine>) -> bool {
        false
    }

    fn render_quote(&self, _content: &str, _ctx: &HookContext, _out: &mut Vec<StyledLine>) -> bool {
        false
    }

    fn render_list(
        &self,
        _marker: ListMarker<'_>,
        _content: &str,
        _ctx: &HookContext,
        _out: &mut Vec<StyledLine>,
    ) -> bool {
        false
    }

    fn render_hr(&self, _ctx: &HookContext, _out: &mut Vec<StyledLine>) -> bool {
        false
    }

    /// Runs after the type-specific point for every line.
    fn post_line(
        &self,
        _line: &ClassifiedLine,
        _ctx: &HookContext,
        _out: &mut Vec<StyledLine>,
    ) -> bool {
        false
    }

    /// Rewrite raw content before any type-specific rendering. `None` leaves
    /// the content unchanged. Transforms chain across hooks in order.
    fn transform_content(&self, _content: &str) -> Option<String> {
        None
    }
}

/// Ordered collection of hooks.
#[derive(Default)]
pub struct HookSet {
    hooks: Vec<Box<dyn RenderHook>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn RenderHook>) {
        self.hooks.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run content through every hook's transform, in order.
    pub fn transform(&self, content: &str) -> String {
        let mut current = content.to_string();
        for hook in &self.hooks {
            if let Some(replaced) = hook.transform_content(&current) {
                current = replaced;
            }
        }
        current
    }

    pub fn pre_line(
        &self,
        line: &ClassifiedLine,
        ctx: &HookContext,
        out: &mut Vec<StyledLine>,
    ) -> bool {
        self.hooks.iter().any(|h| h.pre_line(line, ctx, out))
    }

    pub fn render_heading(
        &self,
        level: u8,
        content: &str,
        ctx: &HookContext,
        out: &mut Vec<StyledLine>,
    ) -> bool {
        self.hooks
            .iter()
            .any(|h| h.render_heading(level, content, ctx, out))
    }

    pub fn render_code(&self, content: &str, ctx: &HookContext, out: &mut Vec<StyledLine>) -> bool {
        self.hooks.iter().any(|h| h.render_code(content, ctx, out))
    }

    pub fn render_quote(
        &self,
        content: &str,
        ctx: &HookContext,
        out: &mut Vec<StyledLine>,
    ) -> bool {
        self.hooks.iter().any(|h| h.render_quote(content, ctx, out))
    }

    pub fn render_list(
        &self,
        marker: ListMarker<'_>,
        content: &str,
        ctx: &HookContext,
        out: &mut Vec<StyledLine>,
    ) -> bool {
        self.hooks
            .iter()
            .any(|h| h.render_list(marker, content, ctx, out))
    }

    pub fn render_hr(&self, ctx: &HookContext, out: &mut Vec<StyledLine>) -> bool {
        self.hooks.iter().any(|h| h.render_hr(ctx, out))
    }

    pub fn post_line(
        &self,
        line: &ClassifiedLine,
        ctx: &HookContext,
        out: &mut Vec<StyledLine>,
    ) -> bool {
        self.hooks.iter().any(|h| h.post_line(line, ctx, out))
    }
}
