//! inkdown — a terminal markdown renderer.
//!
//! Converts a stream of raw text lines into colorized, width-constrained
//! terminal output. Beyond a pragmatic markdown subset (headings, fenced
//! code, rules, tables, blockquotes, lists, inline emphasis), a pattern
//! grammar recognizes and restyles structured sub-line content such as
//! `topic – description`, `key: value`, and bracketed IDs.
//!
//! # Module Structure
//!
//! ## Classification
//! - [`classify`] — the stateful single-line lexer. Fence state persists
//!   across calls, so lines must be fed in order.
//! - [`types`] — [`types::ClassifiedLine`] and the styled-output types.
//!
//! ## Rendering
//! - [`pipeline`] — [`pipeline::Renderer`]: the per-line dispatcher and its
//!   [`pipeline::RenderState`] (fence flag, table buffer).
//! - [`patterns`] — the pattern grammar engine: ordered registry, guard
//!   predicates, smart wrap, nested-bracket rendering.
//! - [`table`] — table accumulation and bordered rendering.
//! - [`text`] — visual-width measurement, inline emphasis, word wrapping.
//!
//! ## Integration seams
//! - [`theme`] — the [`theme::TokenStyler`] color-provider trait and the
//!   shipped default.
//! - [`hooks`] — [`hooks::RenderHook`] extension points for intercepting
//!   line rendering.
//! - [`ansi`] — escape emission from styled lines.
//! - [`config`] / [`cli`] — file configuration and argument parsing.
//!
//! # Example
//!
//! ```
//! use inkdown::{RenderOptions, Renderer};
//!
//! let mut renderer = Renderer::new(RenderOptions {
//!     no_color: true,
//!     ..Default::default()
//! });
//! let out = renderer.render(["# Hello", "", "a *styled* line"]);
//! assert_eq!(out[0], "# Hello");
//! ```

pub mod ansi;
pub mod classify;
pub mod cli;
pub mod config;
pub mod hooks;
pub mod patterns;
pub mod pipeline;
pub mod table;
pub mod text;
pub mod theme;
pub mod types;

pub use classify::ClassifierState;
pub use hooks::{HookContext, HookSet, ListMarker, RenderHook};
pub use patterns::{PatternError, PatternMatch, PatternRender, PatternSet};
pub use pipeline::{RenderOptions, RenderState, Renderer};
pub use table::{Alignment, TableBuffer, TableRenderer, TableStyle};
pub use theme::{Color, DefaultStyler, ThemeColors, TokenStyler};
pub use types::{ClassifiedLine, StyledLine, StyledSegment};
