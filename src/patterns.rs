//! Pattern grammar engine.
//!
//! A [`PatternSet`] holds an ordered list of named patterns, each owning its
//! compiled regex, a per-capture-group token list, a group separator, and an
//! optional guard predicate that can veto a regex match. Matching walks the
//! list in registration order and the first pattern whose regex matches *and*
//! whose guard passes wins — a failed guard does not disqualify later
//! patterns from matching the same text.
//!
//! Rendering restyles matched text group by group. Two pattern families get
//! specialized treatment: bracketed IDs (nested-structure rendering with one
//! level of bracket-color escalation) and `topic – description` lines (smart
//! wrap, which exists to avoid the bottleneck effect of a long topic forcing
//! every continuation line into a narrow column).

use regex::Regex;

use crate::text::{visual_width, word_wrap, word_wrap_variable};
use crate::types::{StyledLine, StyledSegment};

/// A guard predicate over a match's captured groups (group 0 excluded).
pub type Guard = Box<dyn Fn(&[&str]) -> bool + Send + Sync>;

/// Indentation clamp used by smart wrap when the topic prefix is long.
const SMART_WRAP_CLAMP: usize = 4;

/// Words that mark a "topic" as ordinary prose when they start it.
const SENTENCE_STARTERS: &[&str] = &[
    "this", "that", "it", "these", "those", "there", "here", "i", "we", "you", "a", "an", "the",
];

/// Errors surfaced when registering user patterns.
///
/// Rendering itself is infallible; only registration can fail, and only on a
/// regex that does not compile.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid regex for pattern `{name}`: {source}")]
    InvalidRegex {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// One named pattern: regex, per-group tokens, separator, optional guard.
///
/// `Clone` is not derived: the guard is an opaque closure. Patterns are
/// identified by name; re-registering a name replaces the definition in
/// place without changing its position in the match order.
pub struct PatternDef {
    name: String,
    regex: Regex,
    group_tokens: Vec<String>,
    separator: String,
    guard: Option<Guard>,
}

/// The result of matching text against a [`PatternSet`].
///
/// `groups[0]` is the full match; `groups[1..]` are the captures. Produced
/// per call and consumed immediately by the renderer — never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub name: String,
    pub groups: Vec<String>,
}

/// Rendered pattern output plus the matched/unmatched signal.
#[derive(Debug, Clone)]
pub struct PatternRender {
    pub lines: Vec<StyledLine>,
    pub matched: bool,
}

// ---------------------------------------------------------------------------
// PatternSet
// ---------------------------------------------------------------------------

/// Ordered, named pattern registry.
///
/// Read-mostly: one set can be shared immutably across any number of
/// renderers (guards are `Send + Sync`).
pub struct PatternSet {
    patterns: Vec<PatternDef>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl PatternSet {
    /// An empty registry with no patterns at all.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// The built-in patterns, in their canonical match order. User patterns
    /// registered afterwards append after these.
    pub fn with_builtins() -> Self {
        let mut set = Self::empty();
        set.register(
            "bracketed_id",
            r"^\[(\d+): ([a-z_]+) (.+?)\]?$",
            &["pattern.number", "pattern.key", "pattern.desc"],
            " ",
            None,
        )
        .expect("built-in pattern regex");
        set.register(
            "bracketed_id_simple",
            r"^\[(\d+): ?(.*)\]$",
            &["heading.1", "pattern.desc"],
            ": ",
            None,
        )
        .expect("built-in pattern regex");
        // The separator is a spaced dash or a (possibly unspaced) en/em
        // dash; a bare hyphen inside a word (`ABC-123`) is not a separator.
        set.register(
            "topic_desc",
            r"^([A-Z][^–—-]{0,38}?)\s*(?:[–—]|\s-)\s*(.+)$",
            &["pattern.topic", "pattern.desc"],
            " – ",
            Some(Box::new(topic_guard)),
        )
        .expect("built-in pattern regex");
        set.register(
            "key_value",
            r"^([A-Za-z_]\w*): (.+)$",
            &["pattern.key", "pattern.desc"],
            ": ",
            None,
        )
        .expect("built-in pattern regex");
        set.register(
            "timestamp",
            r"^(\d{1,2}:\d{2}(?::\d{2})?) (.+)$",
            &["pattern.time", "pattern.desc"],
            " ",
            None,
        )
        .expect("built-in pattern regex");
        set
    }

    /// Register a pattern, or replace an existing one of the same name in
    /// place (its match-order position is kept).
    pub fn register(
        &mut self,
        name: &str,
        pattern: &str,
        group_tokens: &[&str],
        separator: &str,
        guard: Option<Guard>,
    ) -> Result<(), PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError::InvalidRegex {
            name: name.to_string(),
            source,
        })?;
        let def = PatternDef {
            name: name.to_string(),
            regex,
            group_tokens: group_tokens.iter().map(|t| t.to_string()).collect(),
            separator: separator.to_string(),
            guard,
        };
        if let Some(existing) = self.patterns.iter_mut().find(|p| p.name == name) {
            *existing = def;
        } else {
            self.patterns.push(def);
        }
        Ok(())
    }

    /// Remove a pattern by name. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.patterns.len();
        self.patterns.retain(|p| p.name != name);
        self.patterns.len() != before
    }

    /// Pattern names in match order.
    pub fn names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Match `text` against the registry: first pattern (in order) whose
    /// regex matches and whose guard passes. Deterministic and pure for a
    /// fixed registry.
    pub fn match_text(&self, text: &str) -> Option<PatternMatch> {
        for def in &self.patterns {
            let Some(caps) = def.regex.captures(text) else {
                continue;
            };
            let groups: Vec<String> = (0..caps.len())
                .map(|i| caps.get(i).map(|m| m.as_str()).unwrap_or("").to_string())
                .collect();
            if let Some(guard) = &def.guard {
                let capture_refs: Vec<&str> = groups[1..].iter().map(String::as_str).collect();
                if !guard(&capture_refs) {
                    log::trace!("pattern `{}` matched but guard vetoed", def.name);
                    continue;
                }
            }
            return Some(PatternMatch {
                name: def.name.clone(),
                groups,
            });
        }
        None
    }

    /// Render `text` through the pattern grammar.
    ///
    /// `width` is the column budget of the content region; `continuation_pad`
    /// is the extra indent continuation lines carry so they align under the
    /// region when the caller prefixes only the first line (e.g. with a list
    /// marker). Unmatched text renders as `fallback_token`, word-wrapped.
    pub fn render(
        &self,
        text: &str,
        fallback_token: &str,
        width: usize,
        continuation_pad: usize,
    ) -> PatternRender {
        let Some(m) = self.match_text(text) else {
            let lines = word_wrap(text, width.max(1), "")
                .into_iter()
                .map(|chunk| StyledLine::new(vec![StyledSegment::token(chunk, fallback_token)]))
                .collect();
            return PatternRender {
                lines,
                matched: false,
            };
        };

        let lines = match m.name.as_str() {
            "topic_desc" => render_topic_desc(&m, width, continuation_pad),
            "bracketed_id_simple" => vec![render_bracket_simple(&m)],
            "bracketed_id" => vec![render_bracket(&m, width)],
            _ => {
                let def = self
                    .patterns
                    .iter()
                    .find(|p| p.name == m.name)
                    .expect("matched pattern is registered");
                render_generic(def, &m, width, continuation_pad)
            }
        };
        PatternRender {
            lines,
            matched: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Anti-prose guard for `topic_desc`: a real topic is a short title, not the
/// front of a sentence that happens to contain a dash.
fn topic_guard(groups: &[&str]) -> bool {
    let topic = groups.first().copied().unwrap_or("").trim();
    if topic.is_empty() {
        return false;
    }
    let lower = topic.to_ascii_lowercase();
    let starts_like_prose = SENTENCE_STARTERS.iter().any(|w| {
        lower.starts_with(w)
            && lower[w.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_ascii_alphanumeric())
    });
    if starts_like_prose {
        return false;
    }
    // More than 4 interior spaces (> 5 words) reads as prose.
    if topic.split_whitespace().count() > 5 {
        return false;
    }
    true
}

// ---------------------------------------------------------------------------
// Specialized renderers
// ---------------------------------------------------------------------------

/// Smart wrap for `topic – description`.
///
/// Continuation lines align under the description only while the topic
/// prefix stays short (under a quarter of the width); a long prefix clamps
/// the indent to 4 columns so the description is not squeezed into a sliver.
fn render_topic_desc(m: &PatternMatch, width: usize, continuation_pad: usize) -> Vec<StyledLine> {
    let topic = group(m, 1).trim_end();
    let desc = group(m, 2);
    let separator = " – ";

    let prefix_len = topic.chars().count() + separator.chars().count();
    let indent = if prefix_len < width / 4 {
        prefix_len
    } else {
        SMART_WRAP_CLAMP
    };
    let first_room = width.saturating_sub(prefix_len).max(1);

    let mut first = StyledLine::new(vec![
        StyledSegment::token(topic, "pattern.topic"),
        StyledSegment::plain(separator),
    ]);

    if visual_width(desc) <= first_room {
        first.push(StyledSegment::token(desc, "pattern.desc"));
        return vec![first];
    }

    let cont_room = width.saturating_sub(indent).max(1);
    let chunks = word_wrap_variable(desc, first_room, cont_room);
    let mut lines = Vec::with_capacity(chunks.len());
    let mut iter = chunks.into_iter();
    if let Some(head) = iter.next() {
        first.push(StyledSegment::token(head, "pattern.desc"));
    }
    lines.push(first);
    for chunk in iter {
        lines.push(StyledLine::new(vec![
            StyledSegment::plain(" ".repeat(continuation_pad + indent)),
            StyledSegment::token(chunk, "pattern.desc"),
        ]));
    }
    lines
}

/// `[id: content]` — flat bracketed ID.
fn render_bracket_simple(m: &PatternMatch) -> StyledLine {
    let id = group(m, 1);
    let content = group(m, 2);
    let mut line = StyledLine::new(vec![
        StyledSegment::token("[", "heading.1"),
        StyledSegment::token(id, "heading.1"),
        StyledSegment::plain(": "),
    ]);
    if !content.is_empty() {
        line.push(StyledSegment::token(content, "pattern.desc"));
    }
    line.push(StyledSegment::token("]", "heading.1"));
    line
}

/// `[id: action rest…]` — bracketed ID with an action keyword and free-form
/// rest, which may itself open a nested bracket (one level deep; the nested
/// bracket escalates from `heading.1` to `heading.2`).
fn render_bracket(m: &PatternMatch, width: usize) -> StyledLine {
    let id = group(m, 1);
    let action = group(m, 2);
    let rest = group(m, 3);

    let mut line = StyledLine::new(vec![
        StyledSegment::token("[", "heading.1"),
        StyledSegment::token(id, "heading.1"),
        StyledSegment::plain(": "),
        StyledSegment::token(action, "pattern.key"),
        StyledSegment::plain(" "),
    ]);
    // Reserve the closing " ]".
    let avail = width.saturating_sub(line.width() + 2);

    if rest.starts_with('[') {
        render_nested_bracket(&mut line, rest, avail);
    } else {
        line.push(StyledSegment::token(
            truncate_ellipsis(rest, avail),
            "pattern.desc",
        ));
    }

    line.push(StyledSegment::token(" ]", "heading.1"));
    line
}

fn nested_bracket_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[(\d+): ([a-z_]+) (.+?)\]?$").unwrap())
}

/// One nested level of `[id: action rest]`, with escalated bracket color.
fn render_nested_bracket(line: &mut StyledLine, rest: &str, avail: usize) {
    let Some(caps) = nested_bracket_regex().captures(rest) else {
        line.push(StyledSegment::token(
            truncate_ellipsis(rest, avail),
            "pattern.desc",
        ));
        return;
    };
    let id = caps.get(1).map_or("", |g| g.as_str());
    let action = caps.get(2).map_or("", |g| g.as_str());
    let inner = caps.get(3).map_or("", |g| g.as_str());

    line.push(StyledSegment::token("[", "heading.2"));
    line.push(StyledSegment::token(id, "heading.2"));
    line.push(StyledSegment::plain(": "));
    line.push(StyledSegment::token(action, "pattern.key"));
    line.push(StyledSegment::plain(" "));

    // Space consumed by the nested frame so far, plus its "]" closer.
    let frame = 1 + id.chars().count() + 2 + action.chars().count() + 1 + 1;
    let inner_avail = avail.saturating_sub(frame);
    line.push(StyledSegment::token(
        truncate_ellipsis(inner, inner_avail),
        "pattern.desc",
    ));
    line.push(StyledSegment::token("]", "heading.2"));
}

/// Generic group-by-group rendering for every other pattern: each captured
/// group in its mapped token, the pattern's separator between groups, and
/// the last group word-wrapped into the remaining width with continuation
/// lines aligned under where it started.
fn render_generic(
    def: &PatternDef,
    m: &PatternMatch,
    width: usize,
    continuation_pad: usize,
) -> Vec<StyledLine> {
    let group_count = m.groups.len() - 1;
    let mut first = StyledLine::default();
    let mut consumed = 0;

    for i in 1..group_count {
        let text = m.groups[i].as_str();
        first.push(StyledSegment::token(text, group_token(def, i)));
        consumed += text.chars().count();
        first.push(StyledSegment::plain(def.separator.clone()));
        consumed += def.separator.chars().count();
    }

    // A capture-free pattern styles its full match as the single group.
    let (last, last_token) = if group_count == 0 {
        (m.groups[0].as_str(), group_token(def, 1))
    } else {
        (m.groups[group_count].as_str(), group_token(def, group_count))
    };
    let room = width.saturating_sub(consumed).max(1);
    let chunks = word_wrap_variable(last, room, room);

    let mut lines = Vec::with_capacity(chunks.len());
    let mut iter = chunks.into_iter();
    if let Some(head) = iter.next() {
        first.push(StyledSegment::token(head, last_token));
    }
    lines.push(first);
    for chunk in iter {
        lines.push(StyledLine::new(vec![
            StyledSegment::plain(" ".repeat(continuation_pad + consumed)),
            StyledSegment::token(chunk, last_token),
        ]));
    }
    lines
}

fn group_token<'a>(def: &'a PatternDef, group: usize) -> &'a str {
    def.group_tokens
        .get(group - 1)
        .map(String::as_str)
        .unwrap_or("pattern.desc")
}

fn group<'a>(m: &'a PatternMatch, index: usize) -> &'a str {
    m.groups.get(index).map(String::as_str).unwrap_or("")
}

/// Truncate to `avail` columns, appending an ellipsis when something was cut
/// — unless there is no room even for that, in which case emit what fits.
fn truncate_ellipsis(text: &str, avail: usize) -> String {
    let len = text.chars().count();
    if len <= avail {
        return text.to_string();
    }
    match avail {
        0 => String::new(),
        1 => text.chars().take(1).collect(),
        _ => {
            let mut out: String = text.chars().take(avail - 1).collect();
            out.push('…');
            out
        }
    }
}
