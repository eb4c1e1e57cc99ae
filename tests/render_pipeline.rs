//! End-to-end rendering scenarios through the public API.

use inkdown::{
    ClassifiedLine, ClassifierState, PatternSet, RenderOptions, Renderer, ansi,
};

fn plain_renderer() -> Renderer {
    Renderer::new(RenderOptions {
        no_color: true,
        ..Default::default()
    })
}

#[test]
fn heading_renders_in_heading_color() {
    let mut renderer = Renderer::new(RenderOptions::default());
    let out = renderer.render(["# Title"]);
    assert_eq!(out.len(), 1);
    // heading.1 resolves to the default theme's bright cyan.
    assert!(out[0].contains(&ansi::fg([137, 220, 235])));
    assert!(out[0].contains("Title"));
}

#[test]
fn fence_round_trip_resets_state() {
    let mut state = ClassifierState::new();
    let classified: Vec<ClassifiedLine> = ["```bash", "echo hi", "```"]
        .iter()
        .map(|l| state.classify(l))
        .collect();
    assert_eq!(
        classified,
        vec![
            ClassifiedLine::CodeFenceStart {
                lang: "bash".into()
            },
            ClassifiedLine::CodeLine {
                content: "echo hi".into()
            },
            ClassifiedLine::CodeFenceEnd,
        ]
    );
    assert!(!state.in_code_fence);
}

#[test]
fn table_flush_is_bordered_and_sized() {
    let mut renderer = plain_renderer();
    let out = renderer.render(["| a | b |", "|---|---|", "| 1 | 22 |"]);
    assert_eq!(
        out,
        vec![
            "┌───┬────┐",
            "│ a │ b  │",
            "├───┼────┤",
            "│ 1 │ 22 │",
            "└───┴────┘",
        ]
    );
}

#[test]
fn bracketed_id_captures() {
    let set = PatternSet::with_builtins();
    let m = set.match_text("[1765923743: update content here]").unwrap();
    assert_eq!(m.name, "bracketed_id");
    assert_eq!(
        &m.groups[1..],
        &["1765923743", "update", "content here"]
    );
}

#[test]
fn prose_with_dash_is_not_a_topic() {
    let set = PatternSet::with_builtins();
    assert!(
        set.match_text("This is a long explanation – not a title")
            .is_none()
    );

    // End to end it falls through to plain wrapped text.
    let mut renderer = plain_renderer();
    let out = renderer.render(["This is a long explanation – not a title"]);
    assert_eq!(out, vec!["This is a long explanation – not a title"]);
}

#[test]
fn real_topic_is_restyled() {
    let mut renderer = plain_renderer();
    let out = renderer.render(["Andre Kronert – Raw repetition"]);
    assert_eq!(out, vec!["Andre Kronert – Raw repetition"]);
}

#[test]
fn mixed_document_smoke_test() {
    let doc = [
        "# Notes",
        "",
        "Some opening prose that stays plain.",
        "",
        "## Schedule",
        "| when | what |",
        "|------|------|",
        "| 9:00 | standup |",
        "| 9:30 | review |",
        "",
        "- first point",
        "- second point with `code`",
        "1. Topic – short description",
        "",
        "> a quote",
        "---",
        "```rust",
        "fn main() {}",
        "```",
    ];
    let mut renderer = plain_renderer();
    let out = renderer.render(doc);

    let text = out.join("\n");
    assert!(text.contains("# Notes"));
    assert!(text.contains("## Schedule"));
    // The table flushed when the blank line after it arrived.
    assert!(text.contains("┌"));
    assert!(text.contains("│ 9:00 │ standup │"));
    assert!(text.contains("• first point"));
    assert!(text.contains("1. Topic – short description"));
    assert!(text.contains("│ a quote"));
    assert!(text.contains("```rust"));
    assert!(text.contains("fn main() {}"));
    // The rule spans the default width.
    assert!(out.iter().any(|l| l.starts_with("────")));
}

#[test]
fn table_interrupted_by_eof_still_flushes() {
    let mut renderer = plain_renderer();
    assert!(renderer.render_line("| h1 | h2 |").is_empty());
    assert!(renderer.render_line("| a | b |").is_empty());
    let out = renderer.finish();
    assert_eq!(out.len(), 5);
}

#[test]
fn no_color_output_is_escape_free() {
    let mut renderer = plain_renderer();
    let out = renderer.render([
        "# H",
        "**bold** and *italic* and `code`",
        "key: value",
    ]);
    for line in &out {
        assert!(!line.contains('\x1b'), "{line:?}");
    }
}

#[test]
fn patterns_can_be_extended_at_runtime() {
    let mut renderer = plain_renderer();
    renderer
        .patterns_mut()
        .register(
            "ticket",
            r"^([A-Z]+-\d+) (.+)$",
            &["pattern.key", "pattern.desc"],
            " ",
            None,
        )
        .unwrap();
    let out = renderer.render(["ABC-123 fix the frobnicator"]);
    assert_eq!(out, vec!["ABC-123 fix the frobnicator"]);
}
