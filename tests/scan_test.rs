//! Integration tests for the block scanner and list tree builder.

use pretty_assertions::assert_eq;

use notedown::parser::{build_tree, scan};
use notedown::{DividerKind, ListKind, Section, SectionKind};

fn kinds(sections: &[Section]) -> Vec<SectionKind> {
    sections.iter().map(Section::kind).collect()
}

#[test]
fn test_rescan_is_identical() {
    let text = "# T\n```js\nlet a = 1;\n```\n- a\n  - b\n| x | y |\n> q\n***\nend";
    assert_eq!(scan(text), scan(text));
}

#[test]
fn test_fence_balance() {
    let sections = scan("before\n```python\nprint(1)\n\nprint(2)\n```\nafter");
    let code: Vec<_> = sections
        .iter()
        .filter(|s| s.kind() == SectionKind::Code)
        .collect();
    assert_eq!(code.len(), 1);
    assert_eq!(code[0], &Section::code("print(1)\n\nprint(2)", "python"));
    assert!(!code[0].content().ends_with('\n'));
}

#[test]
fn test_heading_levels() {
    let sections = scan("# A\n## B\n### C");
    assert_eq!(
        kinds(&sections),
        vec![SectionKind::Title, SectionKind::Subtitle, SectionKind::Subtitle]
    );
    let levels: Vec<_> = sections.iter().filter_map(Section::level).collect();
    assert_eq!(levels, vec![1, 2, 3]);
    let contents: Vec<_> = sections.iter().map(Section::content).collect();
    assert_eq!(contents, vec!["A", "B", "C"]);
}

#[test]
fn test_nested_list_shape() {
    let items = build_tree(&["- a", "  - b", "  - c", "- d"]);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].content, "a");
    assert_eq!(items[1].content, "d");
    assert!(items[1].children.is_empty());

    let children: Vec<_> = items[0]
        .children
        .iter()
        .map(|c| (c.content.as_str(), c.indent_level))
        .collect();
    assert_eq!(children, vec![("b", 1), ("c", 1)]);
}

#[test]
fn test_ordered_vs_unordered() {
    match &scan("1. x\n2. y")[..] {
        [Section::List { list_kind, items, .. }] => {
            assert_eq!(*list_kind, ListKind::Ordered);
            assert_eq!(items.len(), 2);
        }
        other => panic!("expected one list, got {:?}", other),
    }
    match &scan("- x\n- y")[..] {
        [Section::List { list_kind, .. }] => assert_eq!(*list_kind, ListKind::Unordered),
        other => panic!("expected one list, got {:?}", other),
    }
}

#[test]
fn test_divider_discrimination() {
    let cases = [
        ("---", DividerKind::Dash),
        ("***", DividerKind::Star),
        ("===", DividerKind::Equal),
        ("___", DividerKind::Underscore),
        ("  -----  ", DividerKind::Dash),
    ];
    for (line, kind) in cases {
        assert_eq!(scan(line), vec![Section::divider(kind)], "line {:?}", line);
    }
    assert_eq!(kinds(&scan("--")), vec![SectionKind::Text]);
    assert_eq!(kinds(&scan("-*-")), vec![SectionKind::Text]);
}

#[test]
fn test_quote_run_greediness() {
    assert_eq!(
        scan("> line1\n> line2\ntext"),
        vec![Section::quote("line1\nline2"), Section::text("text")]
    );
}

#[test]
fn test_quote_run_ignores_blank_line_semantics() {
    // A blank line ends the run only because it lacks the `>` prefix.
    assert_eq!(
        scan("> a\n>\n> b\n\n> c"),
        vec![Section::quote("a\n\nb"), Section::quote("c")]
    );
}

#[test]
fn test_table_passthrough() {
    let table = "| h1 | h2 |\n|----|----|\n| a  | b  |";
    assert_eq!(scan(table), vec![Section::table(table)]);
}

#[test]
fn test_pipe_in_prose_is_a_table() {
    assert_eq!(kinds(&scan("use a | b here")), vec![SectionKind::Table]);
    assert_eq!(kinds(&scan("# a | b")), vec![SectionKind::Table]);
}

#[test]
fn test_code_is_not_reinterpreted() {
    let sections = scan("```\n# not a heading\n- not a list\n| not | table |\n```");
    assert_eq!(
        sections,
        vec![Section::code(
            "# not a heading\n- not a list\n| not | table |",
            "text"
        )]
    );
}

#[test]
fn test_blank_line_keeps_list_open() {
    match &scan("- a\n\n- b")[..] {
        [Section::List { items, content, .. }] => {
            assert_eq!(items.len(), 2);
            assert_eq!(content, "- a\n- b");
        }
        other => panic!("expected one list, got {:?}", other),
    }
}

#[test]
fn test_blank_line_ends_table() {
    assert_eq!(
        kinds(&scan("| a |\n\n| b |")),
        vec![SectionKind::Table, SectionKind::Table]
    );
}

#[test]
fn test_table_flush_leaves_list_pending() {
    // The table is emitted as soon as a non-table line arrives, while the
    // list stays open until something flushes it.
    assert_eq!(
        kinds(&scan("- a\n| x |\nplain")),
        vec![SectionKind::Table, SectionKind::List, SectionKind::Text]
    );
}

#[test]
fn test_list_continuation_lines() {
    match &scan("- first\n  still first\n- second")[..] {
        [Section::List { items, content, .. }] => {
            assert_eq!(content, "- first\n  still first\n- second");
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].content, "first\n  still first");
        }
        other => panic!("expected one list, got {:?}", other),
    }
}

#[test]
fn test_indented_text_without_list_is_text() {
    assert_eq!(scan("   indented"), vec![Section::text("   indented")]);
}

#[test]
fn test_unterminated_fence() {
    assert_eq!(
        scan("```rust\nfn main() {}"),
        vec![Section::code("fn main() {}", "rust")]
    );
    assert!(scan("```rust\n   \n").is_empty());
}

#[test]
fn test_heading_trailing_zero_width_space() {
    assert_eq!(scan("## Title \u{200B}"), vec![Section::heading("Title", 2)]);
    assert_eq!(scan("#NoSpace"), vec![Section::heading("NoSpace", 1)]);
}

#[test]
fn test_never_fails_on_odd_input() {
    let inputs = ["", "\n\n\n", "```", ">", "#", "|", "1.", "- ", "\u{200B}", "\r\n"];
    for input in inputs {
        let _ = scan(input);
    }
    assert_eq!(scan("#"), vec![Section::heading("", 1)]);
    assert_eq!(scan(">"), vec![Section::quote("")]);
}

#[test]
fn test_list_children_have_deeper_indent() {
    fn check(items: &[notedown::ListItem]) {
        for item in items {
            for child in &item.children {
                assert!(child.indent_level > item.indent_level);
            }
            check(&item.children);
        }
    }
    let items = build_tree(&["- a", "    - b", "  - c", "      - d", "- e", "  1. f"]);
    check(&items);
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].children[0].kind, ListKind::Ordered);
}
