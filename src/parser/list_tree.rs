//! Nested list tree builder.
//!
//! Takes the raw lines of one list run, as collected by the scanner, and
//! nests them by indentation. One pass, no lookahead: a stack holds the path
//! from the root to the last item, and each new line pops everything at the
//! same depth or deeper before it is pushed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{ListItem, ListKind};

static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s*").unwrap());
static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// Indentation depth of a raw line: leading whitespace characters / 2.
pub fn indent_level(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count() / 2
}

/// Kind of the outermost list, decided by the first line alone.
pub fn list_kind<S: AsRef<str>>(lines: &[S]) -> ListKind {
    match lines.first() {
        Some(first) if ORDERED_MARKER.is_match(first.as_ref().trim()) => ListKind::Ordered,
        _ => ListKind::Unordered,
    }
}

/// Build the item tree for a run of raw list lines.
///
/// Every line becomes exactly one item; an item is attached under the
/// nearest preceding item that is strictly shallower, or at the root when
/// there is none. Inconsistent indentation never drops a line.
pub fn build_tree<S: AsRef<str>>(lines: &[S]) -> Vec<ListItem> {
    let mut roots: Vec<ListItem> = Vec::new();
    let mut stack: Vec<ListItem> = Vec::new();

    for line in lines {
        let item = parse_item(line.as_ref());

        while stack
            .last()
            .is_some_and(|top| top.indent_level >= item.indent_level)
        {
            if let Some(done) = stack.pop() {
                attach(&mut stack, &mut roots, done);
            }
        }
        stack.push(item);
    }

    while let Some(done) = stack.pop() {
        attach(&mut stack, &mut roots, done);
    }

    log::trace!(
        "built list tree: {} lines, {} root items",
        lines.len(),
        roots.len()
    );
    roots
}

/// Turn one raw line into a childless item.
fn parse_item(line: &str) -> ListItem {
    let trimmed = line.trim();
    let kind = if ORDERED_MARKER.is_match(trimmed) {
        ListKind::Ordered
    } else {
        ListKind::Unordered
    };

    let without_bullet = BULLET_PREFIX.replace(trimmed, "");
    let content = NUMBER_PREFIX.replace(&without_bullet, "");

    ListItem::new(content, indent_level(line), kind)
}

fn attach(stack: &mut [ListItem], roots: &mut Vec<ListItem>, item: ListItem) {
    match stack.last_mut() {
        Some(parent) => parent.add_child(item),
        None => roots.push(item),
    }
}
