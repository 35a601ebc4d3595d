//! List item tree.

use super::ListKind;
use serde::{Deserialize, Serialize};

/// A node in a nested list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    /// Item text with its bullet or number marker removed
    pub content: String,

    /// Leading whitespace of the source line divided by two
    pub indent_level: usize,

    /// Whether this item was written with a number marker
    pub kind: ListKind,

    /// Nested items, in source order
    #[serde(default)]
    pub children: Vec<ListItem>,
}

impl ListItem {
    /// Create a leaf item.
    pub fn new(content: impl Into<String>, indent_level: usize, kind: ListKind) -> Self {
        Self {
            content: content.into(),
            indent_level,
            kind,
            children: Vec::new(),
        }
    }

    /// Add a child item.
    pub fn add_child(&mut self, child: ListItem) {
        self.children.push(child);
    }

    /// Check if this item has nested items.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Count this item and all of its descendants.
    pub fn total_items(&self) -> usize {
        1 + count_items(&self.children)
    }
}

/// Count every item in a forest, nested ones included.
pub fn count_items(items: &[ListItem]) -> usize {
    items.iter().map(ListItem::total_items).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_items() {
        let mut root = ListItem::new("a", 0, ListKind::Unordered);
        let mut child = ListItem::new("b", 1, ListKind::Ordered);
        child.add_child(ListItem::new("c", 2, ListKind::Unordered));
        root.add_child(child);

        assert!(root.has_children());
        assert_eq!(root.total_items(), 3);
        assert_eq!(count_items(&[root, ListItem::new("d", 0, ListKind::Unordered)]), 4);
    }

    #[test]
    fn test_deserialize_without_children() {
        let item: ListItem =
            serde_json::from_str(r#"{"content":"x","indentLevel":0,"kind":"unordered"}"#).unwrap();
        assert!(item.children.is_empty());
    }
}
