//! Document-level types.

use super::{count_items, Section, SectionKind};
use serde::{Deserialize, Serialize};

/// A scanned note: the ordered sections of one parse.
///
/// Documents have no identity across parses; re-scan the text whenever it
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// Sections in source order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from already scanned sections.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Get the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the document has any sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over the sections.
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Count top-level sections of one kind.
    pub fn count(&self, kind: SectionKind) -> usize {
        self.sections.iter().filter(|s| s.kind() == kind).count()
    }

    /// Count list items across all lists, nested items included.
    pub fn list_item_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| match s {
                Section::List { items, .. } => count_items(items),
                _ => 0,
            })
            .sum()
    }

    /// Get the payload text of every section, blank-line separated.
    ///
    /// List sections contribute their item text, one item per line; dividers
    /// contribute nothing.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .filter_map(|section| match section {
                Section::Divider { .. } => None,
                Section::List { items, .. } => {
                    let mut lines = Vec::new();
                    collect_item_text(items, &mut lines);
                    Some(lines.join("\n"))
                }
                other => Some(other.content().to_string()),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Approximate word count (whitespace-separated tokens of the plain text).
    pub fn word_count(&self) -> usize {
        self.plain_text().split_whitespace().count()
    }

    /// Build the heading outline of the document.
    pub fn outline(&self) -> Outline {
        let headings = self
            .sections
            .iter()
            .filter_map(|s| s.level().map(|level| (s.content(), level)));
        Outline::from_headings(headings)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

fn collect_item_text(items: &[super::ListItem], out: &mut Vec<String>) {
    for item in items {
        out.push(item.content.clone());
        collect_item_text(&item.children, out);
    }
}

/// Heading outline (table of contents).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Top-level outline items
    pub items: Vec<OutlineItem>,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Nest `(text, level)` headings under the closest shallower heading.
    pub fn from_headings<'a>(headings: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        let mut outline = Outline::new();
        let mut stack: Vec<OutlineItem> = Vec::new();

        for (title, level) in headings {
            while stack.last().is_some_and(|top| top.level >= level) {
                if let Some(done) = stack.pop() {
                    attach(&mut stack, &mut outline.items, done);
                }
            }
            stack.push(OutlineItem::new(title, level));
        }
        while let Some(done) = stack.pop() {
            attach(&mut stack, &mut outline.items, done);
        }

        outline
    }

    /// Add an item to the outline.
    pub fn add_item(&mut self, item: OutlineItem) {
        self.items.push(item);
    }

    /// Check if the outline is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the total number of items (including nested).
    pub fn total_items(&self) -> usize {
        fn count_items(items: &[OutlineItem]) -> usize {
            items
                .iter()
                .map(|item| 1 + count_items(&item.children))
                .sum()
        }
        count_items(&self.items)
    }
}

fn attach(stack: &mut [OutlineItem], roots: &mut Vec<OutlineItem>, item: OutlineItem) {
    match stack.last_mut() {
        Some(parent) => parent.add_child(item),
        None => roots.push(item),
    }
}

/// A single outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Heading text
    pub title: String,

    /// Heading level (1 = title)
    pub level: usize,

    /// Child items
    pub children: Vec<OutlineItem>,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(title: impl Into<String>, level: usize) -> Self {
        Self {
            title: title.into(),
            level,
            children: Vec::new(),
        }
    }

    /// Add a child item.
    pub fn add_child(&mut self, child: OutlineItem) {
        self.children.push(child);
    }
}
