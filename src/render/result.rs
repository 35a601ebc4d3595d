//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::{count_items, ListItem, Section, Table};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: RenderStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: RenderStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
///
/// Sections inside quotes are counted too, so `text_count` and friends
/// can exceed the number of top-level sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of `title` and `subtitle` sections
    pub heading_count: u32,

    /// Number of `text` sections
    pub text_count: u32,

    /// Number of `code` sections
    pub code_count: u32,

    /// Total lines across all code sections
    pub code_line_count: u32,

    /// Number of `list` sections
    pub list_count: u32,

    /// Number of list items, nested items included
    pub list_item_count: u32,

    /// Number of quotes, nested quotes included
    pub quote_count: u32,

    /// Number of `table` sections
    pub table_count: u32,

    /// Number of dividers
    pub divider_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one rendered section and count the words it carries.
    ///
    /// Quote bodies are not descended into here; the renderer records their
    /// sub-sections as it renders them.
    pub fn record(&mut self, section: &Section) {
        match section {
            Section::Title { content } | Section::Subtitle { content, .. } => {
                self.heading_count += 1;
                self.count_text(content);
            }
            Section::Text { content } => {
                self.text_count += 1;
                self.count_text(content);
            }
            Section::Code { content, .. } => {
                self.code_count += 1;
                self.code_line_count += content.split('\n').count() as u32;
                self.count_text(content);
            }
            Section::List { items, .. } => {
                self.list_count += 1;
                self.list_item_count += count_items(items) as u32;
                self.count_items_text(items);
            }
            Section::Quote { .. } => self.quote_count += 1,
            Section::Table { content } => {
                self.table_count += 1;
                self.count_text(&Table::parse(content).plain_text().replace(" | ", " "));
            }
            Section::Divider { .. } => self.divider_count += 1,
        }
    }

    fn count_items_text(&mut self, items: &[ListItem]) {
        for item in items {
            self.count_text(&item.content);
            self.count_items_text(&item.children);
        }
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of sections recorded.
    pub fn section_count(&self) -> u32 {
        self.heading_count
            + self.text_count
            + self.code_count
            + self.list_count
            + self.quote_count
            + self.table_count
            + self.divider_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.heading_count += other.heading_count;
        self.text_count += other.text_count;
        self.code_count += other.code_count;
        self.code_line_count += other.code_line_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.quote_count += other.quote_count;
        self.table_count += other.table_count;
        self.divider_count += other.divider_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
