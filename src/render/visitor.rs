//! Visitor pattern for customizing section rendering.
//!
//! A visitor sees every section before the renderer does, including the
//! sections found inside quotes, and may let it render normally, drop it, or
//! supply its own output.
//!
//! # Example
//!
//! ```
//! use notedown::render::visitor::{SectionVisitor, VisitorAction};
//!
//! struct NoCodeLanguages;
//!
//! impl SectionVisitor for NoCodeLanguages {
//!     fn visit_code(&mut self, code: &str, _language: &str) -> VisitorAction {
//!         VisitorAction::Replace(format!("<pre>{}</pre>\n", code.len()))
//!     }
//! }
//! ```

use crate::model::{DividerKind, ListItem, ListKind, Section, Table};

use super::{InlineFormatter, InlineOptions};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the section with custom output.
    Replace(String),

    /// Skip this section entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the section should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting sections during rendering.
///
/// Implement the per-kind methods you care about; all of them return
/// `VisitorAction::Continue` by default. [`SectionVisitor::visit`] is the
/// entry point the renderer calls and dispatches on the section kind.
pub trait SectionVisitor: Send + Sync {
    /// Called before rendering any section.
    ///
    /// `depth` is 0 for top-level sections and grows by one for each quote
    /// the section sits inside.
    fn visit(&mut self, section: &Section, depth: usize) -> VisitorAction {
        match section {
            Section::Title { content } => self.visit_heading(content, 1),
            Section::Subtitle { content, level } => self.visit_heading(content, *level),
            Section::Text { content } => self.visit_text(content),
            Section::Code { content, language } => self.visit_code(content, language),
            Section::List {
                list_kind, items, ..
            } => self.visit_list(*list_kind, items),
            Section::Quote { content } => self.visit_quote(content, depth),
            Section::Table { content } => self.visit_table(&Table::parse(content)),
            Section::Divider { divider_kind } => self.visit_divider(*divider_kind),
        }
    }

    /// Called before rendering a title or subtitle.
    fn visit_heading(&mut self, text: &str, level: usize) -> VisitorAction {
        let _ = (text, level);
        VisitorAction::Continue
    }

    /// Called before rendering a text line.
    fn visit_text(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before rendering a code block.
    fn visit_code(&mut self, code: &str, language: &str) -> VisitorAction {
        let _ = (code, language);
        VisitorAction::Continue
    }

    /// Called before rendering a list.
    fn visit_list(&mut self, kind: ListKind, items: &[ListItem]) -> VisitorAction {
        let _ = (kind, items);
        VisitorAction::Continue
    }

    /// Called before rendering a quote, with the depth of the quote itself.
    fn visit_quote(&mut self, body: &str, depth: usize) -> VisitorAction {
        let _ = (body, depth);
        VisitorAction::Continue
    }

    /// Called before rendering a table.
    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called before rendering a divider.
    fn visit_divider(&mut self, kind: DividerKind) -> VisitorAction {
        let _ = kind;
        VisitorAction::Continue
    }

    /// Called when the renderer descends into a quote body.
    fn on_quote_enter(&mut self, depth: usize) {
        let _ = depth;
    }

    /// Called when the renderer leaves a quote body.
    fn on_quote_exit(&mut self, depth: usize) {
        let _ = depth;
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl SectionVisitor for DefaultVisitor {}

/// Visitor that drops all code blocks.
#[derive(Debug, Clone, Default)]
pub struct SkipCodeVisitor;

impl SectionVisitor for SkipCodeVisitor {
    fn visit_code(&mut self, _code: &str, _language: &str) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that renders tables as preformatted pipe-separated text.
#[derive(Debug, Clone, Default)]
pub struct PlainTableVisitor;

impl SectionVisitor for PlainTableVisitor {
    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let text = html_escape::encode_text(&table.plain_text()).into_owned();
        VisitorAction::Replace(format!("<pre class=\"table-text\">{}</pre>\n", text))
    }
}

/// Visitor that limits heading depth.
///
/// Demoted headings are formatted by the visitor itself, so give it the same
/// [`InlineOptions`] the renderer uses.
#[derive(Debug, Clone)]
pub struct MaxHeadingDepthVisitor {
    max_level: usize,
    inline: InlineFormatter,
}

impl MaxHeadingDepthVisitor {
    /// Create a visitor that limits headings to the specified max level.
    pub fn new(max_level: usize) -> Self {
        Self {
            max_level: max_level.clamp(1, 6),
            inline: InlineFormatter::default(),
        }
    }

    /// Set the inline options used for demoted headings.
    pub fn with_inline(mut self, options: InlineOptions) -> Self {
        self.inline = InlineFormatter::new(options);
        self
    }
}

impl SectionVisitor for MaxHeadingDepthVisitor {
    fn visit_heading(&mut self, text: &str, level: usize) -> VisitorAction {
        if level <= self.max_level {
            return VisitorAction::Continue;
        }
        VisitorAction::Replace(format!(
            "<h{level}>{}</h{level}>\n",
            self.inline.format(text),
            level = self.max_level
        ))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn SectionVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: SectionVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of visitors in the chain.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionVisitor for CompositeVisitor {
    fn visit(&mut self, section: &Section, depth: usize) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit(section, depth);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_quote_enter(&mut self, depth: usize) {
        for visitor in &mut self.visitors {
            visitor.on_quote_enter(depth);
        }
    }

    fn on_quote_exit(&mut self, depth: usize) {
        for visitor in &mut self.visitors {
            visitor.on_quote_exit(depth);
        }
    }
}
