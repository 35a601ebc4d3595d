//! Rendering options and configuration.

use super::InlineOptions;

/// Default ceiling for quote-inside-quote recursion.
pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 16;

/// Options for rendering documents.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// How deep quotes may nest before their body is emitted as plain text
    pub max_quote_depth: usize,

    /// Syntax-highlight code sections
    pub highlight: bool,

    /// Inline formatting options
    pub inline: InlineOptions,

    /// Collect rendering statistics
    pub collect_stats: bool,

    /// Wrap HTML output in `<div class="markdown-renderer">`
    pub wrap_document: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quote recursion ceiling.
    pub fn with_max_quote_depth(mut self, depth: usize) -> Self {
        self.max_quote_depth = depth;
        self
    }

    /// Enable or disable syntax highlighting.
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Set inline formatting options.
    pub fn with_inline(mut self, inline: InlineOptions) -> Self {
        self.inline = inline;
        self
    }

    /// Enable or disable inline math spans.
    pub fn with_math(mut self, math: bool) -> Self {
        self.inline.math = math;
        self
    }

    /// Enable or disable escaping of raw HTML in text.
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.inline.escape_html = escape;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Enable or disable the outer wrapper element.
    pub fn with_wrapper(mut self, wrap: bool) -> Self {
        self.wrap_document = wrap;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_quote_depth: DEFAULT_MAX_QUOTE_DEPTH,
            highlight: true,
            inline: InlineOptions::default(),
            collect_stats: false,
            wrap_document: true,
        }
    }
}
