//! Inline formatting: emphasis, code spans and links to HTML.
//!
//! The rewrite is a fixed sequence of regex substitutions over the whole
//! string: bold, italic, code span, (optionally) math, link. Later passes
//! see the output of earlier ones, and nothing is re-scanned for nesting,
//! so the order decides the output for overlapping markup. Keep it.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]*)`").unwrap());
static MATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([^$]+)\$").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

/// Options for inline formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineOptions {
    /// Render `$x$` as a math span (runs after code spans, before links)
    pub math: bool,

    /// Escape `&`, `<`, `>` and `"` in the source before formatting
    pub escape_html: bool,
}

impl InlineOptions {
    /// Create new inline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable math spans.
    pub fn with_math(mut self, math: bool) -> Self {
        self.math = math;
        self
    }

    /// Enable or disable HTML escaping of the source text.
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }
}

/// Rewrites inline Markdown into HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineFormatter {
    options: InlineOptions,
}

impl InlineFormatter {
    /// Create a formatter.
    pub fn new(options: InlineOptions) -> Self {
        Self { options }
    }

    /// Format one line or phrase.
    pub fn format(&self, text: &str) -> String {
        let text: Cow<'_, str> = if self.options.escape_html {
            html_escape::encode_double_quoted_attribute(text)
        } else {
            Cow::Borrowed(text)
        };

        let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
        let text = ITALIC.replace_all(&text, "<em>${1}</em>");
        let text = CODE_SPAN.replace_all(&text, "<code>${1}</code>");
        let text = if self.options.math {
            Cow::Owned(
                MATH.replace_all(&text, r#"<span class="math">${1}</span>"#)
                    .into_owned(),
            )
        } else {
            text
        };
        LINK.replace_all(
            &text,
            r#"<a href="${2}" target="_blank" rel="noopener noreferrer">${1}</a>"#,
        )
        .into_owned()
    }

    /// Remove inline markup, keeping the text it wraps (link labels only).
    pub fn strip(&self, text: &str) -> String {
        let text = BOLD.replace_all(text, "${1}");
        let text = ITALIC.replace_all(&text, "${1}");
        let text = CODE_SPAN.replace_all(&text, "${1}");
        let text = if self.options.math {
            Cow::Owned(MATH.replace_all(&text, "${1}").into_owned())
        } else {
            text
        };
        LINK.replace_all(&text, "${1}").into_owned()
    }
}

/// Format inline Markdown with default options.
pub fn format_inline(text: &str) -> String {
    InlineFormatter::default().format(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_before_italic() {
        assert_eq!(
            format_inline("**bold *and* italic**"),
            "<strong>bold <em>and</em> italic</strong>"
        );
    }

    #[test]
    fn test_each_construct() {
        assert_eq!(format_inline("**b**"), "<strong>b</strong>");
        assert_eq!(format_inline("*i*"), "<em>i</em>");
        assert_eq!(format_inline("`c`"), "<code>c</code>");
        assert_eq!(
            format_inline("[home](https://example.com)"),
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">home</a>"#
        );
    }

    #[test]
    fn test_order_dependent_code_span() {
        // Emphasis runs before code spans, so stars inside backticks are
        // still turned into emphasis.
        assert_eq!(format_inline("`a*b*c`"), "<code>a<em>b</em>c</code>");
    }

    #[test]
    fn test_code_inside_link_label() {
        assert_eq!(
            format_inline("[`x`](u)"),
            r#"<a href="u" target="_blank" rel="noopener noreferrer"><code>x</code></a>"#
        );
    }

    #[test]
    fn test_unbalanced_markers_left_alone() {
        assert_eq!(format_inline("2 * 3 = 6"), "2 * 3 = 6");
        assert_eq!(format_inline("[no link]"), "[no link]");
    }

    #[test]
    fn test_empty_emphasis() {
        assert_eq!(format_inline("****"), "<strong></strong>");
    }

    #[test]
    fn test_math_is_opt_in() {
        assert_eq!(format_inline("$x^2$"), "$x^2$");
        let formatter = InlineFormatter::new(InlineOptions::new().with_math(true));
        assert_eq!(
            formatter.format("$x^2$"),
            r#"<span class="math">x^2</span>"#
        );
    }

    #[test]
    fn test_escape_html() {
        let formatter = InlineFormatter::new(InlineOptions::new().with_escape_html(true));
        assert_eq!(
            formatter.format("<b>**x**</b>"),
            "&lt;b&gt;<strong>x</strong>&lt;/b&gt;"
        );
        assert_eq!(format_inline("<b>"), "<b>");
    }

    #[test]
    fn test_strip() {
        let formatter = InlineFormatter::default();
        assert_eq!(
            formatter.strip("**a** *b* `c` [d](e)"),
            "a b c d"
        );
    }
}
