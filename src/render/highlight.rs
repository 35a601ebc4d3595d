//! Per-line syntax highlighting for code sections.
//!
//! Every line is highlighted on its own, with a fresh parse state, so a
//! construct spanning lines (block comments, multi-line strings) is not
//! carried over. Output is HTML with one `<span>` per scope, classes named
//! after the scope atoms (`source rust`, `keyword control`, ...), so a
//! stylesheet picks the colors.

use crate::error::Result;

/// Token emitted for blank code lines so they keep their height.
pub const BLANK_LINE: &str = "&nbsp;";

#[cfg(feature = "highlight")]
mod engine {
    use once_cell::sync::Lazy;
    use syntect::html::{line_tokens_to_classed_spans, ClassStyle};
    use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

    use crate::error::{Error, Result};

    static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_nonewlines);

    pub(super) fn has_grammar(language: &str) -> bool {
        SYNTAX_SET.find_syntax_by_token(language).is_some()
    }

    fn grammar(language: &str) -> &'static SyntaxReference {
        SYNTAX_SET
            .find_syntax_by_token(language)
            .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
    }

    pub(super) fn classed_line(line: &str, language: &str) -> Result<String> {
        let mut state = ParseState::new(grammar(language));
        let ops = state
            .parse_line(line, &SYNTAX_SET)
            .map_err(|e| Error::Highlight(e.to_string()))?;

        let mut stack = ScopeStack::new();
        let (mut html, open_spans) =
            line_tokens_to_classed_spans(line, &ops, ClassStyle::Spaced, &mut stack)
                .map_err(|e| Error::Highlight(e.to_string()))?;
        for _ in 0..open_spans.max(0) {
            html.push_str("</span>");
        }
        Ok(html)
    }
}

/// Map a fence language tag to the grammar key used for highlighting.
///
/// Lowercases, folds common aliases onto the grammar that covers them, and
/// returns `"text"` for anything without a grammar.
pub fn resolve_language(language: &str) -> String {
    let lang = language.trim().to_lowercase();
    let key = match lang.as_str() {
        "" => "text",
        "dockerfile" | "docker" | "shell" | "sh" | "zsh" | "console" => "bash",
        "c++" => "cpp",
        "ts" | "typescript" | "tsx" | "jsx" | "js" | "node" => "javascript",
        "scss" | "sass" | "less" => "css",
        "yml" => "yaml",
        "py" => "python",
        "rs" => "rust",
        other => other,
    };

    if key == "text" || !grammar_exists(key) {
        "text".to_string()
    } else {
        key.to_string()
    }
}

fn grammar_exists(key: &str) -> bool {
    #[cfg(feature = "highlight")]
    {
        engine::has_grammar(key)
    }
    #[cfg(not(feature = "highlight"))]
    {
        let _ = key;
        false
    }
}

/// Highlights code one line at a time.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    enabled: bool,
}

impl Highlighter {
    /// Create a highlighter. When disabled, lines are only HTML-escaped.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Highlight a single line against `language` (an already resolved key).
    ///
    /// Blank and whitespace-only lines become [`BLANK_LINE`].
    pub fn try_highlight_line(&self, line: &str, language: &str) -> Result<String> {
        if line.trim().is_empty() {
            return Ok(BLANK_LINE.to_string());
        }
        if !self.enabled || language == "text" {
            return Ok(escape(line));
        }

        #[cfg(feature = "highlight")]
        {
            engine::classed_line(line, language)
        }
        #[cfg(not(feature = "highlight"))]
        {
            Err(crate::error::Error::Highlight(format!(
                "no grammar for `{}`: built without the `highlight` feature",
                language
            )))
        }
    }

    /// Highlight a single line, falling back to escaped text on failure.
    pub fn highlight_line(&self, line: &str, language: &str) -> String {
        self.try_highlight_line(line, language).unwrap_or_else(|e| {
            log::warn!("{}; rendering line as plain text", e);
            escape(line)
        })
    }

    /// Highlight every line of a code body independently.
    pub fn highlight_lines(&self, code: &str, language: &str) -> Vec<String> {
        code.split('\n')
            .map(|line| self.highlight_line(line, language))
            .collect()
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

fn escape(line: &str) -> String {
    html_escape::encode_text(line).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve_language(""), "text");
        assert_eq!(resolve_language("no-such-language"), "text");
        assert_eq!(resolve_language("TEXT"), "text");
    }

    #[cfg(feature = "highlight")]
    #[test]
    fn test_resolve_known_grammars() {
        assert_eq!(resolve_language("Rust"), "rust");
        assert_eq!(resolve_language("dockerfile"), "bash");
        assert_eq!(resolve_language("tsx"), "javascript");
        assert_eq!(resolve_language("C++"), "cpp");
        assert_eq!(resolve_language("py"), "python");
        assert_eq!(resolve_language("scss"), "css");
    }

    #[test]
    fn test_blank_lines_keep_height() {
        let highlighter = Highlighter::default();
        assert_eq!(highlighter.highlight_line("", "rust"), BLANK_LINE);
        assert_eq!(highlighter.highlight_line("   \t", "text"), BLANK_LINE);
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let highlighter = Highlighter::default();
        assert_eq!(
            highlighter.highlight_line("a < b && c", "text"),
            "a &lt; b &amp;&amp; c"
        );
    }

    #[test]
    fn test_disabled_highlighter_escapes_only() {
        let highlighter = Highlighter::new(false);
        assert_eq!(highlighter.highlight_line("<tag>", "rust"), "&lt;tag&gt;");
    }

    #[cfg(feature = "highlight")]
    #[test]
    fn test_highlight_produces_balanced_spans() {
        let highlighter = Highlighter::default();
        let html = highlighter.highlight_line("fn main() { let x = \"<s>\"; }", "rust");
        assert!(html.contains("<span class=\""));
        assert!(html.contains("&lt;s&gt;"));
        assert_eq!(html.matches("<span").count(), html.matches("</span>").count());
    }

    #[cfg(feature = "highlight")]
    #[test]
    fn test_lines_are_independent() {
        let highlighter = Highlighter::default();
        let lines = highlighter.highlight_lines("/* open\nstill comment? */", "javascript");
        assert_eq!(lines.len(), 2);
        // The second line starts a fresh parse, so the comment scope from
        // the first line is not carried into it.
        assert!(lines[0].contains("comment"));
        assert!(!lines[1].starts_with("<span class=\"source js\"><span class=\"comment"));
    }
}
