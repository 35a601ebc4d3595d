//! # notedown
//!
//! Markdown note scanning and rendering for Rust.
//!
//! A note is scanned line by line into a flat list of typed sections
//! (headings, text lines, code blocks, lists with their item tree, quotes,
//! tables and dividers), which can then be rendered to HTML, plain text or
//! JSON.
//!
//! ## Quick Start
//!
//! ```
//! use notedown::{parse, render, SectionKind};
//!
//! let doc = parse("# Notes\n\n- first\n  - nested\n- second");
//! assert_eq!(doc.sections[0].kind(), SectionKind::Title);
//!
//! let options = render::RenderOptions::new().with_wrapper(false);
//! let html = render::to_html(&doc, &options).unwrap();
//! assert!(html.starts_with("<h1>Notes</h1>"));
//! ```
//!
//! ## Features
//!
//! - **Line scanner**: single forward pass with fixed rule priority, never fails on content
//! - **List trees**: nested items rebuilt from indentation
//! - **HTML rendering**: inline formatting, per-line syntax highlighting, recursive quotes
//! - **Batch parsing**: many notes in parallel on Rayon
//! - **Wire format**: sections serialize to the JSON shape consumers expect

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    DividerKind, Document, ListItem, ListKind, Outline, OutlineItem, Section, SectionKind, Table,
};
pub use parser::{scan, ErrorMode, NoteParser, ParseOptions};
pub use render::{format_inline, InlineOptions, JsonFormat, RenderOptions, RenderResult};

use std::io::Read;
use std::path::Path;

/// Scan Markdown text into a document.
///
/// Any text is a valid note, so this cannot fail.
///
/// # Example
///
/// ```
/// let doc = notedown::parse("> quoted\n---");
/// assert_eq!(doc.len(), 2);
/// ```
pub fn parse(text: &str) -> Document {
    NoteParser::from_text(text).parse()
}

/// Scan Markdown text with custom options.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Document {
    NoteParser::from_str_with_options(text, options).parse()
}

/// Parse a note file.
///
/// # Example
///
/// ```no_run
/// use notedown::parse_file;
///
/// let doc = parse_file("notes.md").unwrap();
/// println!("Sections: {}", doc.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = NoteParser::open(path)?;
    Ok(parser.parse())
}

/// Parse a note file with custom options.
///
/// # Example
///
/// ```no_run
/// use notedown::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .with_unescape_newlines(true);
/// let doc = parse_file_with_options("notes.md", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = NoteParser::open_with_options(path, options)?;
    Ok(parser.parse())
}

/// Parse a note from bytes. Fails only if the bytes are not UTF-8.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = NoteParser::from_bytes(data)?;
    Ok(parser.parse())
}

/// Parse a note from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = NoteParser::from_bytes_with_options(data, options)?;
    Ok(parser.parse())
}

/// Parse a note from a reader.
///
/// # Example
///
/// ```no_run
/// use notedown::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("notes.md").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = NoteParser::from_reader(reader)?;
    Ok(parser.parse())
}

/// Parse a note from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Document> {
    let parser = NoteParser::from_reader_with_options(reader, options)?;
    Ok(parser.parse())
}

/// Convert Markdown text to HTML with default options.
///
/// # Example
///
/// ```
/// let html = notedown::to_html("**hi**").unwrap();
/// assert!(html.contains("<p><strong>hi</strong></p>"));
/// ```
pub fn to_html(text: &str) -> Result<String> {
    render::to_html(&parse(text), &RenderOptions::default())
}

/// Convert Markdown text to HTML with custom render options.
pub fn to_html_with_options(text: &str, options: &RenderOptions) -> Result<String> {
    render::to_html(&parse(text), options)
}

/// Convert Markdown text to plain text.
pub fn to_text(text: &str) -> Result<String> {
    render::to_text(&parse(text), &RenderOptions::default())
}

/// Convert Markdown text to its JSON section array.
///
/// # Example
///
/// ```
/// use notedown::{to_json, JsonFormat};
///
/// let json = to_json("# Title", JsonFormat::Compact).unwrap();
/// assert_eq!(json, r##"[{"kind":"title","content":"Title","level":1}]"##);
/// ```
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    render::to_json(&parse(text), format)
}

/// Builder for parsing and converting notes.
///
/// # Example
///
/// ```no_run
/// use notedown::Notedown;
///
/// let html = Notedown::new()
///     .lenient()
///     .with_math(true)
///     .without_highlighting()
///     .parse_file("notes.md")?
///     .to_html()?;
/// # Ok::<(), notedown::Error>(())
/// ```
pub struct Notedown {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Notedown {
    /// Create a new Notedown builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient decoding of byte input.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Turn literal `\n` escape sequences into newlines before scanning.
    pub fn unescape_newlines(mut self) -> Self {
        self.parse_options = self.parse_options.with_unescape_newlines(true);
        self
    }

    /// Disable parallel batch parsing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Enable inline math spans.
    pub fn with_math(mut self, math: bool) -> Self {
        self.render_options = self.render_options.with_math(math);
        self
    }

    /// Escape raw HTML in text.
    pub fn escape_html(mut self) -> Self {
        self.render_options = self.render_options.with_escape_html(true);
        self
    }

    /// Render code blocks without syntax highlighting.
    pub fn without_highlighting(mut self) -> Self {
        self.render_options = self.render_options.with_highlight(false);
        self
    }

    /// Set the quote recursion ceiling.
    pub fn with_max_quote_depth(mut self, depth: usize) -> Self {
        self.render_options = self.render_options.with_max_quote_depth(depth);
        self
    }

    /// Render without the outer `<div class="markdown-renderer">`.
    pub fn unwrapped(mut self) -> Self {
        self.render_options = self.render_options.with_wrapper(false);
        self
    }

    /// Parse Markdown text.
    pub fn parse(self, text: &str) -> NotedownResult {
        let document = parse_with_options(text, self.parse_options);
        NotedownResult {
            document,
            render_options: self.render_options,
        }
    }

    /// Parse a note file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<NotedownResult> {
        let document = parse_file_with_options(path, self.parse_options)?;
        Ok(NotedownResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a note from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<NotedownResult> {
        let document = parse_bytes_with_options(data, self.parse_options)?;
        Ok(NotedownResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Notedown {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a note.
pub struct NotedownResult {
    /// The scanned document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl NotedownResult {
    /// Convert to HTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to HTML and collect rendering statistics.
    pub fn to_html_with_stats(&self) -> Result<RenderResult> {
        render::to_html_with_stats(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the section payloads as plain text.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notedown_builder() {
        let builder = Notedown::new()
            .lenient()
            .with_math(true)
            .without_highlighting()
            .unwrapped();

        assert_eq!(builder.parse_options.error_mode, ErrorMode::Lenient);
        assert!(builder.render_options.inline.math);
        assert!(!builder.render_options.highlight);
        assert!(!builder.render_options.wrap_document);
    }

    #[test]
    fn test_notedown_builder_default() {
        let builder = Notedown::default();
        assert!(builder.render_options.wrap_document);
        assert!(!builder.parse_options.unescape_newlines);
        assert!(builder.parse_options.parallel);
    }

    #[test]
    fn test_notedown_builder_sequential() {
        let builder = Notedown::new().sequential().unescape_newlines();
        assert!(!builder.parse_options.parallel);
        assert!(builder.parse_options.unescape_newlines);
    }

    #[test]
    fn test_builder_parse_and_render() {
        let result = Notedown::new()
            .unwrapped()
            .with_math(true)
            .parse("Energy: $E=mc^2$");
        assert_eq!(
            result.to_html().unwrap(),
            "<p>Energy: <span class=\"math\">E=mc^2</span></p>\n"
        );
        assert_eq!(result.to_text().unwrap(), "Energy: E=mc^2");
    }

    #[test]
    fn test_builder_escape_html() {
        let result = Notedown::new().unwrapped().escape_html().parse("<script>");
        assert_eq!(result.to_html().unwrap(), "<p>&lt;script&gt;</p>\n");
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        let result = parse_bytes(&[0xC3, 0x28]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let doc = Notedown::new().lenient().parse_bytes(&[0xC3, 0x28]).unwrap();
        assert_eq!(doc.document().len(), 1);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse_bytes(b"").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_helpers() {
        assert_eq!(to_text("## *Sub*").unwrap(), "Sub");
        assert!(to_html("x")
            .unwrap()
            .starts_with("<div class=\"markdown-renderer\">"));
    }
}
