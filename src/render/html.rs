//! HTML rendering for scanned notes.

use std::fmt::Write;

use crate::error::Result;
use crate::model::{Document, ListItem, Section, Table};
use crate::parser::scan;

use super::highlight::{resolve_language, Highlighter};
use super::visitor::{SectionVisitor, VisitorAction};
use super::{InlineFormatter, RenderOptions, RenderResult, RenderStats};

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_with_stats(doc)
}

/// HTML renderer.
///
/// Quotes are rendered by scanning their body again and rendering the
/// resulting sections inside a `<blockquote>`, so quotes can hold headings,
/// lists and code. The nesting depth is bounded by
/// [`RenderOptions::max_quote_depth`].
pub struct HtmlRenderer {
    options: RenderOptions,
    inline: InlineFormatter,
    highlighter: Highlighter,
    visitor: Option<Box<dyn SectionVisitor>>,
    stats: RenderStats,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            inline: InlineFormatter::new(options.inline),
            highlighter: Highlighter::new(options.highlight),
            options,
            visitor: None,
            stats: RenderStats::new(),
        }
    }

    /// Attach a visitor that sees every section before it renders.
    pub fn with_visitor<V: SectionVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to HTML with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;
        Ok(RenderResult::new(content, self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.wrap_document {
            output.push_str("<div class=\"markdown-renderer\">\n");
        }
        self.render_sections(&mut output, &doc.sections, 0)?;
        if self.options.wrap_document {
            output.push_str("</div>\n");
        }

        log::debug!(
            "rendered {} sections to {} bytes of HTML",
            doc.len(),
            output.len()
        );
        Ok(output)
    }

    fn render_sections(&mut self, out: &mut String, sections: &[Section], depth: usize) -> Result<()> {
        for section in sections {
            self.render_section(out, section, depth)?;
        }
        Ok(())
    }

    fn render_section(&mut self, out: &mut String, section: &Section, depth: usize) -> Result<()> {
        if let Some(visitor) = self.visitor.as_mut() {
            match visitor.visit(section, depth) {
                VisitorAction::Continue => {}
                VisitorAction::Skip => return Ok(()),
                VisitorAction::Replace(html) => {
                    out.push_str(&html);
                    return Ok(());
                }
            }
        }

        if self.options.collect_stats {
            self.stats.record(section);
        }

        match section {
            Section::Title { content } => self.render_heading(out, content, 1),
            Section::Subtitle { content, level } => {
                self.render_heading(out, content, (*level).clamp(2, 6))
            }
            Section::Text { content } => {
                writeln!(out, "<p>{}</p>", self.inline.format(content))?;
                Ok(())
            }
            Section::Code { content, language } => self.render_code(out, content, language),
            Section::List { items, .. } => self.render_list(out, items),
            Section::Quote { content } => self.render_quote(out, content, depth),
            Section::Table { content } => self.render_table(out, &Table::parse(content)),
            Section::Divider { divider_kind } => {
                writeln!(out, "<hr class=\"divider divider-{}\">", divider_kind.as_str())?;
                Ok(())
            }
        }
    }

    fn render_heading(&self, out: &mut String, content: &str, level: usize) -> Result<()> {
        writeln!(
            out,
            "<h{level}>{}</h{level}>",
            self.inline.format(content),
            level = level
        )?;
        Ok(())
    }

    fn render_code(&self, out: &mut String, code: &str, language: &str) -> Result<()> {
        let grammar = resolve_language(language);
        write!(
            out,
            "<pre><code class=\"language-{}\">",
            html_escape::encode_double_quoted_attribute(language)
        )?;

        let lines = self.highlighter.highlight_lines(code, &grammar);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write!(out, "<span class=\"code-line\">{}</span>", line)?;
        }

        out.push_str("</code></pre>\n");
        Ok(())
    }

    fn render_list(&self, out: &mut String, items: &[ListItem]) -> Result<()> {
        let Some(first) = items.first() else {
            return Ok(());
        };
        let tag = if first.kind.is_ordered() { "ol" } else { "ul" };

        writeln!(out, "<{}>", tag)?;
        for (i, item) in items.iter().enumerate() {
            if first.kind.is_ordered() {
                write!(out, "<li value=\"{}\">", i + 1)?;
            } else {
                out.push_str("<li>");
            }
            out.push_str(&self.inline.format(&item.content));
            if item.has_children() {
                out.push('\n');
                self.render_list(out, &item.children)?;
            }
            out.push_str("</li>\n");
        }
        writeln!(out, "</{}>", tag)?;
        Ok(())
    }

    fn render_quote(&mut self, out: &mut String, body: &str, depth: usize) -> Result<()> {
        let inner = depth + 1;
        out.push_str("<blockquote>\n");

        if inner > self.options.max_quote_depth {
            log::warn!(
                "quote nesting exceeds {} levels, rendering body as text",
                self.options.max_quote_depth
            );
            writeln!(out, "<p>{}</p>", html_escape::encode_text(body))?;
        } else {
            if let Some(visitor) = self.visitor.as_mut() {
                visitor.on_quote_enter(inner);
            }
            let sections = scan(body);
            self.render_sections(out, &sections, inner)?;
            if let Some(visitor) = self.visitor.as_mut() {
                visitor.on_quote_exit(inner);
            }
        }

        out.push_str("</blockquote>\n");
        Ok(())
    }

    fn render_table(&self, out: &mut String, table: &Table) -> Result<()> {
        out.push_str("<table>\n<thead><tr>");
        for cell in &table.headers {
            write!(out, "<th>{}</th>", self.inline.format(cell))?;
        }
        out.push_str("</tr></thead>\n<tbody>\n");
        for row in &table.rows {
            out.push_str("<tr>");
            for cell in row {
                write!(out, "<td>{}</td>", self.inline.format(cell))?;
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
        Ok(())
    }
}
