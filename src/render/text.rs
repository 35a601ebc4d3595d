//! Plain text rendering for scanned notes.

use crate::error::Result;
use crate::model::{Document, ListItem, Section, Table};
use crate::parser::scan;

use super::{InlineFormatter, RenderOptions};

/// Convert a document to plain text.
///
/// Inline markup is removed, list items keep a `-` or `N.` marker with two
/// spaces of indentation per level, and quote bodies are rendered
/// recursively with every line prefixed by `> `.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = TextRenderer {
        inline: InlineFormatter::new(options.inline),
        max_quote_depth: options.max_quote_depth,
    };
    let output = renderer.sections(&doc.sections, 0);
    Ok(output.trim().to_string())
}

struct TextRenderer {
    inline: InlineFormatter,
    max_quote_depth: usize,
}

impl TextRenderer {
    fn sections(&self, sections: &[Section], depth: usize) -> String {
        sections
            .iter()
            .map(|section| self.section(section, depth))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn section(&self, section: &Section, depth: usize) -> String {
        match section {
            Section::Title { content }
            | Section::Subtitle { content, .. }
            | Section::Text { content } => self.inline.strip(content),
            Section::Code { content, .. } => content.clone(),
            Section::List { items, .. } => {
                let mut lines = Vec::new();
                self.list(items, 0, &mut lines);
                lines.join("\n")
            }
            Section::Quote { content } => {
                let body = if depth + 1 > self.max_quote_depth {
                    log::warn!(
                        "quote nesting exceeds {} levels, keeping body as is",
                        self.max_quote_depth
                    );
                    content.clone()
                } else {
                    self.sections(&scan(content), depth + 1)
                };
                quote_lines(&body)
            }
            Section::Table { content } => {
                let table = Table::parse(content);
                std::iter::once(&table.headers)
                    .chain(table.rows.iter())
                    .map(|row| {
                        row.iter()
                            .map(|cell| self.inline.strip(cell))
                            .collect::<Vec<_>>()
                            .join(" | ")
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
            Section::Divider { .. } => "---".to_string(),
        }
    }

    fn list(&self, items: &[ListItem], level: usize, lines: &mut Vec<String>) {
        let ordered = items.first().is_some_and(|item| item.kind.is_ordered());
        for (i, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}.", i + 1)
            } else {
                "-".to_string()
            };
            lines.push(format!(
                "{}{} {}",
                "  ".repeat(level),
                marker,
                self.inline.strip(&item.content)
            ));
            self.list(&item.children, level + 1, lines);
        }
    }
}

fn quote_lines(body: &str) -> String {
    body.split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
