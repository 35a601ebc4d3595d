//! Block scanner: one forward pass over the lines of a note.
//!
//! Each line is tested against the block rules in a fixed priority order and
//! the first match wins:
//!
//! 1. fence delimiter (opens or closes a code block)
//! 2. any line while inside a code block
//! 3. table row (contains `|`)
//! 4. divider (`---`, `***`, `===`, `___`)
//! 5. heading (`#` in column 0)
//! 6. block quote (`>` in column 0, greedy over following `>` lines)
//! 7. list item start
//! 8. list continuation (indented line while a list is open)
//! 9. blank line (ignored)
//! 10. plain text
//!
//! All scan state lives in a [`BlockScanner`] value owned by one call, so
//! scans are re-entrant and independent. Scanning never fails: constructs
//! that do not match a rule fall through to the next one, ending as text.

use once_cell::sync::Lazy;
use regex::Regex;

use super::list_tree::{build_tree, list_kind};
use crate::model::{DividerKind, Section};

const FENCE: &str = "```";
const ZERO_WIDTH_SPACE: char = '\u{200B}';

static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([-*+]|\d+\.)\s").unwrap());
static CONTINUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s+\S").unwrap());

/// Scan note text into sections.
pub fn scan(text: &str) -> Vec<Section> {
    BlockScanner::new(text).run()
}

/// Check if a line starts a list item (`- `, `* `, `+ ` or `N. `, indented or not).
pub fn is_list_item(line: &str) -> bool {
    LIST_ITEM.is_match(line)
}

/// An open fenced code block.
#[derive(Debug)]
struct CodeBlock {
    language: String,
    body: String,
}

impl CodeBlock {
    fn open(fence_line: &str) -> Self {
        let language = fence_line.replacen(FENCE, "", 1).trim().to_lowercase();
        Self {
            language: if language.is_empty() {
                "text".to_string()
            } else {
                language
            },
            body: String::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push('\n');
    }

    fn into_section(self) -> Section {
        let content = self.body.strip_suffix('\n').unwrap_or(&self.body);
        Section::code(content, self.language)
    }
}

/// Line scanner state for a single document.
#[derive(Debug)]
pub struct BlockScanner<'a> {
    lines: Vec<&'a str>,
    sections: Vec<Section>,
    code: Option<CodeBlock>,
    list: Vec<String>,
    table: Vec<String>,
}

impl<'a> BlockScanner<'a> {
    /// Create a scanner over `text`, split on `\n`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').collect(),
            sections: Vec::new(),
            code: None,
            list: Vec::new(),
            table: Vec::new(),
        }
    }

    /// Run the scan to the end of input and return the sections.
    pub fn run(mut self) -> Vec<Section> {
        let mut i = 0;
        while i < self.lines.len() {
            i = self.step(i);
        }
        self.finish()
    }

    /// Classify line `i` and return the index of the next unconsumed line.
    fn step(&mut self, i: usize) -> usize {
        let line = self.lines[i];
        let trimmed = line.trim();

        if trimmed.starts_with(FENCE) {
            log::trace!("line {}: fence", i);
            self.toggle_fence(trimmed);
            return i + 1;
        }

        if let Some(code) = self.code.as_mut() {
            code.push_line(line);
            return i + 1;
        }

        if line.contains('|') {
            log::trace!("line {}: table row", i);
            self.table.push(line.to_string());
            return i + 1;
        }
        self.flush_table();

        if let Some(divider_kind) = DividerKind::detect(trimmed) {
            log::trace!("line {}: divider ({:?})", i, divider_kind);
            self.flush_list();
            self.sections.push(Section::divider(divider_kind));
            return i + 1;
        }

        if line.starts_with('#') {
            log::trace!("line {}: heading", i);
            self.flush_list();
            self.sections.push(heading(line));
            return i + 1;
        }

        if line.starts_with('>') {
            log::trace!("line {}: quote", i);
            self.flush_list();
            return self.quote(i);
        }

        if is_list_item(line) {
            log::trace!("line {}: list item", i);
            self.list.push(line.to_string());
            return i + 1;
        }

        if CONTINUATION.is_match(line) {
            if let Some(last) = self.list.last_mut() {
                log::trace!("line {}: list continuation", i);
                last.push('\n');
                last.push_str(line);
                return i + 1;
            }
        }

        if !trimmed.is_empty() {
            log::trace!("line {}: text", i);
            self.flush_list();
            self.sections.push(Section::text(line));
        }
        i + 1
    }

    fn toggle_fence(&mut self, trimmed: &str) {
        match self.code.take() {
            Some(code) => self.sections.push(code.into_section()),
            None => {
                self.flush_list();
                self.flush_table();
                self.code = Some(CodeBlock::open(trimmed));
            }
        }
    }

    /// Consume the quote run starting at `start`; returns the first line
    /// after it.
    fn quote(&mut self, start: usize) -> usize {
        let end = self.lines[start..]
            .iter()
            .position(|line| !line.starts_with('>'))
            .map_or(self.lines.len(), |offset| start + offset);

        let body = self.lines[start..end]
            .iter()
            .map(|line| strip_quote_marker(line))
            .collect::<Vec<_>>()
            .join("\n");
        self.sections.push(Section::quote(body));
        end
    }

    fn flush_list(&mut self) {
        if self.list.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.list);
        self.sections.push(Section::List {
            content: lines.join("\n"),
            list_kind: list_kind(&lines),
            items: build_tree(&lines),
        });
    }

    fn flush_table(&mut self) {
        if self.table.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.table);
        self.sections.push(Section::table(lines.join("\n")));
    }

    fn finish(mut self) -> Vec<Section> {
        if let Some(code) = self.code.take() {
            // An unterminated fence keeps its body unless there is none.
            if code.body.trim().is_empty() {
                log::debug!("dropping empty unterminated code block");
            } else {
                self.sections.push(code.into_section());
            }
        }
        self.flush_list();
        self.flush_table();

        log::debug!(
            "scanned {} lines into {} sections",
            self.lines.len(),
            self.sections.len()
        );
        self.sections
    }
}

/// Build a heading section from a line starting with `#`.
fn heading(line: &str) -> Section {
    let rest = line.trim_start_matches('#');
    let level = line.len() - rest.len();

    let text = rest.strip_prefix(' ').unwrap_or(rest);
    let text = match text.strip_suffix(ZERO_WIDTH_SPACE) {
        Some(stripped) => stripped.trim_end(),
        None => text,
    };
    Section::heading(text, level)
}

fn strip_quote_marker(line: &str) -> &str {
    let rest = line.strip_prefix('>').unwrap_or(line);
    rest.strip_prefix(' ').unwrap_or(rest)
}
