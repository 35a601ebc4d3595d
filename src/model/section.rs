//! Section types: the block-level units produced by the scanner.

use super::ListItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One classified block of a note.
///
/// Each variant carries only the payload that belongs to its kind, so a
/// section can never mix, say, a code language with list items. On the wire
/// a section is a flat record tagged by `kind` (see [`SectionKind`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SectionRecord", try_from = "SectionRecord")]
pub enum Section {
    /// Level-1 heading.
    Title {
        /// Heading text with the `#` marker removed
        content: String,
    },

    /// Heading of level 2 or deeper.
    Subtitle {
        /// Heading text with the `#` markers removed
        content: String,
        /// Number of leading `#` characters
        level: usize,
    },

    /// A single line of paragraph text, inline markup left untouched.
    Text {
        /// Raw line content
        content: String,
    },

    /// Fenced code block.
    Code {
        /// Code body without the trailing newline
        content: String,
        /// Lowercase language tag, `"text"` when the fence had none
        language: String,
    },

    /// A run of list lines and the tree built from them.
    List {
        /// Raw list lines joined by `\n`
        content: String,
        /// Kind of the outermost list, taken from the first line
        list_kind: ListKind,
        /// Nested items
        items: Vec<ListItem>,
    },

    /// Block quote body with the `>` prefixes removed.
    Quote {
        /// Quote body, one source line per line
        content: String,
    },

    /// Pipe table source, header and separator rows included.
    Table {
        /// Raw table lines joined by `\n`
        content: String,
    },

    /// Horizontal rule.
    Divider {
        /// Which glyph the rule was drawn with
        divider_kind: DividerKind,
    },
}

impl Section {
    /// Create a heading section, `Title` for level 1 and `Subtitle` otherwise.
    pub fn heading(content: impl Into<String>, level: usize) -> Self {
        let content = content.into();
        if level == 1 {
            Section::Title { content }
        } else {
            Section::Subtitle { content, level }
        }
    }

    /// Create a paragraph text section.
    pub fn text(content: impl Into<String>) -> Self {
        Section::Text {
            content: content.into(),
        }
    }

    /// Create a code section.
    pub fn code(content: impl Into<String>, language: impl Into<String>) -> Self {
        Section::Code {
            content: content.into(),
            language: language.into(),
        }
    }

    /// Create a quote section.
    pub fn quote(content: impl Into<String>) -> Self {
        Section::Quote {
            content: content.into(),
        }
    }

    /// Create a table section.
    pub fn table(content: impl Into<String>) -> Self {
        Section::Table {
            content: content.into(),
        }
    }

    /// Create a divider section.
    pub fn divider(divider_kind: DividerKind) -> Self {
        Section::Divider { divider_kind }
    }

    /// The kind tag of this section.
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Title { .. } => SectionKind::Title,
            Section::Subtitle { .. } => SectionKind::Subtitle,
            Section::Text { .. } => SectionKind::Text,
            Section::Code { .. } => SectionKind::Code,
            Section::List { .. } => SectionKind::List,
            Section::Quote { .. } => SectionKind::Quote,
            Section::Table { .. } => SectionKind::Table,
            Section::Divider { .. } => SectionKind::Divider,
        }
    }

    /// The raw text payload. Empty for dividers.
    pub fn content(&self) -> &str {
        match self {
            Section::Title { content }
            | Section::Subtitle { content, .. }
            | Section::Text { content }
            | Section::Code { content, .. }
            | Section::List { content, .. }
            | Section::Quote { content }
            | Section::Table { content } => content,
            Section::Divider { .. } => "",
        }
    }

    /// Heading level for titles and subtitles.
    pub fn level(&self) -> Option<usize> {
        match self {
            Section::Title { .. } => Some(1),
            Section::Subtitle { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Check if this is a title or subtitle.
    pub fn is_heading(&self) -> bool {
        matches!(self, Section::Title { .. } | Section::Subtitle { .. })
    }
}

/// Closed set of section kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Title,
    Subtitle,
    Text,
    Code,
    List,
    Quote,
    Table,
    Divider,
}

impl SectionKind {
    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Title => "title",
            SectionKind::Subtitle => "subtitle",
            SectionKind::Text => "text",
            SectionKind::Code => "code",
            SectionKind::List => "list",
            SectionKind::Quote => "quote",
            SectionKind::Table => "table",
            SectionKind::Divider => "divider",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered (numbered) or unordered (bulleted) list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// `1.`, `2.`, ...
    Ordered,
    /// `-`, `*` or `+`
    #[default]
    Unordered,
}

impl ListKind {
    /// Check if this is an ordered list.
    pub fn is_ordered(&self) -> bool {
        matches!(self, ListKind::Ordered)
    }
}

/// Glyph family a divider line was drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerKind {
    /// `---`
    Dash,
    /// `***`
    Star,
    /// `===`
    Equal,
    /// `___`
    Underscore,
}

impl DividerKind {
    /// Classify a trimmed line: three or more of one divider glyph and
    /// nothing else.
    pub fn detect(trimmed: &str) -> Option<Self> {
        let kinds = [
            ('-', DividerKind::Dash),
            ('*', DividerKind::Star),
            ('=', DividerKind::Equal),
            ('_', DividerKind::Underscore),
        ];
        kinds.into_iter().find_map(|(glyph, kind)| {
            let run = trimmed.chars().count();
            (run >= 3 && trimmed.chars().all(|c| c == glyph)).then_some(kind)
        })
    }

    /// Wire name of the divider kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DividerKind::Dash => "dash",
            DividerKind::Star => "star",
            DividerKind::Equal => "equal",
            DividerKind::Underscore => "underscore",
        }
    }
}

/// Flat wire record for a [`Section`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SectionRecord {
    kind: SectionKind,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    list_kind: Option<ListKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    list_items: Option<Vec<ListItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    divider_kind: Option<DividerKind>,
}

impl SectionRecord {
    fn bare(kind: SectionKind, content: String) -> Self {
        Self {
            kind,
            content,
            level: None,
            language: None,
            list_kind: None,
            list_items: None,
            divider_kind: None,
        }
    }
}

impl From<Section> for SectionRecord {
    fn from(section: Section) -> Self {
        let kind = section.kind();
        match section {
            Section::Title { content } => SectionRecord {
                level: Some(1),
                ..Self::bare(kind, content)
            },
            Section::Subtitle { content, level } => SectionRecord {
                level: Some(level),
                ..Self::bare(kind, content)
            },
            Section::Code { content, language } => SectionRecord {
                language: Some(language),
                ..Self::bare(kind, content)
            },
            Section::List {
                content,
                list_kind,
                items,
            } => SectionRecord {
                list_kind: Some(list_kind),
                list_items: Some(items),
                ..Self::bare(kind, content)
            },
            Section::Divider { divider_kind } => SectionRecord {
                divider_kind: Some(divider_kind),
                ..Self::bare(kind, String::new())
            },
            Section::Text { content } | Section::Quote { content } | Section::Table { content } => {
                Self::bare(kind, content)
            }
        }
    }
}

impl TryFrom<SectionRecord> for Section {
    type Error = String;

    fn try_from(record: SectionRecord) -> Result<Self, Self::Error> {
        let content = record.content;
        let section = match record.kind {
            SectionKind::Title => match record.level {
                None | Some(1) => Section::Title { content },
                Some(other) => return Err(format!("title must have level 1, got {}", other)),
            },
            SectionKind::Subtitle => Section::Subtitle {
                content,
                level: record.level.ok_or("subtitle is missing `level`")?,
            },
            SectionKind::Text => Section::Text { content },
            SectionKind::Code => Section::Code {
                content,
                language: record.language.unwrap_or_else(|| "text".to_string()),
            },
            SectionKind::List => Section::List {
                content,
                list_kind: record.list_kind.ok_or("list is missing `listKind`")?,
                items: record.list_items.unwrap_or_default(),
            },
            SectionKind::Quote => Section::Quote { content },
            SectionKind::Table => Section::Table { content },
            SectionKind::Divider => Section::Divider {
                divider_kind: record.divider_kind.ok_or("divider is missing `dividerKind`")?,
            },
        };
        Ok(section)
    }
}
