//! Table view of a `table` section.

use serde::{Deserialize, Serialize};

/// A pipe table split into header and body cells.
///
/// The scanner keeps tables as raw source lines; this is the render-time
/// reading of those lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header cells (first line)
    pub headers: Vec<String>,

    /// Body rows (every line after the separator)
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse table source lines.
    ///
    /// Blank lines are dropped, the first remaining line is the header, the
    /// next one is skipped as the separator row whatever it contains, and
    /// the rest are data rows. Cells are trimmed and empty cells discarded.
    pub fn parse(content: &str) -> Self {
        let mut lines = content.split('\n').filter(|line| !line.trim().is_empty());

        let headers = lines.next().map(split_cells).unwrap_or_default();
        let rows = lines.skip(1).map(split_cells).collect();

        Self { headers, rows }
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the header).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Check if the table has no header and no rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(String::from)
        .collect()
}
