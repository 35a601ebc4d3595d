//! JSON rendering: the section array in its wire format.

use crate::error::Result;
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to a JSON array of sections.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scan;

    #[test]
    fn test_to_json_pretty() {
        let doc = Document::from_sections(scan("# Test\n```Rust\nfn x() {}\n```"));
        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"kind\": \"title\""));
        assert!(json.contains("\"language\": \"rust\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let doc = Document::from_sections(scan("- a\n  - b"));
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"list","content":"- a\n  - b","listKind":"unordered","listItems":[{"content":"a","indentLevel":0,"kind":"unordered","children":[{"content":"b","indentLevel":1,"kind":"unordered","children":[]}]}]}]"#
        );
    }

    #[test]
    fn test_round_trip_through_json() {
        let doc = Document::from_sections(scan("## Sub\n> q\n---"));
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
