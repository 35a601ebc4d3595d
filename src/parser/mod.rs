//! Markdown note parsing module.

mod list_tree;
mod note_parser;
mod options;
mod scanner;

pub use list_tree::{build_tree, indent_level, list_kind};
pub use note_parser::{parse_files, parse_many, unescape_newlines, NoteParser};
pub use options::{ErrorMode, ParseOptions};
pub use scanner::{is_list_item, scan, BlockScanner};

#[cfg(feature = "async")]
pub use note_parser::parse_file_async;
