//! Document model types for scanned notes.
//!
//! This module defines the values that bridge the block scanner and the
//! renderers. Everything here is a plain immutable value built once per
//! parse; nothing keeps identity between parses.

mod document;
mod list;
mod section;
mod table;

pub use document::{Document, Outline, OutlineItem};
pub use list::{count_items, ListItem};
pub use section::{DividerKind, ListKind, Section, SectionKind};
pub use table::Table;
