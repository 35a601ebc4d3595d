//! Rendering module for converting scanned notes to output formats.

pub mod highlight;
mod html;
mod inline;
mod json;
mod options;
mod result;
mod text;
pub mod visitor;

pub use highlight::{resolve_language, Highlighter};
pub use html::{to_html, to_html_with_stats, HtmlRenderer};
pub use inline::{format_inline, InlineFormatter, InlineOptions};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_MAX_QUOTE_DEPTH};
pub use result::{RenderResult, RenderStats};
pub use text::to_text;
pub use visitor::{CompositeVisitor, DefaultVisitor, SectionVisitor, VisitorAction};
