//! Note loader: turns files, bytes or strings into scanned documents.

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::model::Document;

use super::options::{ErrorMode, ParseOptions};
use super::scanner::scan;

const BOM: char = '\u{FEFF}';

/// Markdown note parser.
///
/// Holds the decoded source text; [`NoteParser::parse`] runs the block
/// scanner over it.
#[derive(Debug, Clone)]
pub struct NoteParser {
    source: String,
    options: ParseOptions,
}

impl NoteParser {
    /// Open a note file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a note file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading note {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load a note from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Load a note from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let text = match options.error_mode {
            ErrorMode::Strict => Cow::Borrowed(std::str::from_utf8(data)?),
            ErrorMode::Lenient => {
                let text = String::from_utf8_lossy(data);
                if let Cow::Owned(_) = text {
                    log::warn!("input contained invalid UTF-8, replaced with U+FFFD");
                }
                text
            }
        };
        Ok(Self::from_str_with_options(&text, options))
    }

    /// Load a note from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Load a note from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Load a note from text that is already decoded.
    pub fn from_text(text: &str) -> Self {
        Self::from_str_with_options(text, ParseOptions::default())
    }

    /// Load a note from decoded text with custom options.
    pub fn from_str_with_options(text: &str, options: ParseOptions) -> Self {
        let source = prepare(text, &options).into_owned();
        Self { source, options }
    }

    /// The text the scanner will see, after preprocessing.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The options this parser was created with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Scan the note into a document.
    pub fn parse(&self) -> Document {
        Document::from_sections(scan(&self.source))
    }
}

/// Apply the text preprocessing selected in `options`.
pub(crate) fn prepare<'a>(text: &'a str, options: &ParseOptions) -> Cow<'a, str> {
    let mut text = Cow::Borrowed(text.strip_prefix(BOM).unwrap_or(text));

    if options.unescape_newlines {
        text = Cow::Owned(unescape_newlines(&text));
    }
    if options.normalize_line_endings && text.contains("\r\n") {
        text = Cow::Owned(text.replace("\r\n", "\n"));
    }
    text
}

/// Replace literal `\r\n`, `\n` and `\r` escape sequences with newlines.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\r\\n", "\n")
        .replace("\\n", "\n")
        .replace("\\r", "\n")
}

/// Parse many in-memory notes, in parallel when `options.parallel` is set.
///
/// Results keep the order of `texts`.
pub fn parse_many<S>(texts: &[S], options: &ParseOptions) -> Vec<Document>
where
    S: AsRef<str> + Sync,
{
    let parse_one = |text: &S| {
        NoteParser::from_str_with_options(text.as_ref(), options.clone()).parse()
    };

    if options.parallel {
        texts.par_iter().map(parse_one).collect()
    } else {
        texts.iter().map(parse_one).collect()
    }
}

/// Parse many note files, in parallel when `options.parallel` is set.
///
/// One unreadable file does not stop the others; each path gets its own
/// result, in input order.
pub fn parse_files<P>(paths: &[P], options: &ParseOptions) -> Vec<(PathBuf, Result<Document>)>
where
    P: AsRef<Path> + Sync,
{
    let parse_one = |path: &P| {
        let path = path.as_ref();
        let result =
            NoteParser::open_with_options(path, options.clone()).map(|parser| parser.parse());
        (path.to_path_buf(), result)
    };

    if options.parallel {
        paths.par_iter().map(parse_one).collect()
    } else {
        paths.iter().map(parse_one).collect()
    }
}

/// Read and parse a note file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn parse_file_async<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let data = tokio::fs::read(path.as_ref()).await?;
    let parser = NoteParser::from_bytes_with_options(&data, options)?;
    Ok(parser.parse())
}
