//! C-ABI FFI bindings for cross-language integration.
//!
//! Every function takes Markdown text as a null-terminated UTF-8 string.
//! Null or non-UTF-8 input produces an error result, never a panic.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::render::{self, JsonFormat, RenderOptions};
use crate::{parse, Document};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct NotedownResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `notedown_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `notedown_free_result`.
    pub error: *mut c_char,
}

impl NotedownResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }

    fn from_result(result: crate::Result<String>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Options for HTML conversion via FFI.
#[repr(C)]
pub struct NotedownOptions {
    /// Syntax-highlight code blocks.
    pub highlight: bool,
    /// Render `$x$` as math spans.
    pub math: bool,
    /// Escape raw HTML in text.
    pub escape_html: bool,
    /// Wrap output in `<div class="markdown-renderer">`.
    pub wrap_document: bool,
}

impl Default for NotedownOptions {
    fn default() -> Self {
        Self {
            highlight: true,
            math: false,
            escape_html: false,
            wrap_document: true,
        }
    }
}

impl From<&NotedownOptions> for RenderOptions {
    fn from(options: &NotedownOptions) -> Self {
        RenderOptions::new()
            .with_highlight(options.highlight)
            .with_math(options.math)
            .with_escape_html(options.escape_html)
            .with_wrapper(options.wrap_document)
    }
}

/// Decode a C string argument, or describe why it is not text.
unsafe fn read_markdown<'a>(markdown: *const c_char) -> Result<&'a str, String> {
    if markdown.is_null() {
        return Err("markdown cannot be null".to_string());
    }
    CStr::from_ptr(markdown)
        .to_str()
        .map_err(|e| crate::Error::from(e).to_string())
}

unsafe fn with_document<F>(markdown: *const c_char, convert: F) -> NotedownResult
where
    F: FnOnce(&Document) -> crate::Result<String>,
{
    match read_markdown(markdown) {
        Ok(text) => NotedownResult::from_result(convert(&parse(text))),
        Err(message) => NotedownResult::error(message),
    }
}

/// Convert Markdown to HTML.
///
/// # Safety
///
/// `markdown` must be null or a valid null-terminated string.
/// The returned result must be freed with `notedown_free_result`.
#[no_mangle]
pub unsafe extern "C" fn notedown_to_html(markdown: *const c_char) -> NotedownResult {
    with_document(markdown, |doc| {
        render::to_html(doc, &RenderOptions::default())
    })
}

/// Convert Markdown to HTML with options.
///
/// # Safety
///
/// `markdown` must be null or a valid null-terminated string; `options` may
/// be null for defaults. The returned result must be freed with
/// `notedown_free_result`.
#[no_mangle]
pub unsafe extern "C" fn notedown_to_html_with_options(
    markdown: *const c_char,
    options: *const NotedownOptions,
) -> NotedownResult {
    let render_options = if options.is_null() {
        RenderOptions::from(&NotedownOptions::default())
    } else {
        RenderOptions::from(&*options)
    };
    with_document(markdown, |doc| render::to_html(doc, &render_options))
}

/// Convert Markdown to plain text.
///
/// # Safety
///
/// `markdown` must be null or a valid null-terminated string.
/// The returned result must be freed with `notedown_free_result`.
#[no_mangle]
pub unsafe extern "C" fn notedown_to_text(markdown: *const c_char) -> NotedownResult {
    with_document(markdown, |doc| {
        render::to_text(doc, &RenderOptions::default())
    })
}

/// Convert Markdown to its JSON section array.
///
/// # Safety
///
/// `markdown` must be null or a valid null-terminated string.
/// The returned result must be freed with `notedown_free_result`.
#[no_mangle]
pub unsafe extern "C" fn notedown_to_json(markdown: *const c_char, pretty: bool) -> NotedownResult {
    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };
    with_document(markdown, |doc| render::to_json(doc, format))
}

/// Count the top-level sections of a note.
///
/// # Safety
///
/// `markdown` must be null or a valid null-terminated string.
/// Returns -1 on invalid input.
#[no_mangle]
pub unsafe extern "C" fn notedown_section_count(markdown: *const c_char) -> i32 {
    match read_markdown(markdown) {
        Ok(text) => i32::try_from(parse(text).len()).unwrap_or(i32::MAX),
        Err(_) => -1,
    }
}

/// Free a result returned by any notedown function.
///
/// # Safety
///
/// The `result` must have been returned by a notedown function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn notedown_free_result(result: NotedownResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by notedown.
///
/// # Safety
///
/// The `ptr` must have been allocated by notedown.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn notedown_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the notedown library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn notedown_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(result: &NotedownResult) -> String {
        unsafe { CStr::from_ptr(result.data).to_string_lossy().into_owned() }
    }

    #[test]
    fn test_version() {
        let version = unsafe { CStr::from_ptr(notedown_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_null_markdown() {
        unsafe {
            let result = notedown_to_html(ptr::null());
            assert!(!result.success);
            assert!(result.data.is_null());
            assert!(!result.error.is_null());
            notedown_free_result(result);
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = [b'#', b' ', 0xFF, 0];
        unsafe {
            let ptr = bytes.as_ptr() as *const c_char;
            assert_eq!(notedown_section_count(ptr), -1);
            let result = notedown_to_text(ptr);
            assert!(!result.success);
            notedown_free_result(result);
        }
    }

    #[test]
    fn test_section_count() {
        let markdown = CString::new("# T\ntext\n---").unwrap();
        unsafe {
            assert_eq!(notedown_section_count(markdown.as_ptr()), 3);
            assert_eq!(notedown_section_count(ptr::null()), -1);
        }
    }

    #[test]
    fn test_to_html_with_options() {
        let markdown = CString::new("$x$").unwrap();
        let options = NotedownOptions {
            math: true,
            wrap_document: false,
            ..Default::default()
        };
        unsafe {
            let result = notedown_to_html_with_options(markdown.as_ptr(), &options);
            assert!(result.success);
            assert_eq!(data(&result), "<p><span class=\"math\">x</span></p>\n");
            notedown_free_result(result);
        }
    }

    #[test]
    fn test_to_json_compact() {
        let markdown = CString::new("text").unwrap();
        unsafe {
            let result = notedown_to_json(markdown.as_ptr(), false);
            assert_eq!(data(&result), r#"[{"kind":"text","content":"text"}]"#);
            notedown_free_result(result);
        }
    }
}
