//! Parsing options and configuration.

/// Options for loading and scanning notes.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// How to treat input bytes that are not valid UTF-8
    pub error_mode: ErrorMode,

    /// Turn literal `\n`, `\r\n` and `\r` escape sequences into newlines
    pub unescape_newlines: bool,

    /// Convert CRLF line endings to LF before scanning
    pub normalize_line_endings: bool,

    /// Whether batch parsing uses the rayon thread pool
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (decode invalid UTF-8 lossily).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable unescaping of literal newline sequences.
    pub fn with_unescape_newlines(mut self, unescape: bool) -> Self {
        self.unescape_newlines = unescape;
        self
    }

    /// Enable or disable CRLF normalization.
    pub fn with_normalize_line_endings(mut self, normalize: bool) -> Self {
        self.normalize_line_endings = normalize;
        self
    }

    /// Enable or disable parallel batch parsing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch parsing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            unescape_newlines: false,
            normalize_line_endings: true,
            parallel: true,
        }
    }
}

/// Error handling mode for byte input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Reject input that is not valid UTF-8
    #[default]
    Strict,
    /// Replace invalid sequences with U+FFFD and continue
    Lenient,
}
