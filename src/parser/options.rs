//! Parsing options.

use super::title_block::DEFAULT_MARKER_LEN;

/// Options for splitting a filing into header and sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Apply NFC normalization before parsing
    pub normalize_unicode: bool,

    /// Minimum number of `=` in a title block marker line
    pub marker_min_len: usize,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Parse the text exactly as given.
    pub fn raw(mut self) -> Self {
        self.normalize_unicode = false;
        self
    }

    /// Set the minimum marker length (values below 1 are raised to 1).
    pub fn with_marker_min_len(mut self, len: usize) -> Self {
        self.marker_min_len = len.max(1);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            marker_min_len: DEFAULT_MARKER_LEN,
        }
    }
}
