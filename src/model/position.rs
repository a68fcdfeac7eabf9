//! Page/line coordinates recorded during rendering.

use serde::{Deserialize, Serialize};

/// Where a heading line was rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingPosition {
    /// Heading line text
    pub text: String,
    /// 1-indexed page number
    pub page: u32,
    /// Document-wide line number
    pub line: u32,
    /// Subsection heading
    pub is_subheading: bool,
}

impl HeadingPosition {
    /// `page:line` label.
    pub fn label(&self) -> String {
        format!("{}:{}", self.page, self.line)
    }
}

/// Where a citation was rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPosition {
    /// Matched citation text
    pub text: String,
    /// 1-indexed page number
    pub page: u32,
    /// Document-wide line number
    pub line: u32,
}

impl CitationPosition {
    /// `page:line` label.
    pub fn label(&self) -> String {
        format!("{}:{}", self.page, self.line)
    }
}
