//! Page geometry and rendering options.

use crate::error::{Error, Result};
use crate::layout::{AlignMode, AlignmentPolicy, CitationPattern, SegmentStyles};
use crate::model::FontSpec;
use crate::parser::DEFAULT_MARKER_LEN;

/// Points per inch.
pub const INCH: f32 = 72.0;

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    /// US Letter, 8.5in x 11in
    #[default]
    Letter,
    /// ISO A4
    A4,
    /// Any size, in points
    Custom {
        /// Width in points
        width: f32,
        /// Height in points
        height: f32,
    },
}

impl PageSize {
    /// `(width, height)` in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin (start of the text column)
    pub left: f32,
    /// Right margin
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 1.0 * INCH,
            bottom: 1.0 * INCH,
            left: 1.2 * INCH,
            right: 0.5 * INCH,
        }
    }
}

/// Options for laying out and rendering a filing.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Paper size
    pub page_size: PageSize,

    /// Margins
    pub margins: Margins,

    /// Distance between body lines
    pub line_spacing: f32,

    /// Body and heading fonts
    pub styles: SegmentStyles,

    /// Font for title block pages
    pub title_block_font: FontSpec,

    /// Distance between title block lines
    pub title_block_spacing: f32,

    /// Font for line numbers
    pub line_number_font: FontSpec,

    /// Font for `Page X of Y`
    pub footer_font: FontSpec,

    /// Font for the rotated firm name
    pub firm_font: FontSpec,

    /// Font for the case name
    pub case_font: FontSpec,

    /// Font for cover page lines
    pub cover_font: FontSpec,

    /// Body line alignment
    pub align_mode: AlignMode,

    /// Never centre numbered or bulleted lines
    pub keep_list_markers_left: bool,

    /// Minimum title block marker length
    pub marker_min_len: usize,

    /// Citation patterns for the table of contents
    pub citations: Vec<CitationPattern>,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paper size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the body line spacing in points.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set the body and heading fonts.
    pub fn with_styles(mut self, styles: SegmentStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Set the alignment mode.
    pub fn with_align(mut self, mode: AlignMode) -> Self {
        self.align_mode = mode;
        self
    }

    /// Keep numbered and bulleted lines flush left.
    pub fn with_list_markers_left(mut self, keep: bool) -> Self {
        self.keep_list_markers_left = keep;
        self
    }

    /// Set the title block marker length.
    pub fn with_marker_min_len(mut self, len: usize) -> Self {
        self.marker_min_len = len.max(1);
        self
    }

    /// Set citation patterns.
    pub fn with_citations(mut self, citations: Vec<CitationPattern>) -> Self {
        self.citations = citations;
        self
    }

    /// Page width in points.
    pub fn page_width(&self) -> f32 {
        self.page_size.dimensions().0
    }

    /// Page height in points.
    pub fn page_height(&self) -> f32 {
        self.page_size.dimensions().1
    }

    /// Body lines that fit between the top and bottom margins.
    pub fn max_lines_per_page(&self) -> usize {
        let usable = self.page_height() - self.margins.top - self.margins.bottom;
        if usable <= 0.0 || self.line_spacing <= 0.0 {
            return 0;
        }
        (usable / self.line_spacing).floor() as usize
    }

    /// Width available to body text.
    pub fn text_width(&self) -> f32 {
        self.page_width() - self.margins.right - self.margins.left - 0.2 * INCH
    }

    /// Baseline of the first body line.
    pub fn text_top(&self) -> f32 {
        self.page_height() - self.margins.top
    }

    /// Horizontal centre of centred body lines.
    pub fn text_center(&self) -> f32 {
        (self.margins.left + self.page_width() - 0.5 * INCH) / 2.0
    }

    /// The configured alignment policy.
    pub fn alignment_policy(&self) -> Box<dyn AlignmentPolicy> {
        self.align_mode.policy(self.keep_list_markers_left)
    }

    /// Check that the geometry can hold at least one line of text.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.page_size.dimensions();
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "page size {}x{} is not positive",
                width, height
            )));
        }
        if self.line_spacing <= 0.0 {
            return Err(Error::InvalidLayout("line spacing must be positive".into()));
        }
        if self.text_width() <= 0.0 {
            return Err(Error::InvalidLayout("margins leave no text width".into()));
        }
        if self.max_lines_per_page() == 0 {
            return Err(Error::InvalidLayout("margins leave no room for a line".into()));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::default(),
            line_spacing: 0.25 * INCH,
            styles: SegmentStyles::default(),
            title_block_font: FontSpec::bold(14.0),
            title_block_spacing: 0.3 * INCH,
            line_number_font: FontSpec::regular(10.0),
            footer_font: FontSpec::oblique(9.0),
            firm_font: FontSpec::bold(10.0),
            case_font: FontSpec::bold(12.0),
            cover_font: FontSpec::regular(12.0),
            align_mode: AlignMode::default(),
            keep_list_markers_left: false,
            marker_min_len: DEFAULT_MARKER_LEN,
            citations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_geometry() {
        let opts = LayoutOptions::default();
        assert_eq!(opts.max_lines_per_page(), 36);
        assert!((opts.text_width() - (612.0 - 36.0 - 86.4 - 14.4)).abs() < 1e-3);
        assert!((opts.text_top() - 720.0).abs() < 1e-3);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_a4_has_more_lines() {
        let opts = LayoutOptions::new().with_page_size(PageSize::A4);
        assert!(opts.max_lines_per_page() > 36);
    }

    #[test]
    fn test_invalid_geometry() {
        let opts = LayoutOptions::new().with_margins(Margins {
            top: 400.0,
            bottom: 400.0,
            ..Margins::default()
        });
        assert_eq!(opts.max_lines_per_page(), 0);
        assert!(matches!(opts.validate(), Err(Error::InvalidLayout(_))));

        let opts = LayoutOptions::new().with_line_spacing(0.0);
        assert!(opts.validate().is_err());
    }
}
