//! # pleading
//!
//! Line-numbered legal filing layout for Rust.
//!
//! This library turns a plain-text filing into numbered pleading pages:
//! numbered all-caps headings split the text into sections, `=====`
//! bracketed blocks become pages of their own, every rendered line gets a
//! document-wide line number, and headings and citations are indexed by
//! `page:line` for a table of contents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pleading::{Pleading, JsonFormat};
//!
//! fn main() -> pleading::Result<()> {
//!     let result = Pleading::new("Doe Legal", "Doe v. Acme Corp.")
//!         .parse_file("complaint.txt")?;
//!
//!     std::fs::write("complaint.pdf", result.to_pdf()?)?;
//!     std::fs::write("index.json", result.table_of_contents()?.to_json(JsonFormat::Pretty)?)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading classification**: `I.`, `2.`, `1.1` numbering with all-caps titles
//! - **Title blocks**: bracketed text rendered alone on its page
//! - **Two-pass pagination**: `Page X of Y` footers with a verified page count
//! - **Table of contents**: headings and configurable citation patterns
//! - **Outputs**: PDF (lopdf), plain text, JSON snapshots

pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{decode_text, detect_text_from_bytes, is_text_bytes, read_text_file, TextFormat};
pub use error::{Error, Result};
pub use layout::{
    AlignMode, AlignmentPolicy, CitationPattern, Indexer, PageSink, Paginator, SegmentBuilder,
    SegmentStyles, TextMeasure,
};
pub use model::{
    Alignment, CitationPosition, Exhibit, Filing, FontName, FontSpec, HeaderBlock, HeadingKey,
    HeadingPosition, HeadingStyle, OrderedMap, Section, Sections, Segment, TextSegment,
    TitleBlockSegment,
};
pub use parser::{ParseOptions, ParsedFiling};
pub use render::{
    compose, Canvas, ComposeResult, FilingInfo, JsonFormat, LayoutOptions, LayoutStats,
    PageSize, PdfCanvas, TableOfContents, TextCanvas, TocStyle,
};

use std::path::Path;

/// Parse a filing text file into a header block and sections.
///
/// # Example
///
/// ```no_run
/// use pleading::parse_file;
///
/// let parsed = parse_file("complaint.txt").unwrap();
/// println!("Sections: {}", parsed.section_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedFiling> {
    parse_file_with_options(path, &ParseOptions::default())
}

/// Parse a filing text file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<ParsedFiling> {
    let text = read_text_file(path)?;
    Ok(parser::parse_str(&text, options))
}

/// Parse filing text held in memory.
pub fn parse_str(text: &str) -> ParsedFiling {
    parser::parse_str(text, &ParseOptions::default())
}

/// Compose a filing into PDF bytes.
///
/// # Example
///
/// ```no_run
/// use pleading::{build_pdf, parse_file, FilingInfo, LayoutOptions};
///
/// let filing = parse_file("complaint.txt")?.into_filing("Doe v. Acme Corp.", "Doe Legal");
/// let info = FilingInfo::from_filing(&filing);
/// let (pdf, result) = build_pdf(&filing, &info, &LayoutOptions::default())?;
/// println!("{} pages", result.total_pages());
/// # Ok::<(), pleading::Error>(())
/// ```
pub fn build_pdf(
    filing: &Filing,
    info: &FilingInfo,
    options: &LayoutOptions,
) -> Result<(Vec<u8>, ComposeResult)> {
    let mut canvas = pdf_canvas(info, options);
    let result = compose(filing, info, options, &mut canvas)?;
    Ok((canvas.finish()?, result))
}

/// Render the table of contents pages into PDF bytes.
pub fn build_index_pdf(toc: &TableOfContents, info: &FilingInfo, options: &LayoutOptions) -> Result<Vec<u8>> {
    let mut canvas = PdfCanvas::new(options.page_width(), options.page_height())
        .with_title(&format!("{} - Table of Contents", info.case_name))
        .with_author(&info.firm_name);
    let chrome = render::PageChrome::new(&info.firm_name, &info.case_name, options);
    toc.render(&mut canvas, &chrome)?;
    canvas.finish()
}

fn pdf_canvas(info: &FilingInfo, options: &LayoutOptions) -> PdfCanvas {
    let mut canvas = PdfCanvas::new(options.page_width(), options.page_height())
        .with_title(info.title.as_deref().unwrap_or(&info.case_name))
        .with_author(&info.firm_name);
    if let Some(subject) = info.subject() {
        canvas = canvas.with_subject(&subject);
    }
    canvas
}

/// Builder for laying out filings.
///
/// # Example
///
/// ```no_run
/// use pleading::{AlignMode, Pleading};
///
/// let text = Pleading::new("Doe Legal", "Doe v. Acme Corp.")
///     .with_align(AlignMode::ShortRun)
///     .with_cover_lines(["CIVIL COVER SHEET"])
///     .parse_file("complaint.txt")?
///     .to_text()?;
/// # Ok::<(), pleading::Error>(())
/// ```
pub struct Pleading {
    info: FilingInfo,
    parse_options: ParseOptions,
    layout_options: LayoutOptions,
}

impl Pleading {
    /// Create a builder for a firm and case.
    pub fn new(firm_name: impl Into<String>, case_name: impl Into<String>) -> Self {
        Self {
            info: FilingInfo::new(firm_name, case_name),
            parse_options: ParseOptions::default(),
            layout_options: LayoutOptions::default(),
        }
    }

    /// Set parse options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set layout options.
    pub fn with_layout(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Set the alignment mode.
    pub fn with_align(mut self, mode: AlignMode) -> Self {
        self.layout_options = self.layout_options.with_align(mode);
        self
    }

    /// Set citation patterns.
    pub fn with_citations(mut self, patterns: Vec<CitationPattern>) -> Self {
        self.layout_options = self.layout_options.with_citations(patterns);
        self
    }

    /// Add a cover page with these lines.
    pub fn with_cover_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.info = self.info.with_cover_lines(lines);
        self
    }

    /// Parse a filing text file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<PleadingResult> {
        let text = read_text_file(path)?;
        Ok(self.parse_str(&text))
    }

    /// Parse filing text held in memory.
    pub fn parse_str(self, text: &str) -> PleadingResult {
        let parsed = parser::parse_str(text, &self.parse_options);
        let filing = parsed.into_filing(&self.info.case_name, &self.info.firm_name);
        PleadingResult {
            filing,
            info: self.info,
            options: self.layout_options,
        }
    }
}

/// A parsed filing ready to be laid out.
pub struct PleadingResult {
    /// The filing
    pub filing: Filing,
    info: FilingInfo,
    options: LayoutOptions,
}

impl PleadingResult {
    /// Attach an exhibit.
    pub fn add_exhibit(&mut self, exhibit: Exhibit) {
        self.filing.add_exhibit(exhibit);
    }

    /// Compose onto any canvas.
    pub fn compose_into<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<ComposeResult> {
        compose(&self.filing, &self.info, &self.options, canvas)
    }

    /// Render to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        build_pdf(&self.filing, &self.info, &self.options).map(|(pdf, _)| pdf)
    }

    /// Render to numbered plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.filing, &self.info, &self.options)
    }

    /// Lay out the filing and assemble its table of contents.
    pub fn table_of_contents(&self) -> Result<TableOfContents> {
        let mut canvas = TextCanvas::new();
        let result = self.compose_into(&mut canvas)?;
        Ok(TableOfContents::from_positions(
            &result.headings,
            &result.citations,
            &canvas,
            &TocStyle::from_layout(&self.options),
        ))
    }

    /// The filing as a JSON snapshot.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.filing, format)
    }

    /// Filing information used for page chrome.
    pub fn info(&self) -> &FilingInfo {
        &self.info
    }
}
