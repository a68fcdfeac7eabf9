//! Table of contents assembled from recorded heading and citation positions.
//!
//! Entries are laid out headings first, then citations, each in render
//! order. Long entries wrap; only the first display line of an entry carries
//! its `page:line` label.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{wrap_text, Indexer, TextMeasure};
use crate::model::{CitationPosition, FontSpec, HeadingPosition};

use super::canvas::{Canvas, TextAlign};
use super::chrome::PageChrome;
use super::json::{to_json, JsonFormat};
use super::metrics::ApproximateMetrics;
use super::options::{LayoutOptions, INCH};

/// What a table of contents entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TocEntryKind {
    /// Section heading
    Heading,
    /// Subsection heading
    Subheading,
    /// Citation
    Citation,
}

/// One table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Entry kind
    pub kind: TocEntryKind,
    /// Heading or citation text
    pub text: String,
    /// Page the entry was rendered on
    pub page: u32,
    /// Document-wide line number
    pub line: u32,
    /// `page:line`
    pub label: String,
}

impl From<&HeadingPosition> for TocEntry {
    fn from(h: &HeadingPosition) -> Self {
        Self {
            kind: if h.is_subheading {
                TocEntryKind::Subheading
            } else {
                TocEntryKind::Heading
            },
            text: h.text.clone(),
            page: h.page,
            line: h.line,
            label: h.label(),
        }
    }
}

impl From<&CitationPosition> for TocEntry {
    fn from(c: &CitationPosition) -> Self {
        Self {
            kind: TocEntryKind::Citation,
            text: c.text.clone(),
            page: c.page,
            line: c.line,
            label: c.label(),
        }
    }
}

/// A display line of the table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct TocLine {
    /// Wrapped entry text
    pub text: String,
    /// `page:line`, on the first line of an entry only
    pub label: Option<String>,
    /// Font
    pub font: FontSpec,
}

/// Geometry and fonts of the index pages.
#[derive(Debug, Clone)]
pub struct TocStyle {
    /// Page width
    pub page_width: f32,
    /// Page height
    pub page_height: f32,
    /// Section heading font
    pub heading_font: FontSpec,
    /// Subsection heading font
    pub subheading_font: FontSpec,
    /// Citation font
    pub citation_font: FontSpec,
    /// `TABLE OF CONTENTS` font
    pub title_font: FontSpec,
    /// Distance between entry lines
    pub line_spacing: f32,
}

impl TocStyle {
    /// Index page style matching a body layout.
    pub fn from_layout(options: &LayoutOptions) -> Self {
        Self {
            page_width: options.page_width(),
            page_height: options.page_height(),
            line_spacing: options.line_spacing,
            ..Default::default()
        }
    }

    fn font(&self, kind: TocEntryKind) -> FontSpec {
        match kind {
            TocEntryKind::Heading => self.heading_font,
            TocEntryKind::Subheading => self.subheading_font,
            TocEntryKind::Citation => self.citation_font,
        }
    }

    /// Widest entry text before wrapping.
    pub fn max_entry_width(&self) -> f32 {
        self.page_width - INCH - 1.5 * INCH
    }

    /// Entry lines per index page (at least one).
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height - 2.0 * INCH - INCH;
        if self.line_spacing <= 0.0 {
            return 1;
        }
        ((usable / self.line_spacing).floor() as usize).max(1)
    }
}

impl Default for TocStyle {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            heading_font: FontSpec::bold(10.0),
            subheading_font: FontSpec::regular(9.0),
            citation_font: FontSpec::regular(9.0),
            title_font: FontSpec::bold(14.0),
            line_spacing: 0.25 * INCH,
        }
    }
}

/// Paginated table of contents.
///
/// Only the entries are serialized. Deserializing lays them out again with
/// [`ApproximateMetrics`] and the default Letter [`TocStyle`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "StoredEntries")]
pub struct TableOfContents {
    entries: Vec<TocEntry>,
    #[serde(skip)]
    lines: Vec<TocLine>,
    #[serde(skip)]
    style: TocStyle,
}

impl TableOfContents {
    /// Lay out the positions recorded by `indexer`.
    pub fn assemble<M: TextMeasure + ?Sized>(indexer: &Indexer, measure: &M, style: &TocStyle) -> Self {
        Self::from_positions(indexer.headings(), indexer.citations(), measure, style)
    }

    /// Lay out heading and citation positions.
    pub fn from_positions<M: TextMeasure + ?Sized>(
        headings: &[HeadingPosition],
        citations: &[CitationPosition],
        measure: &M,
        style: &TocStyle,
    ) -> Self {
        let entries = headings
            .iter()
            .map(TocEntry::from)
            .chain(citations.iter().map(TocEntry::from))
            .collect();
        Self::from_entries(entries, measure, style)
    }

    /// Lay out entries that are already in display order.
    pub fn from_entries<M: TextMeasure + ?Sized>(entries: Vec<TocEntry>, measure: &M, style: &TocStyle) -> Self {
        let mut lines = Vec::new();
        for entry in &entries {
            let font = style.font(entry.kind);
            let wrapped = wrap_text(measure, &entry.text, &font, style.max_entry_width());
            for (i, line) in wrapped.into_iter().enumerate() {
                lines.push(TocLine {
                    text: line.text,
                    label: (i == 0).then(|| entry.label.clone()),
                    font,
                });
            }
        }

        Self {
            entries,
            lines,
            style: style.clone(),
        }
    }

    /// Lay the entries out again with another style.
    pub fn restyle<M: TextMeasure + ?Sized>(self, measure: &M, style: &TocStyle) -> Self {
        Self::from_entries(self.entries, measure, style)
    }

    /// Entries, headings first.
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Display lines.
    pub fn lines(&self) -> &[TocLine] {
        &self.lines
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display lines grouped by index page; an empty table still has one
    /// page.
    pub fn pages(&self) -> Vec<&[TocLine]> {
        if self.lines.is_empty() {
            return vec![&self.lines[..]];
        }
        self.lines.chunks(self.style.lines_per_page()).collect()
    }

    /// Number of index pages.
    pub fn page_count(&self) -> u32 {
        self.pages().len() as u32
    }

    /// Draw the index pages onto `canvas`.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, chrome: &PageChrome<'_>) -> Result<u32> {
        let style = &self.style;
        let pages = self.pages();
        let total = pages.len() as u32;

        for (i, lines) in pages.into_iter().enumerate() {
            canvas.start_new_page()?;
            chrome.draw(canvas, &format!("Index Page {} of {}", i + 1, total))?;
            canvas.draw_text(
                style.page_width / 2.0,
                style.page_height - 0.75 * INCH,
                "TABLE OF CONTENTS",
                &style.title_font,
                TextAlign::Center,
            )?;

            let mut y = style.page_height - 1.75 * INCH;
            for line in lines {
                canvas.draw_text(INCH, y, &line.text, &line.font, TextAlign::Left)?;
                if let Some(label) = &line.label {
                    canvas.draw_text(style.page_width - 0.7 * INCH, y, label, &line.font, TextAlign::Right)?;
                }
                y -= style.line_spacing;
            }
        }

        log::debug!("table of contents: {} entries on {} pages", self.entries.len(), total);
        Ok(total)
    }

    /// Entries as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(self, format)
    }

    /// Plain-text listing with labels right-aligned at `width` characters.
    pub fn to_text(&self, width: usize) -> String {
        let mut out = String::from("TABLE OF CONTENTS\n\n");
        for line in &self.lines {
            match &line.label {
                Some(label) => {
                    let used = line.text.chars().count() + label.len();
                    let pad = width.saturating_sub(used).max(1);
                    out.push_str(&line.text);
                    out.push_str(&" ".repeat(pad));
                    out.push_str(label);
                }
                None => out.push_str(&line.text),
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Deserialize)]
struct StoredEntries {
    entries: Vec<TocEntry>,
}

impl From<StoredEntries> for TableOfContents {
    fn from(stored: StoredEntries) -> Self {
        Self::from_entries(stored.entries, &ApproximateMetrics, &TocStyle::default())
    }
}
