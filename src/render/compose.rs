//! Page composition: cover, numbered body pages and exhibits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{
    wrap_text, Indexer, PageInfo, PageKind, PageSink, Paginator, PlacedLine, SegmentBuilder,
};
use crate::model::{
    Alignment, Exhibit, Filing, FontSpec, Segment, TitleBlockSegment, META_COURT, META_DOCUMENT_TITLE,
};

use super::canvas::{Canvas, TextAlign};
use super::chrome::{page_footer, PageChrome};
use super::options::{LayoutOptions, INCH};
use super::result::{ComposeResult, LayoutStats};

/// Who is filing, for what case, and optional cover page text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilingInfo {
    /// Firm name printed along the left edge
    pub firm_name: String,

    /// Case name printed at the top of every page
    pub case_name: String,

    /// Cover page lines; no cover page when empty
    pub cover_lines: Vec<String>,

    /// Document title
    pub title: Option<String>,

    /// Court name
    pub court: Option<String>,

    /// Filing date
    pub date_filed: Option<NaiveDate>,
}

impl FilingInfo {
    /// Create filing info for a firm and case.
    pub fn new(firm_name: impl Into<String>, case_name: impl Into<String>) -> Self {
        Self {
            firm_name: firm_name.into(),
            case_name: case_name.into(),
            ..Default::default()
        }
    }

    /// Take firm, case and header metadata from a filing.
    pub fn from_filing(filing: &Filing) -> Self {
        let header = &filing.header;
        Self {
            firm_name: filing.law_firm_information.clone(),
            case_name: filing.case_information.clone(),
            cover_lines: Vec::new(),
            title: header.meta(META_DOCUMENT_TITLE).map(String::from),
            court: header.meta(META_COURT).map(String::from),
            date_filed: header.date_filed(),
        }
    }

    /// Set cover page lines.
    pub fn with_cover_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cover_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Check if a cover page is rendered.
    pub fn has_cover(&self) -> bool {
        !self.cover_lines.is_empty()
    }

    /// Document subject line: court and filing date, if known.
    pub fn subject(&self) -> Option<String> {
        match (&self.court, self.date_filed) {
            (Some(court), Some(date)) => Some(format!("{}, filed {}", court, date.format("%Y-%m-%d"))),
            (Some(court), None) => Some(court.clone()),
            (None, Some(date)) => Some(format!("Filed {}", date.format("%Y-%m-%d"))),
            (None, None) => None,
        }
    }
}

/// Compose a filing onto `canvas`.
///
/// Pages are emitted in order: the optional cover, the body pages from the
/// paginator, then one page per exhibit. Every footer shows the final page
/// count, which is known before the first page is drawn.
pub fn compose<C: Canvas + ?Sized>(
    filing: &Filing,
    info: &FilingInfo,
    options: &LayoutOptions,
    canvas: &mut C,
) -> Result<ComposeResult> {
    Composer::new(info, options).compose(filing, canvas)
}

/// Composes filings with one set of options.
pub struct Composer<'a> {
    info: &'a FilingInfo,
    options: &'a LayoutOptions,
}

impl<'a> Composer<'a> {
    /// Create a composer.
    pub fn new(info: &'a FilingInfo, options: &'a LayoutOptions) -> Self {
        Self { info, options }
    }

    /// Build the body segments, wrapped with `canvas`'s measurement.
    pub fn segments<C: Canvas + ?Sized>(&self, filing: &Filing, canvas: &C) -> Vec<Segment> {
        let options = self.options;
        SegmentBuilder::new(canvas, &options.styles, options.text_width())
            .with_alignment(options.alignment_policy())
            .with_marker_len(options.marker_min_len)
            .build_sections(&filing.header, &filing.sections)
    }

    /// Compose all pages onto `canvas`.
    pub fn compose<C: Canvas + ?Sized>(&self, filing: &Filing, canvas: &mut C) -> Result<ComposeResult> {
        let options = self.options;
        options.validate()?;

        let segments = self.segments(filing, canvas);
        let exhibits = filing.exhibit_list();

        let mut stats = LayoutStats {
            cover_pages: u32::from(self.info.has_cover()),
            ..Default::default()
        };
        let paginator = Paginator::new(&segments, options.max_lines_per_page(), stats.cover_pages + 1)?;
        let body_pages = paginator.count_pages();
        let total = stats.cover_pages + body_pages + exhibits.len() as u32;
        log::debug!(
            "composing {} pages: {} cover, {} body, {} exhibits",
            total,
            stats.cover_pages,
            body_pages,
            exhibits.len()
        );

        let chrome = PageChrome::new(&self.info.firm_name, &self.info.case_name, options);

        if self.info.has_cover() {
            self.draw_cover(canvas)?;
        }

        let mut indexer = Indexer::new(options.citations.clone());
        let mut sink = BodySink {
            canvas: &mut *canvas,
            chrome,
        };
        let summary = paginator.render(&mut sink, &mut indexer, total)?;
        stats.add_body(&summary);

        for (i, exhibit) in exhibits.into_iter().enumerate() {
            let number = stats.cover_pages + body_pages + i as u32 + 1;
            if !self.draw_exhibit(canvas, &chrome, exhibit, number, total)? {
                stats.placeholders += 1;
            }
            stats.exhibit_pages += 1;
        }

        Ok(ComposeResult::new(indexer, stats))
    }

    fn draw_cover<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<()> {
        let o = self.options;
        let (width, height) = (o.page_width(), o.page_height());
        canvas.start_new_page()?;
        canvas.draw_rect(0.5 * INCH, 0.5 * INCH, width - INCH, height - INCH, 1.0)?;

        let mut y = height - INCH;
        for line in &self.info.cover_lines {
            canvas.draw_text(INCH, y, line, &o.cover_font, TextAlign::Left)?;
            y -= 18.0;
        }
        Ok(())
    }

    /// Draw one exhibit page; `false` when the image was replaced by a
    /// placeholder.
    fn draw_exhibit<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        chrome: &PageChrome<'_>,
        exhibit: &Exhibit,
        number: u32,
        total: u32,
    ) -> Result<bool> {
        let o = self.options;
        let (width, height) = (o.page_width(), o.page_height());
        let spacing = o.line_spacing;
        let caption_font = FontSpec::regular(10.0);

        canvas.start_new_page()?;
        chrome.draw(canvas, &page_footer(number, total))?;

        let floor = 0.5 * INCH;
        let mut y = height - 1.2 * INCH;
        let mut last_y = y;
        let lines = wrap_text(&*canvas, &exhibit.caption, &caption_font, width - 2.4 * INCH);
        let line_count = lines.len();
        for (i, line) in lines.into_iter().enumerate() {
            if y < floor {
                log::warn!(
                    "exhibit page {}: caption cut after {} of {} lines",
                    number,
                    i,
                    line_count
                );
                break;
            }
            canvas.draw_text(1.2 * INCH, y, &line.text, &caption_font, TextAlign::Left)?;
            last_y = y;
            y -= spacing;
        }

        let area_top = (last_y - spacing).max(floor);
        let area_width = width - INCH;
        let area_height = area_top - floor;

        let placed = if area_height < 1.0 {
            Err(Error::ImageLoad {
                path: exhibit.image_path.clone(),
                reason: "caption leaves no room for the image".to_string(),
            })
        } else {
            canvas.image_size(&exhibit.image_path).and_then(|(iw, ih)| {
                let scale = (area_width / iw).min(area_height / ih).min(1.0);
                let (w, h) = (iw * scale, ih * scale);
                let x = floor + (area_width - w) / 2.0;
                canvas.draw_image(&exhibit.image_path, x, floor, w, h)
            })
        };

        match placed {
            Ok(()) => Ok(true),
            Err(e) if e.is_recoverable() => {
                log::warn!("exhibit page {}: {}", number, e);
                let reason = match &e {
                    Error::ImageLoad { reason, .. } => reason.clone(),
                    other => other.to_string(),
                };
                let message = format!(
                    "Unable to load image: {} Error: {}",
                    exhibit.image_path.display(),
                    reason
                );
                canvas.draw_text(
                    width / 2.0,
                    height / 2.0,
                    &message,
                    &FontSpec::oblique(10.0),
                    TextAlign::Center,
                )?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

/// Draws paginator output onto a canvas.
struct BodySink<'c, C: ?Sized> {
    canvas: &'c mut C,
    chrome: PageChrome<'c>,
}

impl<C: Canvas + ?Sized> PageSink for BodySink<'_, C> {
    fn begin_page(&mut self, page: &PageInfo) -> Result<()> {
        self.canvas.start_new_page()?;
        self.chrome
            .draw(&mut *self.canvas, &page_footer(page.number, page.total))
    }

    fn text_line(&mut self, page: &PageInfo, line: &PlacedLine<'_>) -> Result<()> {
        debug_assert_eq!(page.kind, PageKind::Text);
        let o = self.chrome.options();
        let y = o.text_top() - line.slot as f32 * o.line_spacing;
        self.chrome.draw_line_number(&mut *self.canvas, y, line.number)?;

        let segment = line.segment;
        if segment.text.is_empty() {
            return Ok(());
        }
        match segment.alignment {
            Alignment::Left => {
                self.canvas
                    .draw_text(o.margins.left, y, &segment.text, &segment.font, TextAlign::Left)
            }
            Alignment::Center => self.canvas.draw_text(
                o.text_center(),
                y,
                &segment.text,
                &segment.font,
                TextAlign::Center,
            ),
        }
    }

    fn title_block(&mut self, _page: &PageInfo, _number: u32, block: &TitleBlockSegment) -> Result<()> {
        self.chrome.draw_title_block(&mut *self.canvas, block)
    }
}
