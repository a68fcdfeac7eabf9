//! Two-pass pagination of a segment sequence.
//!
//! The counting pass and the render pass walk the same [`Pages`] iterator,
//! so a page break is decided in exactly one place. Rendering still checks
//! that it emitted the number of pages the counting pass predicted, because
//! the footer of every page already printed that number.
//!
//! A title block owns a whole page. When one is reached after text has been
//! placed on the current page, the page ends early and the block opens the
//! next one.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Segment, TextSegment, TitleBlockSegment};

use super::index::Indexer;

/// What a page holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Up to the line budget of text lines
    Text,
    /// One title block
    TitleBlock,
}

/// A page's share of the segment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    /// 1-indexed page number in the output document
    pub number: u32,
    /// Page contents
    pub kind: PageKind,
    /// First segment index
    pub start: usize,
    /// One past the last segment index
    pub end: usize,
}

impl PageSpan {
    /// Number of segments on the page.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the page holds no segment.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Page being rendered, as seen by a [`PageSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-indexed page number
    pub number: u32,
    /// Total pages in the output document
    pub total: u32,
    /// Page contents
    pub kind: PageKind,
}

/// A text line placed on a page.
#[derive(Debug, Clone, Copy)]
pub struct PlacedLine<'a> {
    /// Zero-based slot on the page (0 = top line)
    pub slot: usize,
    /// Document-wide line number
    pub number: u32,
    /// The segment
    pub segment: &'a TextSegment,
}

/// Receives the pages produced by [`Paginator::render`].
///
/// Page begin/end hooks default to doing nothing.
pub trait PageSink {
    /// Called before anything is placed on a page.
    fn begin_page(&mut self, page: &PageInfo) -> Result<()> {
        let _ = page;
        Ok(())
    }

    /// Place a text line.
    fn text_line(&mut self, page: &PageInfo, line: &PlacedLine<'_>) -> Result<()>;

    /// Place a title block; `number` is the line number it consumed.
    fn title_block(&mut self, page: &PageInfo, number: u32, block: &TitleBlockSegment) -> Result<()>;

    /// Called after the last element of a page.
    fn end_page(&mut self, page: &PageInfo) -> Result<()> {
        let _ = page;
        Ok(())
    }
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn begin_page(&mut self, page: &PageInfo) -> Result<()> {
        (**self).begin_page(page)
    }

    fn text_line(&mut self, page: &PageInfo, line: &PlacedLine<'_>) -> Result<()> {
        (**self).text_line(page, line)
    }

    fn title_block(&mut self, page: &PageInfo, number: u32, block: &TitleBlockSegment) -> Result<()> {
        (**self).title_block(page, number, block)
    }

    fn end_page(&mut self, page: &PageInfo) -> Result<()> {
        (**self).end_page(page)
    }
}

/// Totals of one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSummary {
    /// Pages emitted
    pub pages: u32,
    /// Pages holding a title block
    pub title_block_pages: u32,
    /// Text lines placed
    pub text_lines: u32,
    /// Last line number assigned (0 when nothing was rendered)
    pub last_line: u32,
    /// Headings recorded
    pub headings: u32,
    /// Citations recorded
    pub citations: u32,
}

/// Splits segments into pages of at most `max_lines` lines.
#[derive(Debug, Clone, Copy)]
pub struct Paginator<'a> {
    segments: &'a [Segment],
    max_lines: usize,
    first_page: u32,
}

impl<'a> Paginator<'a> {
    /// Create a paginator whose first page is numbered `first_page`.
    pub fn new(segments: &'a [Segment], max_lines: usize, first_page: u32) -> Result<Self> {
        if max_lines == 0 {
            return Err(Error::InvalidLayout(
                "page has room for zero lines".to_string(),
            ));
        }
        Ok(Self {
            segments,
            max_lines,
            first_page: first_page.max(1),
        })
    }

    /// Line budget per page.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Number of the first page.
    pub fn first_page(&self) -> u32 {
        self.first_page
    }

    /// Iterate page spans.
    pub fn pages(&self) -> Pages<'a> {
        Pages {
            segments: self.segments,
            max_lines: self.max_lines,
            pos: 0,
            number: self.first_page,
        }
    }

    /// Counting pass: pages the sequence occupies.
    pub fn count_pages(&self) -> u32 {
        self.pages().count() as u32
    }

    /// Render pass.
    ///
    /// Every text segment and title block consumes one line number, starting
    /// at 1. Headings and citations are recorded into `indexer` with the
    /// page and line assigned here. `total_pages` is only passed through to
    /// the sink for footers.
    pub fn render<S: PageSink + ?Sized>(
        &self,
        sink: &mut S,
        indexer: &mut Indexer,
        total_pages: u32,
    ) -> Result<PaginationSummary> {
        let counted = self.count_pages();
        let mut summary = PaginationSummary::default();

        for span in self.pages() {
            let page = PageInfo {
                number: span.number,
                total: total_pages,
                kind: span.kind,
            };
            sink.begin_page(&page)?;

            for (slot, index) in (span.start..span.end).enumerate() {
                let number = index as u32 + 1;
                match &self.segments[index] {
                    Segment::TitleBlock(block) => {
                        sink.title_block(&page, number, block)?;
                        summary.title_block_pages += 1;
                    }
                    Segment::Text(segment) => {
                        if segment.is_any_heading() {
                            indexer.record_heading(
                                &segment.text,
                                page.number,
                                number,
                                segment.is_subheading,
                            );
                            summary.headings += 1;
                        }
                        summary.citations +=
                            indexer.scan_line(&segment.text, page.number, number) as u32;

                        sink.text_line(&page, &PlacedLine { slot, number, segment })?;
                        summary.text_lines += 1;
                    }
                }
                summary.last_line = number;
            }

            sink.end_page(&page)?;
            summary.pages += 1;
        }

        if summary.pages != counted {
            return Err(Error::PageCountMismatch {
                counted,
                rendered: summary.pages,
            });
        }

        log::debug!(
            "rendered {} pages ({} title blocks), {} lines",
            summary.pages,
            summary.title_block_pages,
            summary.last_line
        );
        Ok(summary)
    }
}

/// Iterator over the [`PageSpan`]s of a segment sequence.
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    segments: &'a [Segment],
    max_lines: usize,
    pos: usize,
    number: u32,
}

impl Iterator for Pages<'_> {
    type Item = PageSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let first = self.segments.get(start)?;

        let (kind, end) = if first.forces_new_page() {
            (PageKind::TitleBlock, start + 1)
        } else {
            let limit = (start + self.max_lines).min(self.segments.len());
            let end = (start..limit)
                .find(|&i| self.segments[i].forces_new_page())
                .unwrap_or(limit);
            (PageKind::Text, end)
        };

        let span = PageSpan {
            number: self.number,
            kind,
            start,
            end,
        };
        self.pos = end;
        self.number += 1;
        Some(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontSpec;

    fn text(s: &str) -> Segment {
        TextSegment::body(s, FontSpec::regular(10.0), Default::default()).into()
    }

    fn block(s: &str) -> Segment {
        TitleBlockSegment::new(&[s]).into()
    }

    #[derive(Default)]
    struct Recorder {
        pages: Vec<(u32, PageKind, Vec<u32>)>,
    }

    impl PageSink for Recorder {
        fn begin_page(&mut self, page: &PageInfo) -> Result<()> {
            self.pages.push((page.number, page.kind, Vec::new()));
            Ok(())
        }

        fn text_line(&mut self, _page: &PageInfo, line: &PlacedLine<'_>) -> Result<()> {
            if let Some(last) = self.pages.last_mut() {
                last.2.push(line.number);
            }
            Ok(())
        }

        fn title_block(&mut self, _page: &PageInfo, number: u32, _block: &TitleBlockSegment) -> Result<()> {
            if let Some(last) = self.pages.last_mut() {
                last.2.push(number);
            }
            Ok(())
        }
    }

    #[test]
    fn test_zero_budget_rejected() {
        assert!(matches!(
            Paginator::new(&[], 0, 1),
            Err(Error::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_empty_sequence() {
        let p = Paginator::new(&[], 10, 1).unwrap();
        assert_eq!(p.count_pages(), 0);
        let summary = p.render(&mut Recorder::default(), &mut Indexer::default(), 0).unwrap();
        assert_eq!(summary, PaginationSummary::default());
    }

    #[test]
    fn test_chunks_by_budget() {
        let segs: Vec<Segment> = (0..7).map(|i| text(&i.to_string())).collect();
        let p = Paginator::new(&segs, 3, 1).unwrap();
        let lens: Vec<usize> = p.pages().map(|s| s.len()).collect();
        assert_eq!(lens, vec![3, 3, 1]);
    }

    #[test]
    fn test_block_owns_page() {
        let segs = vec![text("a"), text("b"), block("TITLE"), text("c")];
        let p = Paginator::new(&segs, 10, 2).unwrap();
        let mut rec = Recorder::default();
        let summary = p.render(&mut rec, &mut Indexer::default(), 4).unwrap();

        assert_eq!(
            rec.pages,
            vec![
                (2, PageKind::Text, vec![1, 2]),
                (3, PageKind::TitleBlock, vec![3]),
                (4, PageKind::Text, vec![4]),
            ]
        );
        assert_eq!(summary.pages, 3);
        assert_eq!(summary.title_block_pages, 1);
        assert_eq!(summary.last_line, 4);
    }

    #[test]
    fn test_consecutive_blocks() {
        let segs = vec![block("A"), block("B")];
        let p = Paginator::new(&segs, 10, 1).unwrap();
        assert_eq!(p.count_pages(), 2);
        assert!(p.pages().all(|s| s.kind == PageKind::TitleBlock && s.len() == 1));
    }

    #[test]
    fn test_headings_and_citations_recorded() {
        let mut heading = TextSegment::body("I FACTS", FontSpec::bold(10.0), Default::default());
        heading.is_heading = true;
        let segs = vec![heading.into(), text("see RCW 4.84"), block("X"), text("RCW 9.1")];
        let p = Paginator::new(&segs, 10, 1).unwrap();
        let mut indexer = Indexer::new(vec![
            crate::layout::CitationPattern::new(r"RCW \d+\.\d+", 0).unwrap(),
        ]);
        let summary = p.render(&mut Recorder::default(), &mut indexer, 3).unwrap();

        assert_eq!(summary.headings, 1);
        assert_eq!(summary.citations, 2);
        assert_eq!(indexer.headings()[0].label(), "1:1");
        let labels: Vec<_> = indexer.citations().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["1:2", "3:4"]);
    }
}
