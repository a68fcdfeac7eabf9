//! Composition result with positions and statistics.

use serde::{Deserialize, Serialize};

use crate::layout::{Indexer, PaginationSummary};
use crate::model::{CitationPosition, HeadingPosition};

/// Result of composing a filing onto a canvas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComposeResult {
    /// Headings in render order
    pub headings: Vec<HeadingPosition>,

    /// Citations in render order
    pub citations: Vec<CitationPosition>,

    /// Layout statistics
    pub stats: LayoutStats,
}

impl ComposeResult {
    /// Collect the positions recorded by `indexer`.
    pub fn new(indexer: Indexer, stats: LayoutStats) -> Self {
        let (headings, citations) = indexer.into_positions();
        Self {
            headings,
            citations,
            stats,
        }
    }

    /// Pages in the composed document.
    pub fn total_pages(&self) -> u32 {
        self.stats.total_pages()
    }
}

/// Statistics collected during composition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutStats {
    /// Cover pages (0 or 1)
    pub cover_pages: u32,

    /// Body pages holding text lines
    pub text_pages: u32,

    /// Body pages holding a title block
    pub title_block_pages: u32,

    /// Exhibit pages
    pub exhibit_pages: u32,

    /// Text lines placed on body pages
    pub lines: u32,

    /// Last line number assigned
    pub last_line: u32,

    /// Headings recorded
    pub headings: u32,

    /// Citations recorded
    pub citations: u32,

    /// Exhibits whose image was replaced by a placeholder
    pub placeholders: u32,
}

impl LayoutStats {
    /// Fold in a pagination summary for the body.
    pub fn add_body(&mut self, summary: &PaginationSummary) {
        self.text_pages += summary.pages - summary.title_block_pages;
        self.title_block_pages += summary.title_block_pages;
        self.lines += summary.text_lines;
        self.last_line = self.last_line.max(summary.last_line);
        self.headings += summary.headings;
        self.citations += summary.citations;
    }

    /// Body pages.
    pub fn body_pages(&self) -> u32 {
        self.text_pages + self.title_block_pages
    }

    /// All pages.
    pub fn total_pages(&self) -> u32 {
        self.cover_pages + self.body_pages() + self.exhibit_pages
    }
}
