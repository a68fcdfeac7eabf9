//! Line wrapping, segment building, pagination and indexing.
//!
//! This is the core of the crate. It is independent of any output format:
//! widths come from a [`TextMeasure`] and pages go to a [`PageSink`].

mod align;
mod index;
mod paginate;
mod segments;
mod wrap;

pub use align::{
    AlignMode, AlignmentPolicy, CapsCentered, LeadShortRunCentered, LeftOnly, LineClass,
    LineContext, ListMarkersLeft, ShortRunCentered, LIST_BULLETS,
};
pub use index::{
    citation_patterns_from_json, load_citation_patterns, CitationPattern, CitationRule, Indexer,
};
pub use paginate::{
    PageInfo, PageKind, PageSink, PageSpan, Pages, PaginationSummary, Paginator, PlacedLine,
};
pub use segments::{SegmentBuilder, SegmentStyles};
pub use wrap::{wrap_text, LineWrapper, TextMeasure, WrappedLine};

#[cfg(test)]
pub(crate) use wrap::tests::FixedWidth;
