//! Filing model types.
//!
//! These types sit between parsing and layout: the parser fills a header
//! block and an ordered set of sections, the segment builder turns them into
//! [`Segment`]s, and rendering records [`HeadingPosition`]s and
//! [`CitationPosition`]s for the table of contents.

mod filing;
mod heading;
mod ordered;
mod position;
mod segment;

pub use filing::{Exhibit, Filing, HeaderBlock, META_COURT, META_DATE_FILED, META_DOCUMENT_TITLE};
pub use heading::{classify_headings, sections_of, HeadingKey, HeadingStyle, Section, Sections};
pub use ordered::OrderedMap;
pub use position::{CitationPosition, HeadingPosition};
pub use segment::{Alignment, FontName, FontSpec, Segment, TextSegment, TitleBlockSegment};
