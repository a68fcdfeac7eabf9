//! Plain-text filing parser.
//!
//! Splits raw text into a header block and numbered sections, and finds the
//! `=====`-bracketed title blocks inside them.

mod heading;
mod options;
mod title_block;

pub use heading::{is_all_caps, parse_bytes, parse_heading, parse_str, ParsedFiling};
pub use options::ParseOptions;
pub use title_block::{extract_title_blocks, is_marker_line, LineItem, TitleBlocks, DEFAULT_MARKER_LEN};
