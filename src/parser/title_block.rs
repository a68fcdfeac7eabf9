//! Detection of `=====`-bracketed title blocks.
//!
//! A title block is a run of lines between two marker lines. Each block is
//! laid out on a page of its own. An opening marker without a closer is not
//! an error; it is passed through as an ordinary line.

/// Default minimum number of `=` characters in a marker line.
pub const DEFAULT_MARKER_LEN: usize = 5;

/// Check if a line is a block marker: at least `min_len` `=` and nothing else
/// once trimmed.
pub fn is_marker_line(line: &str, min_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= min_len && trimmed.chars().all(|c| c == '=')
}

/// An item produced by [`TitleBlocks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem<'a> {
    /// An ordinary line
    Line(&'a str),
    /// The lines enclosed by a marker pair, markers removed
    Block(Vec<&'a str>),
}

/// Iterator splitting a line sequence into ordinary lines and title blocks.
///
/// # Example
///
/// ```
/// use pleading::parser::{LineItem, TitleBlocks};
///
/// let lines = ["intro", "=====", "EXHIBIT LIST", "=====", "outro"];
/// let items: Vec<_> = TitleBlocks::new(&lines).collect();
/// assert_eq!(items[1], LineItem::Block(vec!["EXHIBIT LIST"]));
/// ```
pub struct TitleBlocks<'a, S> {
    lines: &'a [S],
    pos: usize,
    marker_len: usize,
}

impl<'a, S: AsRef<str>> TitleBlocks<'a, S> {
    /// Scan `lines` with the default marker length.
    pub fn new(lines: &'a [S]) -> Self {
        Self::with_marker_len(lines, DEFAULT_MARKER_LEN)
    }

    /// Scan `lines` with a custom minimum marker length.
    pub fn with_marker_len(lines: &'a [S], marker_len: usize) -> Self {
        Self {
            lines,
            pos: 0,
            marker_len: marker_len.max(1),
        }
    }

    fn is_marker(&self, index: usize) -> bool {
        is_marker_line(self.lines[index].as_ref(), self.marker_len)
    }

    /// Index of the closing marker for an opener at `open`, if any.
    fn find_closer(&self, open: usize) -> Option<usize> {
        (open + 1..self.lines.len()).find(|&i| self.is_marker(i))
    }
}

impl<'a, S: AsRef<str>> Iterator for TitleBlocks<'a, S> {
    type Item = LineItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.lines.len() {
            return None;
        }

        let current = self.pos;
        if self.is_marker(current) {
            if let Some(close) = self.find_closer(current) {
                let inner = self.lines[current + 1..close]
                    .iter()
                    .map(|l| l.as_ref())
                    .collect();
                self.pos = close + 1;
                return Some(LineItem::Block(inner));
            }
            log::warn!(
                "unmatched title block marker at line {}; treating it as text",
                current + 1
            );
        }

        self.pos += 1;
        Some(LineItem::Line(self.lines[current].as_ref()))
    }
}

/// Text of every title block in `text`, each block's lines joined with `\n`.
pub fn extract_title_blocks(text: &str, marker_len: usize) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    TitleBlocks::with_marker_len(&lines, marker_len)
        .filter_map(|item| match item {
            LineItem::Block(block) => Some(block.join("\n")),
            LineItem::Line(_) => None,
        })
        .collect()
}
