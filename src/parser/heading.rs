//! Heading recognition and header/section splitting.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{Filing, HeaderBlock, HeadingKey, Sections};

use super::options::ParseOptions;
use super::title_block::extract_title_blocks;

/// Numbering token (Roman or decimal groups joined by dots), whitespace, title.
const HEADING_PATTERN: &str =
    r"^((?:(?i:[ivxlcdm]+)|[0-9]+)(?:\.(?:(?i:[ivxlcdm]+)|[0-9]+))*\.?)\s+(.*)$";

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADING_PATTERN).expect("heading pattern is valid"))
}

/// Check if text has at least one uppercase letter and no lowercase letter.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Parse a heading line such as `"II. PARTIES"` or `"1.1 BACKGROUND"`.
///
/// The numbering token must contain at least one dot and the title must be
/// all caps; anything else is body text.
pub fn parse_heading(line: &str) -> Option<HeadingKey> {
    let caps = heading_regex().captures(line)?;
    let number = caps.get(1)?.as_str();
    let title = caps.get(2)?.as_str().trim();

    if !number.contains('.') || !is_all_caps(title) {
        return None;
    }
    Some(HeadingKey::new(number, title))
}

/// Result of splitting raw text into header and sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFiling {
    /// Lines before the first heading
    pub header: HeaderBlock,
    /// Sections in source order
    pub sections: Sections,
    /// Text of each title block found anywhere in the input
    pub documents: Vec<String>,
}

impl ParsedFiling {
    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Turn the parse result into a [`Filing`] for a case and firm.
    pub fn into_filing(
        self,
        case_information: impl Into<String>,
        law_firm_information: impl Into<String>,
    ) -> Filing {
        let mut filing = Filing::new(case_information, law_firm_information);
        filing.header = self.header;
        filing.sections = self.sections;
        for text in self.documents {
            filing.add_document(text);
        }
        filing
    }
}

/// Split raw text into a header block and ordered sections.
pub fn parse_str(text: &str, options: &ParseOptions) -> ParsedFiling {
    let normalized;
    let text = if options.normalize_unicode {
        normalized = text.nfc().collect::<String>();
        normalized.as_str()
    } else {
        text
    };

    let mut header_lines: Vec<&str> = Vec::new();
    let mut sections = Sections::new();
    let mut current: Option<(HeadingKey, Vec<&str>)> = None;

    for line in text.lines() {
        match parse_heading(line) {
            Some(key) => {
                if let Some((done, body)) = current.take() {
                    insert_section(&mut sections, done, &body);
                }
                current = Some((key, Vec::new()));
            }
            None => match current.as_mut() {
                Some((_, body)) => body.push(line),
                None => header_lines.push(line),
            },
        }
    }
    if let Some((done, body)) = current.take() {
        insert_section(&mut sections, done, &body);
    }

    let documents = extract_title_blocks(text, options.marker_min_len);
    log::debug!(
        "parsed {} header lines, {} sections, {} title blocks",
        header_lines.len(),
        sections.len(),
        documents.len()
    );

    ParsedFiling {
        header: HeaderBlock::new(header_lines.join("\n")),
        sections,
        documents,
    }
}

fn insert_section(sections: &mut Sections, key: HeadingKey, body: &[&str]) {
    if sections.insert(key.clone(), body.join("\n")).is_some() {
        log::warn!("duplicate heading '{}' replaces the earlier section body", key);
    }
}

/// Split raw bytes into header and sections, rejecting non-text input.
pub fn parse_bytes(data: &[u8], options: &ParseOptions) -> Result<ParsedFiling> {
    let text = crate::detect::decode_text(data)?;
    Ok(parse_str(&text, options))
}
