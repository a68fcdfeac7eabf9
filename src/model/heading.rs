//! Heading keys and sections.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::OrderedMap;

/// Whether a heading opens a top-level section or a nested subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingStyle {
    /// Depth 0 or 1 (`I.`, `2.`)
    Section,
    /// Depth 2 or more (`1.1`, `II.3.`)
    Subsection,
}

impl HeadingStyle {
    /// Classify a numbering depth.
    pub fn from_depth(depth: usize) -> Self {
        if depth > 1 {
            HeadingStyle::Subsection
        } else {
            HeadingStyle::Section
        }
    }

    /// Check if this is a subsection.
    pub fn is_subsection(self) -> bool {
        self == HeadingStyle::Subsection
    }
}

/// A parsed heading: numbering token plus all-caps title.
///
/// The numbering token is stored without its trailing dot, so
/// `"I. INTRODUCTION"` becomes number `I`, title `INTRODUCTION`, and the key
/// displays as `I INTRODUCTION`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct HeadingKey {
    number: String,
    title: String,
}

impl HeadingKey {
    /// Build a key from a numbering token and a title.
    pub fn new(number: impl Into<String>, title: impl Into<String>) -> Self {
        let number = number.into();
        let number = number.strip_suffix('.').unwrap_or(&number).to_string();
        Self {
            number,
            title: title.into().trim().to_string(),
        }
    }

    /// Parse a heading line; `None` if the line is body text.
    pub fn parse(line: &str) -> Option<Self> {
        crate::parser::parse_heading(line)
    }

    /// The numbering token, without trailing dot.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The heading title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Number of numeral groups in the token (`1` → 1, `1.1` → 2).
    pub fn depth(&self) -> usize {
        self.number.split('.').filter(|g| !g.is_empty()).count()
    }

    /// Section or subsection, by depth.
    pub fn style(&self) -> HeadingStyle {
        HeadingStyle::from_depth(self.depth())
    }
}

impl fmt::Display for HeadingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.title)
    }
}

impl From<HeadingKey> for String {
    fn from(key: HeadingKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for HeadingKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().split_once(char::is_whitespace) {
            Some((number, title)) if !number.is_empty() => Ok(HeadingKey::new(number, title)),
            _ => Err(format!("heading key needs a number and a title: '{}'", value)),
        }
    }
}

/// Sections of a filing: heading key → body text, in source order.
pub type Sections = OrderedMap<HeadingKey, String>;

/// A borrowed view of one section.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    /// The heading
    pub key: &'a HeadingKey,
    /// Body text (lines joined with `\n`)
    pub body: &'a str,
}

impl<'a> Section<'a> {
    /// Section or subsection.
    pub fn style(&self) -> HeadingStyle {
        self.key.style()
    }
}

/// Iterate sections as [`Section`] views.
pub fn sections_of(sections: &Sections) -> impl Iterator<Item = Section<'_>> {
    sections.iter().map(|(key, body)| Section {
        key,
        body: body.as_str(),
    })
}

/// Style for every heading in `sections`, keyed like the sections.
pub fn classify_headings(sections: &Sections) -> OrderedMap<HeadingKey, HeadingStyle> {
    sections
        .keys()
        .map(|key| (key.clone(), key.style()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_strips_trailing_dot() {
        let key = HeadingKey::new("I.", "INTRODUCTION");
        assert_eq!(key.number(), "I");
        assert_eq!(key.to_string(), "I INTRODUCTION");
    }

    #[test]
    fn test_depth_and_style() {
        assert_eq!(HeadingKey::new("1.", "A").depth(), 1);
        assert_eq!(HeadingKey::new("1.1", "A").depth(), 2);
        assert_eq!(HeadingKey::new("II.3.", "A").depth(), 2);
        assert_eq!(HeadingKey::new("1.", "A").style(), HeadingStyle::Section);
        assert_eq!(HeadingKey::new("1.1", "A").style(), HeadingStyle::Subsection);
    }

    #[test]
    fn test_string_round_trip() {
        let key = HeadingKey::new("2.1.", "RELIEF SOUGHT");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2.1 RELIEF SOUGHT\"");
        let back: HeadingKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn test_try_from_rejects_bare_word() {
        assert!(HeadingKey::try_from("INTRODUCTION".to_string()).is_err());
    }

    #[test]
    fn test_classify_headings() {
        let mut sections = Sections::new();
        sections.insert(HeadingKey::new("I.", "FACTS"), String::new());
        sections.insert(HeadingKey::new("I.1.", "TIMELINE"), String::new());
        let styles = classify_headings(&sections);
        let values: Vec<_> = styles.values().copied().collect();
        assert_eq!(values, vec![HeadingStyle::Section, HeadingStyle::Subsection]);
    }
}
