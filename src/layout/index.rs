//! Heading and citation positions collected while pages are rendered.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{CitationPosition, HeadingPosition};

/// A citation-recognition rule: a regex and the capture group holding the
/// citation text.
#[derive(Debug, Clone)]
pub struct CitationPattern {
    regex: Regex,
    group: usize,
}

impl CitationPattern {
    /// Compile a pattern. `group` 0 means the whole match.
    pub fn new(pattern: &str, group: usize) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidCitationPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let groups = regex.captures_len();
        if group >= groups {
            return Err(Error::CitationGroupOutOfRange {
                pattern: pattern.to_string(),
                group,
                groups,
            });
        }
        Ok(Self { regex, group })
    }

    /// The pattern source.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// The capture group used as citation text.
    pub fn group(&self) -> usize {
        self.group
    }

    /// Every non-empty citation in `text`, trimmed, in order.
    pub fn find_all<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.regex.captures_iter(text).filter_map(move |caps| {
            caps.get(self.group)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
        })
    }
}

/// Serialized form of a [`CitationPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRule {
    /// Regex source
    pub pattern: String,
    /// Capture group with the citation text
    #[serde(default)]
    pub group: usize,
}

impl CitationRule {
    /// Compile the rule.
    pub fn compile(&self) -> Result<CitationPattern> {
        CitationPattern::new(&self.pattern, self.group)
    }
}

/// Parse and compile a JSON list of `{ "pattern": .., "group": .. }` rules.
pub fn citation_patterns_from_json(json: &str) -> Result<Vec<CitationPattern>> {
    let rules: Vec<CitationRule> = serde_json::from_str(json)
        .map_err(|e| Error::Other(format!("citation rules: {}", e)))?;
    rules.iter().map(CitationRule::compile).collect()
}

/// Read citation rules from a JSON file.
pub fn load_citation_patterns<P: AsRef<Path>>(path: P) -> Result<Vec<CitationPattern>> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| Error::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    citation_patterns_from_json(&json)
}

/// Records heading and citation positions in render order.
#[derive(Debug, Clone, Default)]
pub struct Indexer {
    patterns: Vec<CitationPattern>,
    headings: Vec<HeadingPosition>,
    citations: Vec<CitationPosition>,
}

impl Indexer {
    /// Create an indexer with citation patterns.
    pub fn new(patterns: Vec<CitationPattern>) -> Self {
        Self {
            patterns,
            ..Default::default()
        }
    }

    /// Record a rendered heading line.
    pub fn record_heading(&mut self, text: &str, page: u32, line: u32, is_subheading: bool) {
        self.headings.push(HeadingPosition {
            text: text.to_string(),
            page,
            line,
            is_subheading,
        });
    }

    /// Test a rendered line against every pattern; returns the number of
    /// citations recorded.
    pub fn scan_line(&mut self, text: &str, page: u32, line: u32) -> usize {
        let before = self.citations.len();
        for pattern in &self.patterns {
            for found in pattern.find_all(text) {
                self.citations.push(CitationPosition {
                    text: found.to_string(),
                    page,
                    line,
                });
            }
        }
        self.citations.len() - before
    }

    /// Headings in render order.
    pub fn headings(&self) -> &[HeadingPosition] {
        &self.headings
    }

    /// Citations in render order.
    pub fn citations(&self) -> &[CitationPosition] {
        &self.citations
    }

    /// Number of configured patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.citations.is_empty()
    }

    /// Take the recorded positions.
    pub fn into_positions(self) -> (Vec<HeadingPosition>, Vec<CitationPosition>) {
        (self.headings, self.citations)
    }
}
