//! Filing-level types and snapshot persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::{OrderedMap, Sections};
use crate::error::{Error, Result};
use crate::render::{to_json, JsonFormat};

/// Metadata key for the document title.
pub const META_DOCUMENT_TITLE: &str = "DocumentTitle";
/// Metadata key for the filing date (`YYYY-MM-DD`).
pub const META_DATE_FILED: &str = "DateFiled";
/// Metadata key for the court name.
pub const META_COURT: &str = "Court";

/// Text preceding the first heading, plus caller-attached metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    /// Header lines joined with `\n`
    pub content: String,

    /// Free-form metadata (title, date, court, ...)
    pub metadata: OrderedMap<String, String>,
}

impl HeaderBlock {
    /// Create a header block from text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: OrderedMap::new(),
        }
    }

    /// Attach a metadata value.
    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Look up a metadata value.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(&key.to_string()).map(String::as_str)
    }

    /// Set the document title.
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.set_meta(META_DOCUMENT_TITLE, title);
        self
    }

    /// Set the court name.
    pub fn with_court(mut self, court: impl Into<String>) -> Self {
        self.set_meta(META_COURT, court);
        self
    }

    /// Set the filing date.
    pub fn with_date_filed(mut self, date: NaiveDate) -> Self {
        self.set_meta(META_DATE_FILED, date.format("%Y-%m-%d").to_string());
        self
    }

    /// The filing date, if set and well-formed.
    pub fn date_filed(&self) -> Option<NaiveDate> {
        self.meta(META_DATE_FILED)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Check if the header has no text.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// An exhibit: caption text and the image shown under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibit {
    /// Caption text
    pub caption: String,
    /// Image file
    pub image_path: PathBuf,
}

impl Exhibit {
    /// Create an exhibit.
    pub fn new(caption: impl Into<String>, image_path: impl Into<PathBuf>) -> Self {
        Self {
            caption: caption.into(),
            image_path: image_path.into(),
        }
    }
}

/// Everything known about one filing.
///
/// This is the aggregate the CLI can persist as a JSON snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filing {
    /// Case name as given on the command line
    pub case_information: String,

    /// Firm name as given on the command line
    pub law_firm_information: String,

    /// Header text and metadata
    pub header: HeaderBlock,

    /// Sections in source order
    pub sections: Sections,

    /// Exhibits keyed `"1"`, `"2"`, ...
    pub exhibits: OrderedMap<String, Exhibit>,

    /// Text of every title block in the source, keyed `"1"`, `"2"`, ...
    pub documents: OrderedMap<String, String>,
}

impl Filing {
    /// Create an empty filing for a case and firm.
    pub fn new(case_information: impl Into<String>, law_firm_information: impl Into<String>) -> Self {
        Self {
            case_information: case_information.into(),
            law_firm_information: law_firm_information.into(),
            ..Default::default()
        }
    }

    /// Append an exhibit under the next numeric key.
    pub fn add_exhibit(&mut self, exhibit: Exhibit) {
        let key = (self.exhibits.len() + 1).to_string();
        self.exhibits.insert(key, exhibit);
    }

    /// Append a title-block document under the next numeric key.
    pub fn add_document(&mut self, text: impl Into<String>) {
        let key = (self.documents.len() + 1).to_string();
        self.documents.insert(key, text.into());
    }

    /// Exhibits in order.
    pub fn exhibit_list(&self) -> Vec<&Exhibit> {
        self.exhibits.values().collect()
    }

    /// Serialize to a JSON snapshot file.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        let json = to_json(self, format)?;
        fs::write(path.as_ref(), json)?;
        log::debug!("snapshot written to {}", path.as_ref().display());
        Ok(())
    }

    /// Load a JSON snapshot file.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| Error::InputFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_snapshot_str(&data)
    }

    /// Parse a JSON snapshot.
    pub fn from_snapshot_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| Error::Snapshot(e.to_string()))
    }
}

impl fmt::Display for Filing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filing:")?;
        writeln!(f)?;
        writeln!(f, "CASE INFORMATION:")?;
        writeln!(f, "  {}", self.case_information)?;
        writeln!(f)?;
        writeln!(f, "LAW FIRM INFORMATION:")?;
        writeln!(f, "  {}", self.law_firm_information)?;
        writeln!(f)?;

        writeln!(f, "HEADER:")?;
        writeln!(f, "  content: {}", self.header.content)?;
        for (k, v) in self.header.metadata.iter() {
            writeln!(f, "  {}: {}", k, v)?;
        }
        writeln!(f)?;

        writeln!(f, "SECTIONS:")?;
        for (key, body) in self.sections.iter() {
            writeln!(f, "  {}: {}", key, body)?;
        }
        writeln!(f)?;

        writeln!(f, "EXHIBITS:")?;
        for (key, exhibit) in self.exhibits.iter() {
            writeln!(f, "  {}:", key)?;
            writeln!(f, "      caption: {}", exhibit.caption)?;
            writeln!(f, "      image_path: {}", exhibit.image_path.display())?;
        }
        writeln!(f)?;

        writeln!(f, "DOCUMENTS:")?;
        for (key, text) in self.documents.iter() {
            writeln!(f, "  {}:", key)?;
            writeln!(f, "      {}", text)?;
        }
        Ok(())
    }
}
