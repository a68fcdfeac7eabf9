//! Error types for the pleading library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pleading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while laying out a filing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not UTF-8 text.
    #[error("Input is not text: {0}")]
    NotText(String),

    /// A body, caption or cover file could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    InputFile {
        /// Offending file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Exhibit arguments must come in caption/image pairs.
    #[error("Exhibits must be given in pairs (caption_file image_file), got {0} arguments")]
    OddExhibitArguments(usize),

    /// Layout parameters that cannot produce a page.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// A citation pattern failed to compile.
    #[error("Invalid citation pattern '{pattern}': {source}")]
    InvalidCitationPattern {
        /// The pattern source
        pattern: String,
        /// Regex compilation error
        #[source]
        source: regex::Error,
    },

    /// A citation pattern names a capture group it does not have.
    #[error("Citation pattern '{pattern}' has {groups} groups, group {group} requested")]
    CitationGroupOutOfRange {
        /// The pattern source
        pattern: String,
        /// Requested group index
        group: usize,
        /// Groups available (including group 0)
        groups: usize,
    },

    /// An exhibit image could not be read or sized.
    #[error("Unable to load image {}: {reason}", path.display())]
    ImageLoad {
        /// Image path
        path: PathBuf,
        /// Why loading failed
        reason: String,
    },

    /// Image format the canvas cannot embed.
    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    /// Error producing PDF output.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Counting and rendering passes disagree.
    #[error("Pagination mismatch: counted {counted} pages, rendered {rendered}")]
    PageCountMismatch {
        /// Pages predicted by the counting pass
        counted: u32,
        /// Pages emitted by the render pass
        rendered: u32,
    },

    /// Snapshot (de)serialization failure.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Error during rendering (PDF, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether the run may continue after this error.
    ///
    /// Only exhibit image failures are recoverable; they become placeholder
    /// text on the exhibit page.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ImageLoad { .. } | Error::UnsupportedImage(_))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OddExhibitArguments(3);
        assert_eq!(
            err.to_string(),
            "Exhibits must be given in pairs (caption_file image_file), got 3 arguments"
        );

        let err = Error::PageCountMismatch {
            counted: 4,
            rendered: 5,
        };
        assert_eq!(
            err.to_string(),
            "Pagination mismatch: counted 4 pages, rendered 5"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_recoverable() {
        let err = Error::ImageLoad {
            path: PathBuf::from("scan.png"),
            reason: "truncated".into(),
        };
        assert!(err.is_recoverable());
        assert!(!Error::OddExhibitArguments(1).is_recoverable());
    }
}
