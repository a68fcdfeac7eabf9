//! Page rendering: composition onto a canvas, PDF and text output, and the
//! table of contents.

mod canvas;
mod chrome;
mod compose;
mod image;
mod json;
mod metrics;
mod options;
mod pdf;
mod result;
mod text;
pub mod toc;

pub use canvas::{aligned_x, Canvas, TextAlign};
pub use chrome::{page_footer, PageChrome};
pub use compose::{compose, Composer, FilingInfo};
pub use json::{to_json, JsonFormat};
pub use metrics::ApproximateMetrics;
pub use options::{LayoutOptions, Margins, PageSize, INCH};
pub use pdf::PdfCanvas;
pub use result::{ComposeResult, LayoutStats};
pub use text::{to_text, DrawnImage, DrawnText, TextCanvas, TextPage};
pub use toc::{TableOfContents, TocEntry, TocEntryKind, TocLine, TocStyle};
