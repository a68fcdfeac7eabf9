//! Plain-text canvas.
//!
//! [`TextCanvas`] records what would be drawn on each page. Text items that
//! share a baseline are joined into one row, so a body page comes out as
//! `number  text  number` lines between the page chrome.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::layout::TextMeasure;
use crate::model::{Filing, FontSpec};

use super::canvas::{aligned_x, Canvas, TextAlign};
use super::compose::{compose, FilingInfo};
use super::image::image_dimensions;
use super::metrics::ApproximateMetrics;
use super::options::LayoutOptions;

/// Render a filing to numbered plain text, one form-feed separated block
/// per page.
pub fn to_text(filing: &Filing, info: &FilingInfo, options: &LayoutOptions) -> Result<String> {
    let mut canvas = TextCanvas::new();
    compose(filing, info, options, &mut canvas)?;
    Ok(canvas.to_text())
}

/// One text item placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    /// Left edge after alignment
    pub x: f32,
    /// Baseline
    pub y: f32,
    /// Content
    pub text: String,
    /// Font
    pub font: FontSpec,
    /// Rotated 90 degrees
    pub vertical: bool,
}

/// One image placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnImage {
    /// Source file
    pub path: PathBuf,
    /// Bottom-left corner and size
    pub rect: (f32, f32, f32, f32),
}

/// Everything drawn on one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPage {
    /// Text items in draw order
    pub texts: Vec<DrawnText>,
    /// Images in draw order
    pub images: Vec<DrawnImage>,
}

impl TextPage {
    /// Check if any text item contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }

    /// Horizontal rows, top to bottom; items on a row are ordered left to
    /// right. Rotated text is left out.
    pub fn rows(&self) -> Vec<String> {
        let mut items: Vec<&DrawnText> = self.texts.iter().filter(|t| !t.vertical).collect();
        items.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<(f32, Vec<&str>)> = Vec::new();
        for item in items {
            match rows.last_mut() {
                Some((y, parts)) if (*y - item.y).abs() < 0.5 => parts.push(&item.text),
                _ => rows.push((item.y, vec![&item.text])),
            }
        }
        rows.into_iter().map(|(_, parts)| parts.join("  ")).collect()
    }
}

/// A [`Canvas`] that keeps drawn text instead of producing a document.
#[derive(Debug, Clone, Default)]
pub struct TextCanvas<M = ApproximateMetrics> {
    measure: M,
    pages: Vec<TextPage>,
}

impl TextCanvas {
    /// Create a text canvas with the built-in width tables.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TextMeasure> TextCanvas<M> {
    /// Create a text canvas with a custom measurement.
    pub fn with_measure(measure: M) -> Self {
        Self {
            measure,
            pages: Vec::new(),
        }
    }

    /// Recorded pages.
    pub fn pages(&self) -> &[TextPage] {
        &self.pages
    }

    /// Render all pages as text, separated by form feeds.
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.rows().join("\n"))
            .collect::<Vec<_>>()
            .join("\n\x0C\n")
    }

    fn page(&mut self) -> &mut TextPage {
        if self.pages.is_empty() {
            self.pages.push(TextPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl<M: TextMeasure> TextMeasure for TextCanvas<M> {
    fn measure_width(&self, text: &str, font: &FontSpec) -> f32 {
        self.measure.measure_width(text, font)
    }
}

impl<M: TextMeasure> Canvas for TextCanvas<M> {
    fn start_new_page(&mut self) -> Result<()> {
        self.pages.push(TextPage::default());
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &FontSpec, align: TextAlign) -> Result<()> {
        let x = aligned_x(&self.measure, x, text, font, align);
        self.page().texts.push(DrawnText {
            x,
            y,
            text: text.to_string(),
            font: *font,
            vertical: false,
        });
        Ok(())
    }

    fn image_size(&mut self, path: &Path) -> Result<(f32, f32)> {
        let (width, height) = image_dimensions(path)?;
        Ok((width as f32, height as f32))
    }

    fn draw_image(&mut self, path: &Path, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        self.page().images.push(DrawnImage {
            path: path.to_path_buf(),
            rect: (x, y, width, height),
        });
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn draw_text_vertical(&mut self, x: f32, y: f32, text: &str, font: &FontSpec) -> Result<()> {
        self.page().texts.push(DrawnText {
            x,
            y,
            text: text.to_string(),
            font: *font,
            vertical: true,
        });
        Ok(())
    }
}
