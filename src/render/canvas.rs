//! The drawing surface used by page composition.

use std::path::Path;

use crate::error::Result;
use crate::layout::TextMeasure;
use crate::model::FontSpec;

/// Horizontal anchor of a `draw_text` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// `x` is the left edge
    #[default]
    Left,
    /// `x` is the centre
    Center,
    /// `x` is the right edge
    Right,
}

/// A page-description target.
///
/// Coordinates are in points with the origin at the bottom-left corner, as
/// in PDF. Decorations (frames, rules, rotated text) default to no-ops so
/// text-only targets can ignore them.
pub trait Canvas: TextMeasure {
    /// Open a new page; later drawing goes to it.
    fn start_new_page(&mut self) -> Result<()>;

    /// Draw one line of text with its baseline at `y`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &FontSpec, align: TextAlign) -> Result<()>;

    /// Size of an image in pixels.
    fn image_size(&mut self, path: &Path) -> Result<(f32, f32)>;

    /// Draw an image with its bottom-left corner at `(x, y)`.
    fn draw_image(&mut self, path: &Path, x: f32, y: f32, width: f32, height: f32) -> Result<()>;

    /// Pages opened so far.
    fn page_count(&self) -> u32;

    /// Stroke a rectangle.
    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32) -> Result<()> {
        let _ = (x, y, width, height, line_width);
        Ok(())
    }

    /// Stroke a straight line.
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32) -> Result<()> {
        let _ = (from, to, line_width);
        Ok(())
    }

    /// Draw text rotated 90 degrees counter-clockwise, starting at `(x, y)`.
    fn draw_text_vertical(&mut self, x: f32, y: f32, text: &str, font: &FontSpec) -> Result<()> {
        let _ = (x, y, text, font);
        Ok(())
    }
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn start_new_page(&mut self) -> Result<()> {
        (**self).start_new_page()
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, font: &FontSpec, align: TextAlign) -> Result<()> {
        (**self).draw_text(x, y, text, font, align)
    }

    fn image_size(&mut self, path: &Path) -> Result<(f32, f32)> {
        (**self).image_size(path)
    }

    fn draw_image(&mut self, path: &Path, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        (**self).draw_image(path, x, y, width, height)
    }

    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn draw_rect(&mut self, x: f32, y: f32, width: f32, height: f32, line_width: f32) -> Result<()> {
        (**self).draw_rect(x, y, width, height, line_width)
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), line_width: f32) -> Result<()> {
        (**self).draw_line(from, to, line_width)
    }

    fn draw_text_vertical(&mut self, x: f32, y: f32, text: &str, font: &FontSpec) -> Result<()> {
        (**self).draw_text_vertical(x, y, text, font)
    }
}

/// Left edge of `text` drawn at `x` with `align`.
pub fn aligned_x<M: TextMeasure + ?Sized>(
    measure: &M,
    x: f32,
    text: &str,
    font: &FontSpec,
    align: TextAlign,
) -> f32 {
    match align {
        TextAlign::Left => x,
        TextAlign::Center => x - measure.measure_width(text, font) / 2.0,
        TextAlign::Right => x - measure.measure_width(text, font),
    }
}
