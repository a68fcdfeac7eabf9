//! Page decorations shared by body, exhibit and index pages.

use crate::error::Result;
use crate::model::TitleBlockSegment;

use super::canvas::{Canvas, TextAlign};
use super::options::{LayoutOptions, INCH};

/// `Page X of Y`.
pub fn page_footer(number: u32, total: u32) -> String {
    format!("Page {} of {}", number, total)
}

/// Draws the frame, firm name, case name, rule and footer of a page.
#[derive(Debug, Clone, Copy)]
pub struct PageChrome<'a> {
    firm_name: &'a str,
    case_name: &'a str,
    options: &'a LayoutOptions,
}

impl<'a> PageChrome<'a> {
    /// Create chrome for a filing.
    pub fn new(firm_name: &'a str, case_name: &'a str, options: &'a LayoutOptions) -> Self {
        Self {
            firm_name,
            case_name,
            options,
        }
    }

    /// The layout the chrome is drawn for.
    pub fn options(&self) -> &'a LayoutOptions {
        self.options
    }

    /// Draw everything except page content, with `footer` centred at the
    /// bottom.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, footer: &str) -> Result<()> {
        let o = self.options;
        let (width, height) = (o.page_width(), o.page_height());

        canvas.draw_rect(0.5 * INCH, 0.5 * INCH, width - INCH, height - 1.3 * INCH, 2.0)?;

        if !self.firm_name.is_empty() {
            let firm_width = canvas.measure_width(self.firm_name, &o.firm_font);
            canvas.draw_text_vertical(
                0.2 * INCH,
                height / 2.0 - firm_width / 2.0,
                self.firm_name,
                &o.firm_font,
            )?;
        }

        canvas.draw_text(
            width / 2.0,
            height - 0.5 * INCH,
            self.case_name,
            &o.case_font,
            TextAlign::Center,
        )?;
        canvas.draw_line(
            (0.5 * INCH, height - 0.6 * INCH),
            (width - 0.5 * INCH, height - 0.6 * INCH),
            1.0,
        )?;

        canvas.draw_text(width / 2.0, 0.4 * INCH, footer, &o.footer_font, TextAlign::Center)
    }

    /// Draw a body line number in both margins.
    pub fn draw_line_number<C: Canvas + ?Sized>(&self, canvas: &mut C, y: f32, number: u32) -> Result<()> {
        let o = self.options;
        let label = number.to_string();
        canvas.draw_text(o.margins.left - 0.6 * INCH, y, &label, &o.line_number_font, TextAlign::Left)?;
        canvas.draw_text(o.page_width() - 0.4 * INCH, y, &label, &o.line_number_font, TextAlign::Left)
    }

    /// Draw a title block centred on the page.
    pub fn draw_title_block<C: Canvas + ?Sized>(&self, canvas: &mut C, block: &TitleBlockSegment) -> Result<()> {
        let o = self.options;
        let x = o.page_width() / 2.0;
        let mut y = o.page_height() - 1.5 * INCH;
        for line in &block.lines {
            canvas.draw_text(x, y, line, &o.title_block_font, TextAlign::Center)?;
            y -= o.title_block_spacing;
        }
        Ok(())
    }
}
