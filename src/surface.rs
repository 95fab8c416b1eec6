//! # Drawing Surface
//!
//! The layout engine draws through [`Surface`]: a small 2-D drawing and
//! text-measurement interface that also owns the page set (add page,
//! finish). [`PdfSurface`] records every operation as a [`LayoutPage`]
//! element and serializes the pages with [`PdfWriter`] when finished.

use crate::error::Result;
use crate::font::StandardFont;
use crate::image_loader::NormalizedImage;
use crate::layout::{DrawCommand, LayoutElement, LayoutPage};
use crate::model::Metadata;
use crate::pdf::PdfWriter;
use crate::style::Color;
use crate::text::{TextLayout, MM_PER_PT};

/// Drawing operations the layout engine needs. Units are millimetres
/// from the top-left page corner; font sizes are points.
pub trait Surface {
    fn page_width(&self) -> f64;
    fn page_height(&self) -> f64;
    /// Start a new page; subsequent drawing goes there.
    fn add_page(&mut self);
    fn page_count(&self) -> usize;

    fn set_font(&mut self, font: StandardFont, size: f64);
    fn set_fill_color(&mut self, color: Color);
    fn set_text_color(&mut self, color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64);
    /// Draw a single line of text with its baseline at `y`.
    fn text(&mut self, text: &str, x: f64, y: f64);
    fn image(&mut self, image: &NormalizedImage, x: f64, y: f64, w: f64, h: f64);

    /// Wrap `text` in the current font to lines of at most `max_width`.
    fn split_text_to_size(&self, text: &str, max_width: f64) -> Vec<String>;
}

/// A [`Surface`] that records A4 pages for the PDF writer.
pub struct PdfSurface {
    pages: Vec<LayoutPage>,
    font: StandardFont,
    font_size: f64,
    fill_color: Color,
    text_color: Color,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSurface {
    /// A surface with one empty page.
    pub fn new() -> Self {
        Self {
            pages: vec![LayoutPage::new()],
            font: StandardFont::Helvetica,
            font_size: 10.0,
            fill_color: Color::BLACK,
            text_color: Color::BLACK,
        }
    }

    pub fn pages(&self) -> &[LayoutPage] {
        &self.pages
    }

    /// Serialize the recorded pages to PDF bytes.
    pub fn finish(self, metadata: &Metadata) -> Result<Vec<u8>> {
        PdfWriter::new().write(&self.pages, metadata)
    }

    fn push(&mut self, element: LayoutElement) {
        // `pages` is never empty: it starts with one page and only grows.
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }
}

impl Surface for PdfSurface {
    fn page_width(&self) -> f64 {
        self.pages.last().map(|p| p.width).unwrap_or_default()
    }

    fn page_height(&self) -> f64 {
        self.pages.last().map(|p| p.height).unwrap_or_default()
    }

    fn add_page(&mut self) {
        self.pages.push(LayoutPage::new());
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_font(&mut self, font: StandardFont, size: f64) {
        self.font = font;
        self.font_size = size;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.fill_rounded_rect(x, y, w, h, 0.0);
    }

    fn fill_rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let background = self.fill_color;
        self.push(LayoutElement {
            x,
            y,
            width: w,
            height: h,
            draw: DrawCommand::Rect {
                background,
                corner_radius: radius,
            },
        });
    }

    fn text(&mut self, text: &str, x: f64, y: f64) {
        let width = TextLayout::new(self.font, self.font_size).measure_mm(text);
        let element = LayoutElement {
            x,
            y,
            width,
            height: self.font_size * MM_PER_PT,
            draw: DrawCommand::Text {
                content: text.to_string(),
                font: self.font,
                font_size: self.font_size,
                color: self.text_color,
            },
        };
        self.push(element);
    }

    fn image(&mut self, image: &NormalizedImage, x: f64, y: f64, w: f64, h: f64) {
        self.push(LayoutElement {
            x,
            y,
            width: w,
            height: h,
            draw: DrawCommand::Image {
                image: image.clone(),
            },
        });
    }

    fn split_text_to_size(&self, text: &str, max_width: f64) -> Vec<String> {
        TextLayout::new(self.font, self.font_size).split_to_size(text, max_width)
    }
}
