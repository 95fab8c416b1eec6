//! # Layout
//!
//! Page geometry, the layout cursor and the draw operations a page is
//! made of. The document routines in [`document`] place hotel and
//! proposal content onto pages; a [`crate::surface::Surface`] records the
//! result as [`LayoutPage`]s for the PDF writer.
//!
//! All coordinates are millimetres from the top-left corner of an A4
//! page. Text is positioned by its baseline.

pub mod document;
pub mod page_break;

use crate::font::StandardFont;
use crate::image_loader::NormalizedImage;
use crate::style::Color;
use crate::surface::Surface;
use page_break::{decide_break, BreakDecision};

/// A4 width in millimetres.
pub const PAGE_WIDTH: f64 = 210.0;
/// A4 height in millimetres.
pub const PAGE_HEIGHT: f64 = 297.0;
/// Where the cursor lands after a page break.
pub const TOP_MARGIN: f64 = 20.0;
/// No block may extend below this line.
pub const BOTTOM_LIMIT: f64 = 280.0;

/// The vertical write position on the current page.
///
/// Every drawing step takes the cursor by value and returns the advanced
/// one, so there is no hidden shared position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f64,
}

impl Cursor {
    pub fn at(y: f64) -> Self {
        Self { y }
    }

    /// The cursor at the top margin of a fresh page.
    pub fn top() -> Self {
        Self::at(TOP_MARGIN)
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn advance(self, dy: f64) -> Self {
        Self { y: self.y + dy }
    }

    /// Make room for a block of `height` millimetres, starting a new page
    /// on `surface` when the block would cross [`BOTTOM_LIMIT`].
    pub fn reserve<S: Surface + ?Sized>(self, surface: &mut S, height: f64) -> Self {
        match decide_break(self.y, height, TOP_MARGIN, BOTTOM_LIMIT) {
            BreakDecision::Place => self,
            BreakDecision::MoveToNextPage => {
                log::debug!(
                    "page break: block of {:.1}mm at y={:.1}mm, starting page {}",
                    height,
                    self.y,
                    surface.page_count() + 1
                );
                surface.add_page();
                Self::top()
            }
        }
    }
}

/// A single page of recorded draw operations.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<LayoutElement>,
}

impl LayoutPage {
    pub fn new() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            elements: Vec::new(),
        }
    }

    /// The text drawn on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match &e.draw {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// The images drawn on this page with their boxes, in drawing order.
    pub fn images(&self) -> impl Iterator<Item = (&LayoutElement, &NormalizedImage)> {
        self.elements.iter().filter_map(|e| match &e.draw {
            DrawCommand::Image { image } => Some((e, image)),
            _ => None,
        })
    }
}

impl Default for LayoutPage {
    fn default() -> Self {
        Self::new()
    }
}

/// A positioned draw operation.
///
/// For text, `y` is the baseline and `height` the font size; for boxes
/// and images, `(x, y)` is the top-left corner.
#[derive(Debug, Clone)]
pub struct LayoutElement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub draw: DrawCommand,
}

impl LayoutElement {
    /// The lowest point this element reaches on the page.
    pub fn bottom(&self) -> f64 {
        match self.draw {
            DrawCommand::Text { .. } => self.y,
            _ => self.y + self.height,
        }
    }
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// A filled box, with rounded corners when `corner_radius > 0`.
    Rect {
        background: Color,
        corner_radius: f64,
    },
    Text {
        content: String,
        font: StandardFont,
        /// Size in points.
        font_size: f64,
        color: Color,
    },
    Image {
        image: NormalizedImage,
    },
}
