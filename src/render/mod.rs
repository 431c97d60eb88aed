//! Rendering surface primitives consumed by the report engine.
//!
//! The engine never writes a file format itself: it asks a [`Surface`] to add
//! pages, draw text, rectangles, lines and images, and to measure text.
//! `PdfSurface` produces real PDF bytes, `RecordingSurface` keeps the draw
//! operations in memory for tests and debugging.

pub mod metrics;
pub mod pdf;
pub mod recording;

pub use metrics::Helvetica;
pub use pdf::PdfSurface;
pub use recording::{Op, RecordedPage, RecordingSurface};

use crate::report::image::DecodedImage;

/// The two faces the reports use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const INK: Rgb = Rgb(0.15, 0.15, 0.18);
    pub const BODY: Rgb = Rgb(0.2, 0.2, 0.22);
    pub const MUTED: Rgb = Rgb(0.35, 0.35, 0.4);
    pub const FAINT: Rgb = Rgb(0.45, 0.45, 0.5);
    pub const RULE: Rgb = Rgb(0.88, 0.88, 0.92);
    pub const HAIRLINE: Rgb = Rgb(0.92, 0.92, 0.94);
}

/// Page size in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US letter, portrait.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
    /// US letter, landscape.
    pub const LETTER_LANDSCAPE: PageSize = PageSize {
        width: 792.0,
        height: 612.0,
    };
}

/// Opaque handle of a page added to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub usize);

/// Opaque handle of an image embedded in a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Fill and/or stroke for rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: f32,
}

/// Width of a string set in a given font and size.
pub trait TextMeasurer {
    fn text_width(&self, font: Font, size: f32, text: &str) -> f32;
}

/// Text placement: baseline origin, face, size and colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32, color: Rgb) -> Self {
        Self { font, size, color }
    }

    pub const fn regular(size: f32) -> Self {
        Self::new(Font::Regular, size, Rgb::BLACK)
    }

    pub const fn bold(size: f32) -> Self {
        Self::new(Font::Bold, size, Rgb::BLACK)
    }

    pub const fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }
}

/// Drawing primitives. Coordinates are PDF-style: origin bottom-left, y up.
pub trait Surface: TextMeasurer {
    fn add_page(&mut self, size: PageSize) -> PageId;
    fn page_size(&self, page: PageId) -> PageSize;
    fn page_count(&self) -> usize;

    fn draw_text(&mut self, page: PageId, x: f32, y: f32, style: TextStyle, text: &str);
    fn draw_rect(&mut self, page: PageId, rect: Rect, style: BoxStyle);
    fn draw_line(&mut self, page: PageId, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb);

    fn embed_image(&mut self, image: &DecodedImage) -> ImageId;
    fn draw_image(&mut self, page: PageId, image: ImageId, rect: Rect);

    /// Consume the surface and return the finished document bytes.
    fn finish(self) -> Vec<u8>
    where
        Self: Sized;

    /// Draw `text` horizontally centered inside `[x, x + width]`.
    fn draw_text_centered(&mut self, page: PageId, x: f32, y: f32, width: f32, style: TextStyle, text: &str) {
        let tw = self.text_width(style.font, style.size, text);
        let tx = x + ((width - tw) / 2.0).max(0.0);
        self.draw_text(page, tx, y, style, text);
    }
}
