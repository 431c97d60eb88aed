use crate::render::{
    BoxStyle, Font, Helvetica, ImageId, PageId, PageSize, Rect, Rgb, Surface, TextMeasurer,
    TextStyle,
};
use crate::report::image::DecodedImage;
use std::fmt::Write;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        text: String,
    },
    Rect {
        rect: Rect,
        style: BoxStyle,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
    },
    Image {
        image: ImageId,
        rect: Rect,
    },
}

#[derive(Debug, Clone)]
pub struct RecordedPage {
    pub size: PageSize,
    pub ops: Vec<Op>,
}

impl RecordedPage {
    /// Text runs in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn images(&self) -> impl Iterator<Item = (ImageId, Rect)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            Op::Image { image, rect } => Some((*image, *rect)),
            _ => None,
        })
    }
}

/// [`Surface`] that keeps every operation in memory, measuring with Helvetica metrics.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pages: Vec<RecordedPage>,
    images: Vec<(u32, u32)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[RecordedPage] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> Option<&RecordedPage> {
        self.pages.get(id.0)
    }

    /// Pixel size of each embedded image, by `ImageId`.
    pub fn embedded_images(&self) -> &[(u32, u32)] {
        &self.images
    }

    fn push(&mut self, page: PageId, op: Op) {
        if let Some(p) = self.pages.get_mut(page.0) {
            p.ops.push(op);
        }
    }
}

impl TextMeasurer for RecordingSurface {
    fn text_width(&self, font: Font, size: f32, text: &str) -> f32 {
        Helvetica.text_width(font, size, text)
    }
}

impl Surface for RecordingSurface {
    fn add_page(&mut self, size: PageSize) -> PageId {
        self.pages.push(RecordedPage {
            size,
            ops: Vec::new(),
        });
        PageId(self.pages.len() - 1)
    }

    fn page_size(&self, page: PageId) -> PageSize {
        self.pages
            .get(page.0)
            .map(|p| p.size)
            .unwrap_or(PageSize::LETTER)
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn draw_text(&mut self, page: PageId, x: f32, y: f32, style: TextStyle, text: &str) {
        self.push(
            page,
            Op::Text {
                x,
                y,
                font: style.font,
                size: style.size,
                text: text.to_string(),
            },
        );
    }

    fn draw_rect(&mut self, page: PageId, rect: Rect, style: BoxStyle) {
        self.push(page, Op::Rect { rect, style });
    }

    fn draw_line(&mut self, page: PageId, from: (f32, f32), to: (f32, f32), width: f32, _color: Rgb) {
        self.push(page, Op::Line { from, to, width });
    }

    fn embed_image(&mut self, image: &DecodedImage) -> ImageId {
        self.images.push((image.width, image.height));
        ImageId(self.images.len() - 1)
    }

    fn draw_image(&mut self, page: PageId, image: ImageId, rect: Rect) {
        self.push(page, Op::Image { image, rect });
    }

    /// Plain-text dump, one block per page.
    fn finish(self) -> Vec<u8> {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            let _ = writeln!(out, "--- page {} ({}x{})", i + 1, page.size.width, page.size.height);
            for op in &page.ops {
                match op {
                    Op::Text { x, y, text, .. } => {
                        let _ = writeln!(out, "text {x:.1},{y:.1} {text}");
                    }
                    Op::Image { image, rect } => {
                        let _ = writeln!(
                            out,
                            "image #{} {:.1},{:.1} {:.1}x{:.1}",
                            image.0, rect.x, rect.y, rect.width, rect.height
                        );
                    }
                    Op::Rect { .. } | Op::Line { .. } => {}
                }
            }
        }
        out.into_bytes()
    }
}
