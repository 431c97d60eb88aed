use crate::render::{
    BoxStyle, Font, Helvetica, ImageId, PageId, PageSize, Rect, Rgb, Surface, TextMeasurer,
    TextStyle,
};
use crate::render::metrics::win_ansi;
use crate::report::image::{DecodedImage, PixelData};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Filter, Name, Pdf, Ref, Str};
use std::io::Write;

struct PageBuf {
    size: PageSize,
    content: Content,
    images: Vec<ImageId>,
}

/// [`Surface`] writing a PDF with the standard Helvetica faces.
pub struct PdfSurface {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    regular_id: Ref,
    bold_id: Ref,
    next_id: i32,

    pages: Vec<PageBuf>,
    /// XObject ref per embedded image, indexed by `ImageId`.
    images: Vec<Ref>,
}

impl Default for PdfSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfSurface {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // Fixed ids for the document skeleton
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            regular_id,
            bold_id,
            next_id: 5,
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Fresh unique Ref
    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn content(&mut self, page: PageId) -> Option<&mut Content> {
        self.pages.get_mut(page.0).map(|p| &mut p.content)
    }

    fn font_name(font: Font) -> Name<'static> {
        match font {
            Font::Regular => Name(b"F1"),
            Font::Bold => Name(b"F2"),
        }
    }

    fn image_name(id: ImageId) -> String {
        format!("Im{}", id.0 + 1)
    }
}

fn deflate(data: &[u8]) -> Vec<u8> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    // Writing into a Vec cannot fail.
    let _ = enc.write_all(data);
    enc.finish().unwrap_or_default()
}

/// Map text onto WinAnsiEncoding, the encoding declared for both fonts.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi(c).unwrap_or(b'?')).collect()
}

impl TextMeasurer for PdfSurface {
    fn text_width(&self, font: Font, size: f32, text: &str) -> f32 {
        Helvetica.text_width(font, size, text)
    }
}

impl Surface for PdfSurface {
    fn add_page(&mut self, size: PageSize) -> PageId {
        self.pages.push(PageBuf {
            size,
            content: Content::new(),
            images: Vec::new(),
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
        let encoded = to_win_ansi(text);
        let Some(content) = self.content(page) else {
            return;
        };
        let Rgb(r, g, b) = style.color;
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.begin_text();
        content.set_font(Self::font_name(style.font), style.size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&encoded));
        content.end_text();
        content.restore_state();
    }

    fn draw_rect(&mut self, page: PageId, rect: Rect, style: BoxStyle) {
        let Some(content) = self.content(page) else {
            return;
        };
        content.save_state();
        content.rect(rect.x, rect.y, rect.width, rect.height);
        match (style.fill, style.stroke) {
            (Some(Rgb(fr, fg, fb)), Some(Rgb(sr, sg, sb))) => {
                content.set_fill_rgb(fr, fg, fb);
                content.set_stroke_rgb(sr, sg, sb);
                content.set_line_width(style.stroke_width);
                content.fill_nonzero_and_stroke();
            }
            (Some(Rgb(fr, fg, fb)), None) => {
                content.set_fill_rgb(fr, fg, fb);
                content.fill_nonzero();
            }
            (None, Some(Rgb(sr, sg, sb))) => {
                content.set_stroke_rgb(sr, sg, sb);
                content.set_line_width(style.stroke_width);
                content.stroke();
            }
            (None, None) => {
                content.end_path();
            }
        }
        content.restore_state();
    }

    fn draw_line(&mut self, page: PageId, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb) {
        let Some(content) = self.content(page) else {
            return;
        };
        let Rgb(r, g, b) = color;
        content.save_state();
        content.set_stroke_rgb(r, g, b);
        content.set_line_width(width);
        content.move_to(from.0, from.1);
        content.line_to(to.0, to.1);
        content.stroke();
        content.restore_state();
    }

    fn embed_image(&mut self, image: &DecodedImage) -> ImageId {
        let xobj_ref = self.fresh_ref();
        let (w, h) = (image.width as i32, image.height as i32);

        match &image.pixels {
            PixelData::Dct { data, gray } => {
                let mut xobj = self.pdf.image_xobject(xobj_ref, data);
                xobj.filter(Filter::DctDecode);
                xobj.width(w);
                xobj.height(h);
                if *gray {
                    xobj.color_space().device_gray();
                } else {
                    xobj.color_space().device_rgb();
                }
                xobj.bits_per_component(8);
            }
            PixelData::Raster { rgb, alpha } => {
                let mask_ref = match alpha {
                    Some(alpha) => {
                        let mask_ref = self.fresh_ref();
                        let compressed = deflate(alpha);
                        let mut mask = self.pdf.image_xobject(mask_ref, &compressed);
                        mask.filter(Filter::FlateDecode);
                        mask.width(w);
                        mask.height(h);
                        mask.color_space().device_gray();
                        mask.bits_per_component(8);
                        Some(mask_ref)
                    }
                    None => None,
                };

                let compressed = deflate(rgb);
                let mut xobj = self.pdf.image_xobject(xobj_ref, &compressed);
                xobj.filter(Filter::FlateDecode);
                xobj.width(w);
                xobj.height(h);
                xobj.color_space().device_rgb();
                xobj.bits_per_component(8);
                if let Some(mask_ref) = mask_ref {
                    xobj.s_mask(mask_ref);
                }
            }
        }

        self.images.push(xobj_ref);
        ImageId(self.images.len() - 1)
    }

    fn draw_image(&mut self, page: PageId, image: ImageId, rect: Rect) {
        let name = Self::image_name(image);
        let Some(buf) = self.pages.get_mut(page.0) else {
            return;
        };
        if !buf.images.contains(&image) {
            buf.images.push(image);
        }
        buf.content.save_state();
        buf.content
            .transform([rect.width, 0.0, 0.0, rect.height, rect.x, rect.y]);
        buf.content.x_object(Name(name.as_bytes()));
        buf.content.restore_state();
    }

    fn finish(mut self) -> Vec<u8> {
        let pages = std::mem::take(&mut self.pages);
        let mut page_refs = Vec::with_capacity(pages.len());

        for buf in pages {
            let page_id = self.fresh_ref();
            let content_id = self.fresh_ref();
            page_refs.push(page_id);

            let image_names: Vec<(String, Ref)> = buf
                .images
                .iter()
                .filter_map(|id| self.images.get(id.0).map(|r| (Self::image_name(*id), *r)))
                .collect();

            {
                let mut page = self.pdf.page(page_id);
                page.parent(self.pages_id)
                    .media_box(pdf_writer::Rect::new(0.0, 0.0, buf.size.width, buf.size.height))
                    .contents(content_id);

                let mut resources = page.resources();
                resources
                    .fonts()
                    .pair(Name(b"F1"), self.regular_id)
                    .pair(Name(b"F2"), self.bold_id);
                if !image_names.is_empty() {
                    let mut xobjects = resources.x_objects();
                    for (name, r) in &image_names {
                        xobjects.pair(Name(name.as_bytes()), *r);
                    }
                }
            }

            self.pdf.stream(content_id, &buf.content.finish());
        }

        // Catalog + Pages tree, written once here
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        self.pdf.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn empty_document_is_still_a_pdf() {
        let bytes = PdfSurface::new().finish();
        let text = as_text(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Count 0"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn pages_and_fonts_are_written() {
        let mut s = PdfSurface::new();
        let p1 = s.add_page(PageSize::LETTER);
        s.add_page(PageSize::LETTER_LANDSCAPE);
        s.draw_text(p1, 40.0, 700.0, TextStyle::bold(14.0), "Day: 2025-06-02");
        s.draw_line(p1, (40.0, 690.0), (572.0, 690.0), 1.0, Rgb::RULE);
        assert_eq!(s.page_count(), 2);

        let text = as_text(&s.finish());
        assert!(text.contains("/Count 2"));
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(text.contains("792"));
    }

    #[test]
    fn images_are_registered_on_the_page_that_draws_them() {
        let mut s = PdfSurface::new();
        let p = s.add_page(PageSize::LETTER);
        let img = DecodedImage {
            width: 2,
            height: 1,
            pixels: PixelData::Raster {
                rgb: vec![255, 0, 0, 0, 0, 255],
                alpha: Some(vec![255, 0]),
            },
        };
        let id = s.embed_image(&img);
        s.draw_image(
            p,
            id,
            Rect {
                x: 36.0,
                y: 36.0,
                width: 540.0,
                height: 270.0,
            },
        );
        let text = as_text(&s.finish());
        assert!(text.contains("/Im1"));
        assert!(text.contains("/SMask"));
        assert!(text.contains("/FlateDecode"));
    }

    #[test]
    fn win_ansi_maps_typographic_marks() {
        assert_eq!(to_win_ansi("a • b — c…"), b"a \x95 b \x97 c\x85".to_vec());
        assert_eq!(to_win_ansi("é"), vec![0xe9]);
        assert_eq!(to_win_ansi("日"), b"?".to_vec());
    }
}
