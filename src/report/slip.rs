//! Full-page slip photos.

use crate::models::{LaborEntry, PhotoRef};
use crate::render::{Font, ImageId, PageSize, Rect, Rgb, Surface, TextStyle};
use crate::report::image::{self, DecodedImage};
use crate::report::text::fit_text;

const MARGIN: f32 = 36.0;
/// Room kept above the image for the header and the filename.
const HEADER_SPACE: f32 = 32.0;

/// Where an image of `width`×`height` pixels goes on a slip page.
///
/// The image is scaled up or down to the largest size that fits below the
/// header, centered horizontally and hung from the header.
pub fn placement(page: PageSize, width: u32, height: u32) -> Rect {
    let max_w = page.width - MARGIN * 2.0;
    let max_h = page.height - MARGIN * 2.0 - HEADER_SPACE;
    let scale = image::fit_scale(width as f32, height as f32, max_w, max_h);
    let w = width as f32 * scale;
    let h = height as f32 * scale;
    Rect {
        x: (page.width - w) / 2.0,
        y: (page.height - MARGIN - 28.0 - h).max(MARGIN),
        width: w,
        height: h,
    }
}

/// `employee — job-summary — date`
pub fn slip_header(entry: &LaborEntry) -> String {
    format!(
        "{} — {} — {}",
        entry.employee_name.trim(),
        entry.job_summary(),
        entry.work_date
    )
}

/// Add one portrait page showing `decoded`, already embedded as `image`.
pub fn render_slip<S: Surface + ?Sized>(
    surface: &mut S,
    entry: &LaborEntry,
    photo: &PhotoRef,
    image: ImageId,
    decoded: &DecodedImage,
) {
    let size = PageSize::LETTER;
    let page = surface.add_page(size);
    let text_w = size.width - MARGIN * 2.0;
    let top = size.height - MARGIN;

    let header_style = TextStyle::bold(11.0);
    let header = fit_text(&*surface, header_style, &slip_header(entry), text_w);
    surface.draw_text(page, MARGIN, top, header_style, &header);

    let name_style = TextStyle::new(Font::Regular, 9.0, Rgb::MUTED);
    let name = fit_text(&*surface, name_style, &photo.original_filename, text_w);
    surface.draw_text(page, MARGIN, top - 14.0, name_style, &name);

    surface.draw_image(page, image, placement(size, decoded.width, decoded.height));
}
