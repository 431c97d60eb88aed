//! Small text placement helpers built on the wrapper and the cursor.

use crate::render::{Surface, TextMeasurer, TextStyle};
use crate::report::cursor::PageCursor;
use crate::report::wrap::wrap_lines;

/// Draw `text` wrapped to `max_width`, one baseline per line starting at the
/// cursor, and leave the cursor below the last line.
///
/// The block is kept together when it fits on a page; a block taller than
/// a page flows line by line. Returns the number of lines drawn.
pub fn draw_paragraph<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut PageCursor,
    x: f32,
    max_width: f32,
    style: TextStyle,
    line_height: f32,
    text: &str,
) -> usize {
    let lines = wrap_lines(&*surface, text, style.font, style.size, max_width);
    cursor.ensure_space(surface, lines.len() as f32 * line_height, None);
    draw_lines(surface, cursor, x, style, line_height, &lines);
    lines.len()
}

/// Draw already wrapped lines, breaking the page whenever the next one
/// doesn't fit.
pub fn draw_lines<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut PageCursor,
    x: f32,
    style: TextStyle,
    line_height: f32,
    lines: &[String],
) {
    for line in lines {
        cursor.ensure_space(surface, line_height, None);
        if !line.is_empty() {
            surface.draw_text(cursor.page(), x, cursor.y(), style, line);
        }
        cursor.advance(line_height);
    }
}

/// Cut `text` so it fits `max_width`, ending with an ellipsis when shortened.
pub fn fit_text<M: TextMeasurer + ?Sized>(measurer: &M, style: TextStyle, text: &str, max_width: f32) -> String {
    let width = |s: &str| measurer.text_width(style.font, style.size, s);
    if width(text) <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    for ch in text.chars() {
        let mut next = out.clone();
        next.push(ch);
        next.push('…');
        if width(&next) > max_width {
            break;
        }
        out.push(ch);
    }
    let mut out = out.trim_end().to_string();
    out.push('…');
    out
}
