//! Advance widths of the standard Helvetica faces (AFM, 1/1000 em).

use crate::render::{Font, TextMeasurer};

/// Printable ASCII 0x20..=0x7E, Helvetica.
#[rustfmt::skip]
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Printable ASCII 0x20..=0x7E, Helvetica-Bold.
#[rustfmt::skip]
const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// WinAnsiEncoding byte for `c`, the encoding declared for both fonts.
/// Tabs are written as spaces.
pub(crate) fn win_ansi(c: char) -> Option<u8> {
    match c {
        ' '..='~' => Some(c as u8),
        '\u{a0}'..='\u{ff}' => Some(c as u32 as u8),
        '€' => Some(0x80),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '\t' => Some(b' '),
        _ => None,
    }
}

/// Helvetica / Helvetica-Bold metrics, the faces every PDF reader ships.
#[derive(Debug, Clone, Copy, Default)]
pub struct Helvetica;

impl Helvetica {
    fn glyph_width(font: Font, c: char) -> u16 {
        let table = match font {
            Font::Regular => &REGULAR,
            Font::Bold => &BOLD,
        };
        // Anything the encoder can't map is written, and so measured, as '?'.
        let c = match (c, win_ansi(c)) {
            ('\t', _) => ' ',
            (_, None) => '?',
            _ => c,
        };
        match c {
            ' '..='~' => table[c as usize - 0x20],
            '•' => 350,
            '—' | '…' => 1000,
            '–' => 556,
            '‘' | '’' => match font {
                Font::Regular => 222,
                Font::Bold => 278,
            },
            '“' | '”' => match font {
                Font::Regular => 333,
                Font::Bold => 500,
            },
            '\u{a0}' => 278,
            _ => 556,
        }
    }
}

impl TextMeasurer for Helvetica {
    fn text_width(&self, font: Font, size: f32, text: &str) -> f32 {
        let units: u32 = text.chars().map(|c| Self::glyph_width(font, c) as u32).sum();
        units as f32 * size / 1000.0
    }
}
