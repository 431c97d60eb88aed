//! Greedy word wrapping against measured text widths.

use crate::render::{Font, TextMeasurer};
use std::collections::VecDeque;
use std::str::Split;

/// Lazy sequence of display lines, one paragraph wrapped at a time.
///
/// Never empty: blank input yields a single empty line.
pub struct WrapLines<'a, M: ?Sized> {
    measurer: &'a M,
    font: Font,
    size: f32,
    max_width: f32,
    paragraphs: Split<'a, char>,
    pending: VecDeque<String>,
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Explicit newlines are kept (blank paragraphs give one empty line each),
/// words are joined while `measure(line + " " + word) <= max_width`, and a
/// word too wide on its own is broken character by character. A single
/// glyph wider than `max_width` still gets a line of its own.
pub fn wrap<'a, M: TextMeasurer + ?Sized>(
    measurer: &'a M,
    text: &'a str,
    font: Font,
    size: f32,
    max_width: f32,
) -> WrapLines<'a, M> {
    let text = if text.trim().is_empty() { "" } else { text };
    WrapLines {
        measurer,
        font,
        size,
        max_width,
        paragraphs: text.split('\n'),
        pending: VecDeque::new(),
    }
}

/// Collecting form of [`wrap`].
pub fn wrap_lines<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: Font,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    wrap(measurer, text, font, size, max_width).collect()
}

impl<M: TextMeasurer + ?Sized> WrapLines<'_, M> {
    fn fits(&self, s: &str) -> bool {
        self.measurer.text_width(self.font, self.size, s) <= self.max_width
    }

    fn wrap_paragraph(&self, paragraph: &str) -> VecDeque<String> {
        let mut out = VecDeque::new();
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if self.fits(&candidate) {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                out.push_back(std::mem::take(&mut line));
            }
            if self.fits(word) {
                line = word.to_string();
            } else {
                let mut parts = self.break_word(word);
                line = parts.pop().unwrap_or_default();
                out.extend(parts);
            }
        }

        if !line.is_empty() || out.is_empty() {
            out.push_back(line);
        }
        out
    }

    fn break_word(&self, word: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut cur = String::new();
        for ch in word.chars() {
            let mut next = cur.clone();
            next.push(ch);
            if cur.is_empty() || self.fits(&next) {
                cur = next;
            } else {
                parts.push(std::mem::replace(&mut cur, ch.to_string()));
            }
        }
        if !cur.is_empty() {
            parts.push(cur);
        }
        parts
    }
}

impl<M: TextMeasurer + ?Sized> Iterator for WrapLines<'_, M> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }
            let paragraph = self.paragraphs.next()?;
            let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
            self.pending = self.wrap_paragraph(paragraph);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every char is 1pt wide at size 1.
    struct Mono;

    impl TextMeasurer for Mono {
        fn text_width(&self, _font: Font, size: f32, text: &str) -> f32 {
            text.chars().count() as f32 * size
        }
    }

    fn w(text: &str, max: f32) -> Vec<String> {
        wrap_lines(&Mono, text, Font::Regular, 1.0, max)
    }

    #[test]
    fn blank_input_yields_one_empty_line() {
        assert_eq!(w("", 10.0), [""]);
        assert_eq!(w("   \n\t ", 10.0), [""]);
    }

    #[test]
    fn greedy_join_accepts_exact_width() {
        // "aaa bbb" is exactly 7 wide
        assert_eq!(w("aaa bbb ccc", 7.0), ["aaa bbb", "ccc"]);
        assert_eq!(w("aaa bbb ccc", 6.0), ["aaa", "bbb", "ccc"]);
    }

    #[test]
    fn explicit_breaks_and_blank_paragraphs_survive() {
        assert_eq!(w("one\r\n\r\ntwo", 20.0), ["one", "", "two"]);
        assert_eq!(w("one\n", 20.0), ["one", ""]);
    }

    #[test]
    fn long_word_is_hard_broken_and_seeds_next_line() {
        assert_eq!(w("ab abcdefghij xy", 4.0), ["ab", "abcd", "efgh", "ij", "xy"]);
        assert_eq!(w("abcdefghij k", 4.0), ["abcd", "efgh", "ij k"]);
    }

    #[test]
    fn glyph_wider_than_max_still_progresses() {
        assert_eq!(w("abc", 0.5), ["a", "b", "c"]);
    }

    #[test]
    fn iterator_is_lazy_per_paragraph() {
        let mut it = wrap(&Mono, "first para\nsecond", Font::Regular, 1.0, 5.0);
        assert_eq!(it.next().as_deref(), Some("first"));
        assert_eq!(it.pending.len(), 1);
        assert_eq!(it.collect::<Vec<_>>(), ["para", "second"]);
    }
}
