//! Tables whose rows are atomic: a row is measured, space-checked and only
//! then drawn, so it never straddles a page boundary.

use crate::render::{Font, Rgb, Surface, TextStyle};
use crate::report::cursor::PageCursor;
use crate::report::wrap::wrap_lines;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn left(header: &str, width: f32) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Left,
        }
    }

    pub fn center(header: &str, width: f32) -> Self {
        Self {
            header: header.to_string(),
            width,
            align: Align::Center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub title: TextStyle,
    pub title_gap: f32,
    pub rule_above_header: bool,
    pub header: TextStyle,
    pub header_gap: f32,
    pub rule_below_header: bool,
    pub body: TextStyle,
    pub line_height: f32,
    pub pad_top: f32,
    pub pad_bottom: f32,
    pub min_row_height: f32,
    /// Subtracted from the column width before wrapping a cell.
    pub cell_padding: f32,
    pub row_separators: bool,
    pub row_gap: f32,
}

impl TableStyle {
    /// Equipment / material tables of the per-day detail pages.
    pub const DETAIL: TableStyle = TableStyle {
        title: TextStyle::new(Font::Bold, 11.0, Rgb::INK),
        title_gap: 14.0,
        rule_above_header: false,
        header: TextStyle::new(Font::Bold, 8.5, Rgb::MUTED),
        header_gap: 10.0,
        rule_below_header: true,
        body: TextStyle::regular(9.0),
        line_height: 11.0,
        pad_top: 4.0,
        pad_bottom: 6.0,
        min_row_height: 16.0,
        cell_padding: 6.0,
        row_separators: true,
        row_gap: 6.0,
    };

    /// Breakdown tables of the summary page.
    pub const SUMMARY: TableStyle = TableStyle {
        title: TextStyle::bold(12.0),
        title_gap: 14.0,
        rule_above_header: true,
        header: TextStyle::new(Font::Bold, 9.0, Rgb::MUTED),
        header_gap: 14.0,
        rule_below_header: false,
        body: TextStyle::regular(10.0),
        line_height: 12.0,
        pad_top: 0.0,
        pad_bottom: 2.0,
        min_row_height: 14.0,
        cell_padding: 10.0,
        row_separators: false,
        row_gap: 0.0,
    };

    /// Tables of the single-entry landscape page.
    pub const SHEET: TableStyle = TableStyle {
        title: TextStyle::bold(12.0),
        title_gap: 18.0,
        rule_above_header: false,
        header: TextStyle::bold(9.0),
        header_gap: 12.0,
        rule_below_header: true,
        body: TextStyle::regular(9.0),
        line_height: 11.0,
        pad_top: 6.0,
        pad_bottom: 6.0,
        min_row_height: 22.0,
        cell_padding: 6.0,
        row_separators: true,
        row_gap: 0.0,
    };
}

/// What happens to rows that reach the bottom of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overflow {
    /// Break the page and redraw the title and column headers.
    Paginate,
    /// Stop drawing once a row would cross `floor`; remaining rows are dropped.
    Truncate { floor: f32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOutcome {
    pub rows_drawn: usize,
    pub rows_omitted: usize,
}

pub struct Table<'a> {
    pub title: Option<&'a str>,
    pub x: f32,
    pub columns: &'a [Column],
    pub style: TableStyle,
    pub overflow: Overflow,
}

impl Table<'_> {
    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Vertical space taken by the title and column header block.
    pub fn header_height(&self) -> f32 {
        let s = &self.style;
        let mut h = s.header_gap;
        if self.title.is_some() {
            h += s.title_gap;
        }
        if s.rule_above_header {
            h += 12.0;
        }
        if s.rule_below_header {
            h += 8.0;
        }
        h
    }

    /// Height of a row once each cell is wrapped to its column.
    pub fn row_height<S: Surface + ?Sized>(&self, surface: &S, row: &[String]) -> f32 {
        let lines = self.wrap_row(surface, row);
        self.height_of(&lines)
    }

    fn wrap_row<S: Surface + ?Sized>(&self, surface: &S, row: &[String]) -> Vec<Vec<String>> {
        let body = self.style.body;
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                wrap_lines(
                    surface,
                    cell,
                    body.font,
                    body.size,
                    col.width - self.style.cell_padding,
                )
            })
            .collect()
    }

    fn height_of(&self, cells: &[Vec<String>]) -> f32 {
        let s = &self.style;
        let tallest = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        (s.pad_top + s.pad_bottom + tallest as f32 * s.line_height).max(s.min_row_height)
    }

    pub fn draw_header<S: Surface + ?Sized>(&self, surface: &mut S, cursor: &mut PageCursor) {
        let s = &self.style;
        let right = self.x + self.width();

        if let Some(title) = self.title {
            surface.draw_text(cursor.page(), self.x, cursor.y(), s.title, title);
            cursor.advance(s.title_gap);
        }
        if s.rule_above_header {
            surface.draw_line(cursor.page(), (self.x, cursor.y()), (right, cursor.y()), 1.0, Rgb::HAIRLINE);
            cursor.advance(12.0);
        }

        let mut x = self.x;
        for col in self.columns {
            match col.align {
                Align::Left => surface.draw_text(cursor.page(), x, cursor.y(), s.header, &col.header),
                Align::Center => surface.draw_text_centered(
                    cursor.page(),
                    x,
                    cursor.y(),
                    col.width,
                    s.header,
                    &col.header,
                ),
            }
            x += col.width;
        }
        cursor.advance(s.header_gap);

        if s.rule_below_header {
            surface.draw_line(cursor.page(), (self.x, cursor.y()), (right, cursor.y()), 1.0, Rgb::RULE);
            cursor.advance(8.0);
        }
    }

    /// Whether a truncated table can show its header and one row above its
    /// floor. Paginated tables always have room.
    pub fn has_room(&self, cursor: &PageCursor) -> bool {
        match self.overflow {
            Overflow::Paginate => true,
            Overflow::Truncate { floor } => {
                cursor.y() - (self.header_height() + self.style.min_row_height) >= floor
            }
        }
    }

    /// Draw the header then every row, honouring the overflow policy.
    ///
    /// A truncated table with no room left draws nothing at all and reports
    /// every row as omitted.
    pub fn render<S, I>(&self, surface: &mut S, cursor: &mut PageCursor, rows: I) -> TableOutcome
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut outcome = TableOutcome::default();

        let mut rows = rows.into_iter().peekable();
        if !self.has_room(cursor) {
            outcome.rows_omitted = rows.count();
            return outcome;
        }
        if self.overflow == Overflow::Paginate {
            // Keep the header together with the first row at its wrapped height.
            let first_h = match rows.peek() {
                Some(row) => self.row_height(&*surface, row) + self.style.row_gap,
                None => self.style.min_row_height,
            };
            cursor.ensure_space(surface, self.header_height() + first_h, None);
        }
        self.draw_header(surface, cursor);

        while let Some(row) = rows.next() {
            let cells = self.wrap_row(surface, &row);
            let row_h = self.height_of(&cells);

            match self.overflow {
                Overflow::Paginate => {
                    let mut redraw = |s: &mut S, c: &mut PageCursor| self.draw_header(s, c);
                    cursor.ensure_space(surface, row_h + self.style.row_gap, Some(&mut redraw));
                }
                Overflow::Truncate { floor } => {
                    if cursor.y() - row_h < floor {
                        outcome.rows_omitted = 1 + rows.by_ref().count();
                        break;
                    }
                }
            }

            self.draw_row(surface, cursor, &cells);
            cursor.advance(row_h);
            if self.style.row_separators {
                let y = cursor.y();
                surface.draw_line(cursor.page(), (self.x, y), (self.x + self.width(), y), 0.5, Rgb::HAIRLINE);
            }
            cursor.advance(self.style.row_gap);
            outcome.rows_drawn += 1;
        }

        outcome
    }

    fn draw_row<S: Surface + ?Sized>(&self, surface: &mut S, cursor: &PageCursor, cells: &[Vec<String>]) {
        let s = &self.style;
        let baseline = cursor.y() - s.pad_top - s.body.size;
        let mut x = self.x;

        for (col, lines) in self.columns.iter().zip(cells) {
            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let y = baseline - i as f32 * s.line_height;
                match col.align {
                    Align::Left => surface.draw_text(cursor.page(), x, y, s.body, line),
                    Align::Center => {
                        surface.draw_text_centered(cursor.page(), x, y, col.width, s.body, line)
                    }
                }
            }
            x += col.width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Op, PageSize, RecordingSurface, TextMeasurer};
    use crate::report::cursor::PageLayout;

    fn layout() -> PageLayout {
        PageLayout {
            size: PageSize::LETTER,
            top_margin: 40.0,
            bottom_margin: 60.0,
        }
    }

    fn columns() -> Vec<Column> {
        vec![Column::left("Material", 240.0), Column::center("Loads", 60.0)]
    }

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| vec![format!("Clear Stone {i}"), "3".to_string()])
            .collect()
    }

    #[test]
    fn paginated_table_repeats_header_on_new_page() {
        let mut s = RecordingSurface::new();
        let mut c = PageCursor::start(&mut s, layout());
        let cols = columns();
        let table = Table {
            title: Some("Materials"),
            x: 50.0,
            columns: &cols,
            style: TableStyle::DETAIL,
            overflow: Overflow::Paginate,
        };

        let out = table.render(&mut s, &mut c, rows(60));
        assert_eq!(out.rows_drawn, 60);
        assert!(s.page_count() >= 2);
        for page in s.pages() {
            assert!(page.contains_text("Materials"));
            assert!(page.contains_text("Loads"));
        }
    }

    #[test]
    fn truncated_table_drops_rows_below_floor() {
        let mut s = RecordingSurface::new();
        let mut c = PageCursor::start(&mut s, layout());
        let cols = columns();
        let table = Table {
            title: Some("Material Summary"),
            x: 40.0,
            columns: &cols,
            style: TableStyle::SUMMARY,
            overflow: Overflow::Truncate { floor: 600.0 },
        };

        let out = table.render(&mut s, &mut c, rows(30));
        assert_eq!(s.page_count(), 1);
        assert_eq!(out.rows_drawn + out.rows_omitted, 30);
        assert!(out.rows_omitted > 0);
        assert!(c.y() >= 600.0);
    }

    #[test]
    fn numeric_cells_are_centered_in_their_column() {
        let mut s = RecordingSurface::new();
        let mut c = PageCursor::start(&mut s, layout());
        let cols = columns();
        let table = Table {
            title: None,
            x: 0.0,
            columns: &cols,
            style: TableStyle::DETAIL,
            overflow: Overflow::Paginate,
        };
        table.render(&mut s, &mut c, vec![vec!["Topsoil".into(), "12".into()]]);

        let x = s.pages()[0]
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Text { x, text, .. } if text == "12" => Some(*x),
                _ => None,
            })
            .unwrap();
        let tw = s.text_width(Font::Regular, 9.0, "12");
        assert!((x - (240.0 + (60.0 - tw) / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn row_height_grows_with_wrapped_lines() {
        let s = RecordingSurface::new();
        let cols = columns();
        let table = Table {
            title: None,
            x: 0.0,
            columns: &cols,
            style: TableStyle::DETAIL,
            overflow: Overflow::Paginate,
        };
        let short = table.row_height(&s, &["Sand".into(), "1".into()]);
        let long = table.row_height(&s, &["word ".repeat(80), "1".into()]);
        assert_eq!(short, 21.0);
        assert!(long > short);
    }

    #[test]
    fn header_moves_with_a_tall_first_row() {
        let mut s = RecordingSurface::new();
        let mut c = PageCursor::start(&mut s, layout());
        let cols = columns();
        let table = Table {
            title: Some("Materials"),
            x: 40.0,
            columns: &cols,
            style: TableStyle::DETAIL,
            overflow: Overflow::Paginate,
        };
        c.advance(c.remaining() - (table.header_height() + 18.0));

        let tall = vec!["Clear Stone\nSand\nTopsoil\nGravel\nFill".to_string(), "5".to_string()];
        assert_eq!(table.row_height(&s, &tall), 65.0);
        let out = table.render(&mut s, &mut c, vec![tall]);

        assert_eq!(out.rows_drawn, 1);
        assert_eq!(s.page_count(), 2);
        assert!(!s.pages()[0].contains_text("Materials"));
        assert!(!s.pages()[0].contains_text("Loads"));
        assert!(s.pages()[1].contains_text("Materials"));
        assert!(s.pages()[1].contains_text("Fill"));
    }

    #[test]
    fn truncated_table_without_room_draws_nothing() {
        let mut s = RecordingSurface::new();
        let mut c = PageCursor::start(&mut s, layout());
        let cols = columns();
        let table = Table {
            title: Some("Material Summary"),
            x: 40.0,
            columns: &cols,
            style: TableStyle::SUMMARY,
            overflow: Overflow::Truncate { floor: 70.0 },
        };
        c.advance(c.y() - 100.0);
        assert!(!table.has_room(&c));

        let out = table.render(&mut s, &mut c, rows(3));
        assert_eq!(out, TableOutcome { rows_drawn: 0, rows_omitted: 3 });
        assert!(s.pages()[0].ops.is_empty());
        assert_eq!(c.y(), 100.0);
    }
}
