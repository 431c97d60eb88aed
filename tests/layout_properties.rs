use chrono::NaiveDate;
use proptest::prelude::*;
use sitesheet::models::LaborEntry;
use sitesheet::render::{Font, Helvetica, Op, PageSize, RecordingSurface, Surface, TextMeasurer};
use sitesheet::report::aggregate::{labor_by_day, labor_by_employee, totals};
use sitesheet::report::{Column, Overflow, PageCursor, PageLayout, Table, TableStyle, wrap_lines};

fn layout() -> PageLayout {
    PageLayout {
        size: PageSize::LETTER,
        top_margin: 40.0,
        bottom_margin: 60.0,
    }
}

proptest! {
    #[test]
    fn wrapped_lines_fit_and_keep_word_order(
        words in prop::collection::vec("[a-z]{1,12}", 0..40),
        max_width in 110.0f32..400.0,
    ) {
        let text = words.join(" ");
        let lines = wrap_lines(&Helvetica, &text, Font::Regular, 10.0, max_width);

        for line in &lines {
            prop_assert!(Helvetica.text_width(Font::Regular, 10.0, line) <= max_width);
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        prop_assert_eq!(rejoined, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn any_text_wraps_within_width_or_one_glyph(
        parts in prop::collection::vec(
            ("\\S{1,80}", prop_oneof![Just(" "), Just("\n"), Just("\n\n")]),
            0..30,
        ),
        max_width in 1.0f32..200.0,
    ) {
        let text: String = parts.iter().map(|(tok, sep)| format!("{tok}{sep}")).collect();
        let lines = wrap_lines(&Helvetica, &text, Font::Bold, 10.0, max_width);

        prop_assert!(lines.len() >= text.split('\n').count());
        for line in &lines {
            prop_assert!(
                Helvetica.text_width(Font::Bold, 10.0, line) <= max_width
                    || line.chars().count() == 1,
                "line {:?} too wide for {}", line, max_width
            );
        }
        let glyphs = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
        prop_assert_eq!(glyphs(&lines.concat()), glyphs(&text));
    }

    #[test]
    fn ensure_space_always_leaves_room(heights in prop::collection::vec(1.0f32..600.0, 1..60)) {
        let mut s = RecordingSurface::new();
        let mut cursor = PageCursor::start(&mut s, layout());

        for h in heights {
            let before = s.page_count();
            cursor.ensure_space(&mut s, h, None);
            prop_assert!(cursor.fits(h));
            prop_assert!(s.page_count() <= before + 1);
            cursor.advance(h);
        }
    }

    #[test]
    fn paginated_rows_never_split(word_counts in prop::collection::vec(1usize..30, 1..80)) {
        let columns = [Column::left("Item", 100.0), Column::left("Notes", 150.0)];
        let table = Table {
            title: Some("Materials"),
            x: 40.0,
            columns: &columns,
            style: TableStyle::DETAIL,
            overflow: Overflow::Paginate,
        };
        let rows: Vec<Vec<String>> = word_counts
            .iter()
            .enumerate()
            .map(|(i, n)| vec![format!("item{i}"), vec![format!("w{i}"); *n].join(" ")])
            .collect();

        let mut s = RecordingSurface::new();
        let mut cursor = PageCursor::start(&mut s, layout());
        let outcome = table.render(&mut s, &mut cursor, rows);
        prop_assert_eq!(outcome.rows_drawn, word_counts.len());
        prop_assert_eq!(outcome.rows_omitted, 0);

        for i in 0..word_counts.len() {
            let tag = format!("w{i}");
            let pages_with_row = s
                .pages()
                .iter()
                .filter(|p| p.texts().any(|t| t.split_whitespace().any(|w| w == tag)))
                .count();
            prop_assert_eq!(pages_with_row, 1);
        }
        for page in s.pages() {
            for op in &page.ops {
                if let Op::Text { y, .. } = op {
                    prop_assert!(*y >= 60.0);
                }
            }
        }
    }

    #[test]
    fn grouped_hours_add_up(
        rows in prop::collection::vec((0usize..4, 0u32..5, 0.0f64..16.0), 0..50),
    ) {
        let names = ["Shawn", "Dave", "Bryce", ""];
        let entries: Vec<LaborEntry> = rows
            .iter()
            .enumerate()
            .map(|(i, (who, day, hours))| LaborEntry {
                id: i.to_string(),
                work_date: NaiveDate::from_ymd_opt(2025, 9, 1 + day).unwrap(),
                employee_name: names[*who].to_string(),
                job_type: "Residential".into(),
                job_description: String::new(),
                total_hours: *hours,
                notes: String::new(),
            })
            .collect();

        let total = totals(&entries, &[]).labor;
        let by_employee: f64 = labor_by_employee(&entries).iter().map(|g| g.total).sum();
        let by_day: f64 = labor_by_day(&entries).iter().map(|d| d.hours).sum();
        prop_assert!((total - by_employee).abs() < 1e-6);
        prop_assert!((total - by_day).abs() < 1e-6);
        prop_assert_eq!(
            labor_by_day(&entries).iter().map(|d| d.entry_count).sum::<usize>(),
            entries.len()
        );
    }
}
