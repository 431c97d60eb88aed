//! The landscape cover sheet of a single-entry report.

use crate::models::{EquipmentLine, LaborEntry, MaterialLine};
use crate::render::{Font, PageSize, Rgb, Surface, TextStyle};
use crate::report::cursor::{PageCursor, PageLayout};
use crate::report::format;
use crate::report::table::{Column, Overflow, Table, TableStyle};
use crate::report::wrap::wrap_lines;

const MARGIN: f32 = 36.0;
const WIDTH: f32 = PageSize::LETTER_LANDSCAPE.width;

const LAYOUT: PageLayout = PageLayout {
    size: PageSize::LETTER_LANDSCAPE,
    top_margin: MARGIN,
    bottom_margin: MARGIN,
};

const PLACEHOLDER: &str = "(none)";

/// Everything the cover sheet shows about one entry.
pub struct EntrySheet<'a> {
    pub company_name: &'a str,
    pub entry: &'a LaborEntry,
    pub equipment: &'a [EquipmentLine],
    pub materials: &'a [MaterialLine],
    pub has_photos: bool,
}

pub fn render_entry_sheet<S: Surface + ?Sized>(surface: &mut S, sheet: &EntrySheet<'_>) {
    let entry = sheet.entry;
    let mut cursor = PageCursor::start(surface, LAYOUT);

    line(surface, &mut cursor, TextStyle::bold(14.0), &format!("{} — Timesheet", sheet.company_name));
    line(
        surface,
        &mut cursor,
        TextStyle::regular(11.0),
        &format!(
            "Date: {}   Employee: {}   Job Type: {}",
            entry.work_date, entry.employee_name, entry.job_type
        ),
    );
    labelled(surface, &mut cursor, "Job:", &entry.job_description, 11.0);
    line(
        surface,
        &mut cursor,
        TextStyle::regular(11.0),
        &format!("Total Hours: {}", format::stored(entry.total_hours)),
    );
    let notes = entry.notes.trim();
    labelled(surface, &mut cursor, "Notes:", if notes.is_empty() { "—" } else { notes }, 10.0);

    cursor.advance(6.0);
    let y = cursor.y();
    surface.draw_line(cursor.page(), (MARGIN, y), (WIDTH - MARGIN, y), 1.0, Rgb(0.85, 0.85, 0.85));
    cursor.advance(12.0);

    let columns = [
        Column::left("Equipment", 210.0),
        Column::left("Attachment", 80.0),
        Column::center("Equip Hrs", 70.0),
        Column::center("Truck Hrs", 70.0),
        Column::left("Notes", 270.0),
    ];
    let mut rows: Vec<Vec<String>> = sheet
        .equipment
        .iter()
        .map(|l| {
            vec![
                l.equipment_name.clone(),
                l.attachment.clone().unwrap_or_default(),
                format::stored_opt(l.usage.operated_hours()),
                format::stored_opt(l.usage.trucking_hours()),
                l.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    if rows.is_empty() {
        rows.push(vec![PLACEHOLDER.to_string()]);
    }
    Table {
        title: Some("Time / Equipment"),
        x: MARGIN,
        columns: &columns,
        style: TableStyle::SHEET,
        overflow: Overflow::Truncate { floor: 150.0 },
    }
    .render(surface, &mut cursor, rows);

    cursor.advance(8.0);
    let columns = [
        Column::left("Material", 360.0),
        Column::center("Loads", 70.0),
        Column::left("Notes", 290.0),
    ];
    let mut rows: Vec<Vec<String>> = sheet
        .materials
        .iter()
        .map(|m| {
            vec![
                m.material_name.clone(),
                format::stored(m.loads),
                m.notes.clone().unwrap_or_default(),
            ]
        })
        .collect();
    if rows.is_empty() {
        rows.push(vec![PLACEHOLDER.to_string()]);
    }
    Table {
        title: Some("Materials (Loads)"),
        x: MARGIN,
        columns: &columns,
        style: TableStyle::SHEET,
        overflow: Overflow::Truncate { floor: 70.0 },
    }
    .render(surface, &mut cursor, rows);

    if sheet.has_photos {
        surface.draw_text(cursor.page(), MARGIN, 24.0, TextStyle::bold(10.0), "Slips to follow.");
    }
}

fn line<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, style: TextStyle, text: &str) {
    surface.draw_text(cursor.page(), MARGIN, cursor.y(), style, text);
    cursor.advance(style.size + 6.0);
}

/// Bold label with the value wrapped to its right.
fn labelled<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, label: &str, value: &str, size: f32) {
    let label = format!("{label} ");
    let label_w = surface.text_width(Font::Bold, size, &label);
    let line_height = size + 3.0;
    let lines = wrap_lines(&*surface, value, Font::Regular, size, WIDTH - MARGIN * 2.0 - label_w);

    surface.draw_text(cursor.page(), MARGIN, cursor.y(), TextStyle::bold(size), &label);
    for (i, text) in lines.iter().enumerate() {
        let y = cursor.y() - i as f32 * line_height;
        if y < LAYOUT.bottom_margin {
            break;
        }
        surface.draw_text(cursor.page(), MARGIN + label_w, y, TextStyle::regular(size), text);
    }
    cursor.advance(lines.len().max(1) as f32 * line_height + 3.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquipmentUsage;
    use crate::render::RecordingSurface;
    use chrono::NaiveDate;

    fn labor() -> LaborEntry {
        LaborEntry {
            id: "42".into(),
            work_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            employee_name: "Shawn".into(),
            job_type: "Commercial".into(),
            job_description: "Backfill foundation".into(),
            total_hours: 8.0,
            notes: String::new(),
        }
    }

    #[test]
    fn empty_tables_get_placeholder_rows_and_no_footer() {
        let entry = labor();
        let mut s = RecordingSurface::new();
        render_entry_sheet(
            &mut s,
            &EntrySheet {
                company_name: "Conrod Construction",
                entry: &entry,
                equipment: &[],
                materials: &[],
                has_photos: false,
            },
        );

        assert_eq!(s.page_count(), 1);
        let page = &s.pages()[0];
        assert_eq!(page.size, PageSize::LETTER_LANDSCAPE);
        assert!(page.contains_text("Conrod Construction — Timesheet"));
        assert!(page.contains_text("Employee: Shawn"));
        assert_eq!(page.texts().filter(|t| *t == PLACEHOLDER).count(), 2);
        assert!(!page.contains_text("Slips to follow."));
    }

    #[test]
    fn hauling_rows_fill_only_the_trucking_column() {
        let entry = labor();
        let equipment = [EquipmentLine {
            entry_id: "42".into(),
            equipment_name: "Dump Truck".into(),
            attachment: None,
            usage: EquipmentUsage::Hauling {
                trucking_hours: Some(3.5),
            },
            notes: Some("Topsoil run".into()),
        }];
        let mut s = RecordingSurface::new();
        render_entry_sheet(
            &mut s,
            &EntrySheet {
                company_name: "Conrod Construction",
                entry: &entry,
                equipment: &equipment,
                materials: &[],
                has_photos: true,
            },
        );

        let page = &s.pages()[0];
        assert!(page.texts().any(|t| t == "3.5"));
        assert!(page.contains_text("Topsoil run"));
        assert!(page.contains_text("Slips to follow."));
    }
}
