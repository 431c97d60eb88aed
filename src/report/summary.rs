//! The one-page overview opening every batch report.

use crate::models::ReportBatch;
use crate::render::{BoxStyle, Font, PageSize, Rect, Rgb, Surface, TextStyle};
use crate::report::aggregate::{self, EquipmentTotal, GroupedTotal};
use crate::report::cursor::{PageCursor, PageLayout};
use crate::report::format;
use crate::report::table::{Column, Overflow, Table, TableOutcome, TableStyle};
use chrono::NaiveDate;
use tracing::debug;

const MARGIN: f32 = 40.0;
const CARD_GAP: f32 = 10.0;
const CARD_HEIGHT: f32 = 54.0;
const SECTION_GAP: f32 = 18.0;

const LAYOUT: PageLayout = PageLayout {
    size: PageSize::LETTER,
    top_margin: MARGIN,
    bottom_margin: MARGIN,
};

const CARD: BoxStyle = BoxStyle {
    fill: Some(Rgb(0.98, 0.98, 1.0)),
    stroke: Some(Rgb(0.85, 0.85, 0.88)),
    stroke_width: 1.0,
};

const EMPTY_STATE: TextStyle = TextStyle::new(Font::Regular, 10.0, Rgb::MUTED);

pub fn render_summary<S: Surface + ?Sized>(
    surface: &mut S,
    batch: &ReportBatch,
    title: &str,
    generated_on: NaiveDate,
) {
    let mut cursor = PageCursor::start(surface, LAYOUT);
    let page = cursor.page();

    surface.draw_text(page, MARGIN, cursor.y(), TextStyle::bold(18.0), title);
    cursor.advance(24.0);

    let filters = batch.filter.describe(batch.first_day(), batch.last_day());
    surface.draw_text(
        page,
        MARGIN,
        cursor.y(),
        TextStyle::new(Font::Regular, 10.0, Rgb(0.25, 0.25, 0.25)),
        &filters,
    );
    cursor.advance(22.0);

    let totals = aggregate::totals(&batch.entries, &batch.equipment);
    draw_cards(
        surface,
        &mut cursor,
        [
            ("Labour Hours", totals.labor),
            ("Equipment Hours", totals.equipment),
            ("Trucking Hours", totals.trucking),
        ],
    );

    employee_table(surface, &mut cursor, &aggregate::labor_by_employee(&batch.entries));
    cursor.advance(SECTION_GAP);
    equipment_table(surface, &mut cursor, &aggregate::equipment_by_name(&batch.equipment));
    cursor.advance(SECTION_GAP);
    material_table(surface, &mut cursor, &aggregate::loads_by_material(&batch.materials));

    surface.draw_text(
        page,
        MARGIN,
        28.0,
        TextStyle::new(Font::Regular, 8.0, Rgb::FAINT),
        &format!("Generated: {generated_on}"),
    );
}

fn draw_cards<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, cards: [(&str, f64); 3]) {
    let width = (PageSize::LETTER.width - MARGIN * 2.0 - CARD_GAP * 2.0) / 3.0;
    let y = cursor.y();

    for (i, (label, value)) in cards.into_iter().enumerate() {
        let x = MARGIN + i as f32 * (width + CARD_GAP);
        surface.draw_rect(
            cursor.page(),
            Rect {
                x,
                y: y - CARD_HEIGHT + 10.0,
                width,
                height: CARD_HEIGHT,
            },
            CARD,
        );
        surface.draw_text(
            cursor.page(),
            x + 10.0,
            y - 16.0,
            TextStyle::new(Font::Regular, 10.0, Rgb::MUTED),
            label,
        );
        surface.draw_text(cursor.page(), x + 10.0, y - 40.0, TextStyle::bold(18.0), &format::hours(value));
    }
    cursor.advance(CARD_HEIGHT + SECTION_GAP);
}

fn log_truncation(section: &str, outcome: TableOutcome) {
    if outcome.rows_drawn == 0 && outcome.rows_omitted > 0 {
        debug!(section, omitted = outcome.rows_omitted, "no room left for summary section");
    } else if outcome.rows_omitted > 0 {
        debug!(section, omitted = outcome.rows_omitted, "summary table truncated");
    }
}

fn employee_table<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, rows: &[GroupedTotal]) {
    let columns = [Column::left("Employee", 360.0), Column::center("Labour Hours", 140.0)];
    let table = Table {
        title: Some("Hours by Employee"),
        x: MARGIN,
        columns: &columns,
        style: TableStyle::SUMMARY,
        overflow: Overflow::Truncate { floor: 120.0 },
    };
    let outcome = table.render(
        surface,
        cursor,
        rows.iter().map(|r| vec![r.key.clone(), format::hours(r.total)]),
    );
    log_truncation("employees", outcome);
}

fn equipment_table<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, rows: &[EquipmentTotal]) {
    let columns = [
        Column::left("Equipment", 300.0),
        Column::center("Hours", 100.0),
        Column::center("Trucking", 100.0),
    ];
    let table = Table {
        title: Some("Equipment Summary"),
        x: MARGIN,
        columns: &columns,
        style: TableStyle::SUMMARY,
        overflow: Overflow::Truncate { floor: 110.0 },
    };

    if rows.is_empty() {
        if table.has_room(cursor) {
            table.draw_header(surface, cursor);
            empty_state(surface, cursor, "No equipment entries for this filter.");
        } else {
            debug!(section = "equipment", "no room left for summary section");
        }
        return;
    }
    let outcome = table.render(
        surface,
        cursor,
        rows.iter().map(|r| {
            vec![
                r.name.clone(),
                format::hours(r.hours),
                format::hours(r.trucking_hours),
            ]
        }),
    );
    log_truncation("equipment", outcome);
}

fn material_table<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, rows: &[GroupedTotal]) {
    let columns = [Column::left("Material", 360.0), Column::center("Loads", 140.0)];
    let table = Table {
        title: Some("Material Summary"),
        x: MARGIN,
        columns: &columns,
        style: TableStyle::SUMMARY,
        overflow: Overflow::Truncate { floor: 70.0 },
    };

    if rows.is_empty() {
        if table.has_room(cursor) {
            table.draw_header(surface, cursor);
            empty_state(surface, cursor, "No material entries for this filter.");
        } else {
            debug!(section = "materials", "no room left for summary section");
        }
        return;
    }
    let outcome = table.render(
        surface,
        cursor,
        rows.iter().map(|r| vec![r.key.clone(), format::loads(r.total)]),
    );
    log_truncation("materials", outcome);
}

fn empty_state<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, message: &str) {
    let baseline = cursor.y() - EMPTY_STATE.size;
    surface.draw_text(cursor.page(), MARGIN, baseline, EMPTY_STATE, message);
    cursor.advance(14.0);
}
