//! Per-day detail pages: a day header followed by one block per entry.

use crate::models::{DayGroup, EquipmentLine, LaborEntry, MaterialLine, ReportBatch};
use crate::render::{BoxStyle, Font, PageSize, Rect, Rgb, Surface, TextStyle};
use crate::report::cursor::{PageCursor, PageLayout};
use crate::report::format;
use crate::report::table::{Column, Overflow, Table, TableStyle};
use crate::report::text::{draw_lines, draw_paragraph, fit_text};
use crate::report::wrap::wrap_lines;

const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PageSize::LETTER.width - MARGIN * 2.0;
/// Tables and paragraphs are indented inside the entry block.
const INSET: f32 = 10.0;

pub const LAYOUT: PageLayout = PageLayout {
    size: PageSize::LETTER,
    top_margin: MARGIN,
    bottom_margin: 60.0,
};

const HEADER_BAR: BoxStyle = BoxStyle {
    fill: Some(Rgb(0.96, 0.96, 0.98)),
    stroke: Some(Rgb::RULE),
    stroke_width: 1.0,
};

fn equipment_columns() -> [Column; 5] {
    let inner = CONTENT_WIDTH - INSET * 2.0;
    [
        Column::left("Equipment", 150.0),
        Column::left("Attachment", 70.0),
        Column::center("Equip Hrs", 60.0),
        Column::center("Truck Hrs", 60.0),
        Column::left("Notes", inner - 340.0),
    ]
}

fn material_columns() -> [Column; 3] {
    let inner = CONTENT_WIDTH - INSET * 2.0;
    [
        Column::left("Material", 240.0),
        Column::center("Loads", 60.0),
        Column::left("Notes", inner - 300.0),
    ]
}

fn equipment_row(line: &EquipmentLine) -> Vec<String> {
    vec![
        line.equipment_name.clone(),
        line.attachment.clone().unwrap_or_default(),
        format::stored_opt(line.usage.operated_hours()),
        format::stored_opt(line.usage.trucking_hours()),
        line.notes.clone().unwrap_or_default(),
    ]
}

fn material_row(line: &MaterialLine) -> Vec<String> {
    vec![
        line.material_name.clone(),
        format::stored(line.loads),
        line.notes.clone().unwrap_or_default(),
    ]
}

/// `employee • job-summary • job-type • <h> h`, skipping blank parts.
pub fn entry_header(entry: &LaborEntry) -> String {
    let hours = format!("{} h", format::hours(entry.total_hours));
    let summary = entry.job_summary();
    [
        entry.employee_name.trim(),
        summary.as_str(),
        entry.job_type.trim(),
        hours.as_str(),
    ]
    .into_iter()
    .filter(|p| !p.is_empty())
    .collect::<Vec<_>>()
    .join(" • ")
}

/// Start a fresh page for `day` and draw all of its entry blocks.
pub fn render_day<S: Surface + ?Sized>(surface: &mut S, batch: &ReportBatch, day: &DayGroup<'_>) {
    let mut cursor = PageCursor::start(surface, LAYOUT);
    draw_day_header(surface, &mut cursor, day);

    for entry in &day.entries {
        draw_entry_block(surface, &mut cursor, batch, entry);
    }
}

fn draw_day_header<S: Surface + ?Sized>(surface: &mut S, cursor: &mut PageCursor, day: &DayGroup<'_>) {
    let page = cursor.page();
    surface.draw_text(page, MARGIN, cursor.y(), TextStyle::bold(14.0), &format!("Day: {}", day.date));
    cursor.advance(18.0);

    let n = day.entries.len();
    let labour: f64 = day
        .entries
        .iter()
        .map(|e| crate::report::aggregate::finite_or_zero(e.total_hours))
        .sum();
    let line = format!(
        "{n} entr{} • Total Labour: {} h",
        if n == 1 { "y" } else { "ies" },
        format::hours(labour)
    );
    surface.draw_text(page, MARGIN, cursor.y(), TextStyle::new(Font::Regular, 9.0, Rgb::MUTED), &line);
    cursor.advance(16.0);

    let y = cursor.y();
    surface.draw_line(page, (MARGIN, y), (MARGIN + CONTENT_WIDTH, y), 1.0, Rgb::RULE);
    cursor.advance(14.0);
}

fn draw_entry_block<S: Surface + ?Sized>(
    surface: &mut S,
    cursor: &mut PageCursor,
    batch: &ReportBatch,
    entry: &LaborEntry,
) {
    let text_x = MARGIN + INSET;
    let text_w = CONTENT_WIDTH - INSET * 2.0;

    // header bar plus the first job line
    cursor.ensure_space(surface, 80.0, None);
    let top = cursor.y();
    surface.draw_rect(
        cursor.page(),
        Rect {
            x: MARGIN,
            y: top - 16.0,
            width: CONTENT_WIDTH,
            height: 16.0,
        },
        HEADER_BAR,
    );
    let header_style = TextStyle::new(Font::Bold, 10.0, Rgb::INK);
    let header = fit_text(&*surface, header_style, &entry_header(entry), text_w);
    surface.draw_text(cursor.page(), text_x, top - 12.0, header_style, &header);
    cursor.advance(30.0);

    draw_paragraph(surface, cursor, text_x, text_w, TextStyle::regular(10.0), 12.0, &entry.job_description);
    cursor.advance(6.0);

    let notes = entry.notes.trim();
    let notes = if notes.is_empty() { "—" } else { notes };
    let notes_style = TextStyle::new(Font::Regular, 9.0, Rgb::BODY);
    let note_lines = wrap_lines(&*surface, notes, notes_style.font, notes_style.size, text_w);

    // The label travels with the whole block, or with its first line when
    // the block is too tall for any page.
    let label_h = 2.0 + 12.0;
    let block_h = note_lines.len() as f32 * 11.0 + 10.0;
    let keep = if label_h + block_h <= cursor.layout().usable_height() {
        block_h
    } else {
        11.0
    };
    cursor.ensure_space(surface, label_h + keep, None);
    cursor.advance(2.0);
    surface.draw_text(
        cursor.page(),
        text_x,
        cursor.y(),
        TextStyle::new(Font::Bold, 9.0, Rgb::MUTED),
        "Notes:",
    );
    cursor.advance(12.0);
    draw_lines(surface, cursor, text_x, notes_style, 11.0, &note_lines);
    cursor.advance(10.0);

    let equipment: Vec<Vec<String>> = batch.equipment_of(&entry.id).map(equipment_row).collect();
    if !equipment.is_empty() {
        let columns = equipment_columns();
        let table = Table {
            title: Some("Time / Equipment"),
            x: text_x,
            columns: &columns,
            style: TableStyle::DETAIL,
            overflow: Overflow::Paginate,
        };
        table.render(surface, cursor, equipment);
        cursor.advance(6.0);
    }

    let materials: Vec<Vec<String>> = batch.materials_of(&entry.id).map(material_row).collect();
    if !materials.is_empty() {
        let columns = material_columns();
        let table = Table {
            title: Some("Materials"),
            x: text_x,
            columns: &columns,
            style: TableStyle::DETAIL,
            overflow: Overflow::Paginate,
        };
        table.render(surface, cursor, materials);
        cursor.advance(4.0);
    }

    cursor.advance(10.0);
}
