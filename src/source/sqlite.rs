//! SQLite-backed timesheet store.

use crate::errors::{AppError, AppResult};
use crate::models::{
    EquipmentLine, HaulingUnits, LaborEntry, MaterialLine, PhotoRef, RawEquipmentRow, ReportFilter,
};
use crate::source::{TimesheetSource, number_photos};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, Row, params_from_iter};
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS timesheets (
    id             TEXT PRIMARY KEY,
    work_date      TEXT NOT NULL,
    worker_name    TEXT NOT NULL,
    job_type       TEXT NOT NULL DEFAULT '',
    job_text_clean TEXT NOT NULL DEFAULT '',
    total_hours    REAL NOT NULL DEFAULT 0,
    notes          TEXT
);
CREATE INDEX IF NOT EXISTS idx_timesheets_work_date ON timesheets(work_date);

CREATE TABLE IF NOT EXISTS equipment_entries (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    timesheet_id   TEXT NOT NULL REFERENCES timesheets(id) ON DELETE CASCADE,
    equipment      TEXT NOT NULL,
    attachment     TEXT,
    hours          REAL,
    notes          TEXT,
    trucking_hours REAL,
    trucking_notes TEXT
);

CREATE TABLE IF NOT EXISTS material_entries (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    timesheet_id   TEXT NOT NULL REFERENCES timesheets(id) ON DELETE CASCADE,
    material       TEXT NOT NULL,
    loads          REAL NOT NULL DEFAULT 0,
    notes          TEXT
);

CREATE TABLE IF NOT EXISTS photo_entries (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    timesheet_id   TEXT NOT NULL REFERENCES timesheets(id) ON DELETE CASCADE,
    path           TEXT NOT NULL,
    filename       TEXT NOT NULL DEFAULT '',
    created_at     TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
";

pub struct SqliteSource {
    conn: Connection,
    hauling: HaulingUnits,
    max_entries: usize,
}

impl SqliteSource {
    pub fn open(path: &Path, hauling: HaulingUnits, max_entries: usize) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self::with_connection(conn, hauling, max_entries))
    }

    pub fn with_connection(conn: Connection, hauling: HaulingUnits, max_entries: usize) -> Self {
        Self {
            conn,
            hauling,
            max_entries,
        }
    }

    /// Create the tables when missing. Existing data is left alone.
    pub fn init_schema(&self) -> AppResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

const ENTRY_COLUMNS: &str =
    "id, work_date, worker_name, job_type, job_text_clean, total_hours, notes";

fn map_entry(row: &Row) -> rusqlite::Result<LaborEntry> {
    let date_str: String = row.get("work_date")?;
    let work_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(LaborEntry {
        id: row.get("id")?,
        work_date,
        employee_name: row.get("worker_name")?,
        job_type: row.get("job_type")?,
        job_description: row.get("job_text_clean")?,
        total_hours: row.get::<_, Option<f64>>("total_hours")?.unwrap_or(0.0),
        notes: row.get::<_, Option<String>>("notes")?.unwrap_or_default(),
    })
}

/// `?, ?, ?` for an `IN (...)` list of `n` values.
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

impl TimesheetSource for SqliteSource {
    fn query_entries(&self, filter: &ReportFilter) -> AppResult<Vec<LaborEntry>> {
        let mut sql = format!("SELECT {ENTRY_COLUMNS} FROM timesheets WHERE 1 = 1");
        let mut args: Vec<Value> = Vec::new();

        if let Some(from) = filter.date_from() {
            sql.push_str(" AND work_date >= ?");
            args.push(Value::Text(from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = filter.date_to() {
            sql.push_str(" AND work_date <= ?");
            args.push(Value::Text(to.format("%Y-%m-%d").to_string()));
        }
        if let Some(employee) = filter.employee().value() {
            sql.push_str(" AND worker_name = ?");
            args.push(Value::Text(employee.to_string()));
        }
        if let Some(job_type) = filter.job_type().value() {
            sql.push_str(" AND job_type = ?");
            args.push(Value::Text(job_type.to_string()));
        }
        if let Some(needle) = filter.text_search() {
            // LIKE is case-insensitive for ASCII in SQLite
            sql.push_str(" AND job_text_clean LIKE ? ESCAPE '\\'");
            let escaped = needle
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_");
            args.push(Value::Text(format!("%{escaped}%")));
        }
        sql.push_str(" ORDER BY work_date ASC, rowid ASC LIMIT ?");
        args.push(Value::Integer(self.max_entries as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args), map_entry)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn entry(&self, id: &str) -> AppResult<Option<LaborEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ENTRY_COLUMNS} FROM timesheets WHERE id = ?1"))?;
        let mut rows = stmt.query_map([id], map_entry)?;
        Ok(rows.next().transpose()?)
    }

    fn equipment_for(&self, entry_ids: &[String]) -> AppResult<Vec<EquipmentLine>> {
        if entry_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT timesheet_id, equipment, attachment, hours, notes, trucking_hours, trucking_notes
             FROM equipment_entries
             WHERE timesheet_id IN ({})
             ORDER BY id ASC",
            placeholders(entry_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(entry_ids), |row| {
            Ok(RawEquipmentRow {
                entry_id: row.get("timesheet_id")?,
                equipment: row.get("equipment")?,
                attachment: row.get("attachment")?,
                hours: row.get("hours")?,
                notes: row.get("notes")?,
                trucking_hours: row.get("trucking_hours")?,
                trucking_notes: row.get("trucking_notes")?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?.ingest(&self.hauling));
        }
        Ok(out)
    }

    fn materials_for(&self, entry_ids: &[String]) -> AppResult<Vec<MaterialLine>> {
        if entry_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT timesheet_id, material, loads, notes
             FROM material_entries
             WHERE timesheet_id IN ({})
             ORDER BY id ASC",
            placeholders(entry_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(entry_ids), |row| {
            Ok(MaterialLine {
                entry_id: row.get("timesheet_id")?,
                material_name: row.get("material")?,
                loads: row.get::<_, Option<f64>>("loads")?.unwrap_or(0.0),
                notes: row.get("notes")?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn photos_for(&self, entry_ids: &[String]) -> AppResult<Vec<PhotoRef>> {
        if entry_ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT timesheet_id, path, filename
             FROM photo_entries
             WHERE timesheet_id IN ({})
             ORDER BY created_at ASC, id ASC",
            placeholders(entry_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(entry_ids), |row| {
            Ok((
                row.get::<_, String>("timesheet_id")?,
                row.get::<_, String>("path")?,
                row.get::<_, String>("filename")?,
            ))
        })?;

        let mut ordered = Vec::new();
        for r in rows {
            ordered.push(r?);
        }
        Ok(number_photos(ordered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EquipmentUsage, Selection};
    use rusqlite::params;

    fn seeded() -> SqliteSource {
        let src = SqliteSource::with_connection(
            Connection::open_in_memory().unwrap(),
            HaulingUnits::default(),
            500,
        );
        src.init_schema().unwrap();
        let c = src.connection();
        for (id, date, who, job) in [
            ("a", "2025-03-04", "Shawn", "Grade lot 5_B"),
            ("b", "2025-03-03", "Dave", "Trench for drainage"),
            ("c", "2025-03-05", "Shawn", "Snow removal"),
        ] {
            c.execute(
                "INSERT INTO timesheets (id, work_date, worker_name, job_type, job_text_clean, total_hours)
                 VALUES (?1, ?2, ?3, 'Commercial', ?4, 8)",
                params![id, date, who, job],
            )
            .unwrap();
        }
        c.execute(
            "INSERT INTO equipment_entries (timesheet_id, equipment, trucking_hours) VALUES ('a', 'Dump Truck', 2.5)",
            [],
        )
        .unwrap();
        c.execute(
            "INSERT INTO material_entries (timesheet_id, material, loads) VALUES ('b', 'Rip Rap', 3)",
            [],
        )
        .unwrap();
        for (path, at) in [("a/2.jpg", "2025-03-04 10:00:00"), ("a/1.jpg", "2025-03-04 09:00:00")] {
            c.execute(
                "INSERT INTO photo_entries (timesheet_id, path, filename, created_at) VALUES ('a', ?1, ?1, ?2)",
                params![path, at],
            )
            .unwrap();
        }
        src
    }

    #[test]
    fn entries_come_back_in_date_order() {
        let src = seeded();
        let all = src.query_entries(&ReportFilter::default()).unwrap();
        let ids: Vec<&str> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn filter_is_applied_in_sql() {
        let src = seeded();
        let f = ReportFilter::builder()
            .employee(Selection::Only("Shawn".into()))
            .text_search(Some("GRADE"))
            .build();
        let rows = src.query_entries(&f).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "a");

        // underscore is literal, not a wildcard
        let f = ReportFilter::builder().text_search(Some("5_B")).build();
        assert_eq!(src.query_entries(&f).unwrap().len(), 1);
        let f = ReportFilter::builder().text_search(Some("5_C")).build();
        assert!(src.query_entries(&f).unwrap().is_empty());
    }

    #[test]
    fn limit_applies() {
        let src = SqliteSource { max_entries: 2, ..seeded() };
        assert_eq!(src.query_entries(&ReportFilter::default()).unwrap().len(), 2);
    }

    #[test]
    fn lines_and_photos_for_ids() {
        let src = seeded();
        let ids = vec!["a".to_string(), "b".to_string()];
        let eq = src.equipment_for(&ids).unwrap();
        assert_eq!(
            eq[0].usage,
            EquipmentUsage::Hauling {
                trucking_hours: Some(2.5)
            }
        );
        assert_eq!(src.materials_for(&ids).unwrap()[0].loads, 3.0);

        let photos = src.photos_for(&ids).unwrap();
        assert_eq!(photos[0].storage_path, "a/1.jpg");
        assert_eq!(photos[0].sequence_index, 0);
        assert_eq!(photos[1].sequence_index, 1);
        assert!(src.photos_for(&[]).unwrap().is_empty());
    }

    #[test]
    fn unknown_entry_is_none() {
        assert!(seeded().entry("zzz").unwrap().is_none());
        assert_eq!(seeded().entry("c").unwrap().unwrap().job_description, "Snow removal");
    }
}
