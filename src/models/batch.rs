use crate::models::{EquipmentLine, LaborEntry, MaterialLine, PhotoRef, ReportFilter};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Read-only snapshot of everything one report request covers.
#[derive(Debug, Clone, Default)]
pub struct ReportBatch {
    pub filter: ReportFilter,
    pub entries: Vec<LaborEntry>,
    pub equipment: Vec<EquipmentLine>,
    pub materials: Vec<MaterialLine>,
    pub photos: Vec<PhotoRef>,
}

/// Entries of one work date, in input order.
#[derive(Debug)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a LaborEntry>,
}

impl ReportBatch {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.entries.iter().map(|e| e.work_date).min()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.entries.iter().map(|e| e.work_date).max()
    }

    /// Distinct work dates ascending, each with its entries in input order.
    pub fn days(&self) -> Vec<DayGroup<'_>> {
        let mut by_day: BTreeMap<NaiveDate, Vec<&LaborEntry>> = BTreeMap::new();
        for e in &self.entries {
            by_day.entry(e.work_date).or_default().push(e);
        }
        by_day
            .into_iter()
            .map(|(date, entries)| DayGroup { date, entries })
            .collect()
    }

    pub fn equipment_of<'a>(&'a self, entry_id: &'a str) -> impl Iterator<Item = &'a EquipmentLine> {
        self.equipment.iter().filter(move |l| l.entry_id == entry_id)
    }

    pub fn materials_of<'a>(&'a self, entry_id: &'a str) -> impl Iterator<Item = &'a MaterialLine> {
        self.materials.iter().filter(move |l| l.entry_id == entry_id)
    }

    /// Photos of one entry sorted by `sequence_index`.
    pub fn photos_of(&self, entry_id: &str) -> Vec<&PhotoRef> {
        let mut out: Vec<&PhotoRef> = self
            .photos
            .iter()
            .filter(|p| p.entry_id == entry_id)
            .collect();
        out.sort_by_key(|p| p.sequence_index);
        out
    }

    /// Every photo in page order: day, then entry, then sequence.
    pub fn photos_in_page_order(&self) -> Vec<&PhotoRef> {
        self.days()
            .iter()
            .flat_map(|day| day.entries.iter().flat_map(|e| self.photos_of(&e.id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: (i32, u32, u32)) -> LaborEntry {
        LaborEntry {
            id: id.into(),
            work_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            employee_name: "Shawn".into(),
            job_type: "Commercial".into(),
            job_description: "Grade lot".into(),
            total_hours: 8.0,
            notes: String::new(),
        }
    }

    fn photo(entry: &str, seq: u32) -> PhotoRef {
        PhotoRef {
            entry_id: entry.into(),
            storage_path: format!("{entry}/{seq}.jpg"),
            original_filename: format!("{seq}.jpg"),
            sequence_index: seq,
        }
    }

    #[test]
    fn days_are_ascending_and_keep_entry_order() {
        let batch = ReportBatch {
            entries: vec![
                entry("b", (2025, 4, 2)),
                entry("a", (2025, 4, 1)),
                entry("c", (2025, 4, 2)),
            ],
            ..Default::default()
        };
        let days = batch.days();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].entries[0].id, "a");
        let ids: Vec<&str> = days[1].entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "c"]);
    }

    #[test]
    fn photo_page_order_is_day_entry_sequence() {
        let batch = ReportBatch {
            entries: vec![entry("late", (2025, 4, 2)), entry("early", (2025, 4, 1))],
            photos: vec![photo("late", 0), photo("early", 1), photo("early", 0)],
            ..Default::default()
        };
        let order: Vec<String> = batch
            .photos_in_page_order()
            .iter()
            .map(|p| p.storage_path.clone())
            .collect();
        assert_eq!(order, ["early/0.jpg", "early/1.jpg", "late/0.jpg"]);
    }
}
