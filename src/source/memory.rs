use crate::errors::AppResult;
use crate::models::{
    EquipmentLine, HaulingUnits, LaborEntry, MaterialLine, PhotoRef, RawEquipmentRow, ReportFilter,
};
use crate::source::{TimesheetSource, number_photos};
use serde::Deserialize;
use std::path::Path;

/// Photo row as exported, in upload order.
#[derive(Debug, Deserialize)]
struct SnapshotPhoto {
    entry_id: String,
    path: String,
    #[serde(default)]
    filename: String,
}

/// JSON export of the timesheet tables.
#[derive(Debug, Deserialize)]
struct Snapshot {
    entries: Vec<LaborEntry>,
    #[serde(default)]
    equipment: Vec<RawEquipmentRow>,
    #[serde(default)]
    materials: Vec<MaterialLine>,
    #[serde(default)]
    photos: Vec<SnapshotPhoto>,
}

/// In-memory timesheet store, applying filters in Rust.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: Vec<LaborEntry>,
    equipment: Vec<EquipmentLine>,
    materials: Vec<MaterialLine>,
    photos: Vec<PhotoRef>,
    max_entries: Option<usize>,
}

impl MemorySource {
    pub fn new(
        entries: Vec<LaborEntry>,
        equipment: Vec<EquipmentLine>,
        materials: Vec<MaterialLine>,
        photos: Vec<PhotoRef>,
    ) -> Self {
        Self {
            entries,
            equipment,
            materials,
            photos,
            max_entries: None,
        }
    }

    /// Cap the number of entries a query returns.
    pub fn with_limit(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    pub fn from_json(json: &str, hauling: &HaulingUnits) -> AppResult<Self> {
        let snap: Snapshot = serde_json::from_str(json)?;
        let photos = number_photos(
            snap.photos
                .into_iter()
                .map(|p| (p.entry_id, p.path, p.filename)),
        );
        Ok(Self::new(
            snap.entries,
            snap.equipment.into_iter().map(|r| r.ingest(hauling)).collect(),
            snap.materials,
            photos,
        ))
    }

    pub fn load(path: &Path, hauling: &HaulingUnits) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json, hauling)
    }
}

fn owned_by<'a, T: 'a>(
    rows: &'a [T],
    ids: &'a [String],
    entry_id: impl Fn(&T) -> &str + 'a,
) -> impl Iterator<Item = &'a T> {
    rows.iter().filter(move |r| ids.iter().any(|id| id == entry_id(*r)))
}

impl TimesheetSource for MemorySource {
    fn query_entries(&self, filter: &ReportFilter) -> AppResult<Vec<LaborEntry>> {
        let mut out: Vec<LaborEntry> = self
            .entries
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect();
        out.sort_by_key(|e| e.work_date);
        if let Some(max) = self.max_entries {
            out.truncate(max);
        }
        Ok(out)
    }

    fn entry(&self, id: &str) -> AppResult<Option<LaborEntry>> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }

    fn equipment_for(&self, entry_ids: &[String]) -> AppResult<Vec<EquipmentLine>> {
        Ok(owned_by(&self.equipment, entry_ids, |l| l.entry_id.as_str())
            .cloned()
            .collect())
    }

    fn materials_for(&self, entry_ids: &[String]) -> AppResult<Vec<MaterialLine>> {
        Ok(owned_by(&self.materials, entry_ids, |l| l.entry_id.as_str())
            .cloned()
            .collect())
    }

    fn photos_for(&self, entry_ids: &[String]) -> AppResult<Vec<PhotoRef>> {
        Ok(owned_by(&self.photos, entry_ids, |p| p.entry_id.as_str())
            .cloned()
            .collect())
    }
}
