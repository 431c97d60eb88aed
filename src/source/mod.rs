//! Where report data comes from: timesheet records and slip blobs.

pub mod blobs;
pub mod memory;
pub mod sqlite;

pub use blobs::{DirBlobStore, MemoryBlobStore};
pub use memory::MemorySource;
pub use sqlite::SqliteSource;

use crate::errors::{AppError, AppResult};
use crate::models::{EquipmentLine, LaborEntry, MaterialLine, PhotoRef, ReportBatch, ReportFilter};
use thiserror::Error;
use tracing::debug;

/// Read access to stored timesheets.
///
/// Implementations only read; nothing here writes back.
pub trait TimesheetSource {
    /// Entries matching `filter`, ascending by work date.
    fn query_entries(&self, filter: &ReportFilter) -> AppResult<Vec<LaborEntry>>;

    fn entry(&self, id: &str) -> AppResult<Option<LaborEntry>>;

    fn equipment_for(&self, entry_ids: &[String]) -> AppResult<Vec<EquipmentLine>>;

    fn materials_for(&self, entry_ids: &[String]) -> AppResult<Vec<MaterialLine>>;

    /// Photos with `sequence_index` assigned per entry in upload order.
    fn photos_for(&self, entry_ids: &[String]) -> AppResult<Vec<PhotoRef>>;
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("timed out fetching {0}")]
    TimedOut(String),

    #[error("invalid storage path: {0}")]
    InvalidPath(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Raw bytes of stored slip photos.
pub trait BlobStore: Send + Sync {
    fn fetch(&self, storage_path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Load the read-only snapshot one batch report is built from.
pub fn load_batch<S: TimesheetSource + ?Sized>(source: &S, filter: &ReportFilter) -> AppResult<ReportBatch> {
    let entries = source.query_entries(filter)?;
    if entries.is_empty() {
        return Ok(ReportBatch {
            filter: filter.clone(),
            ..Default::default()
        });
    }

    let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
    let batch = ReportBatch {
        filter: filter.clone(),
        equipment: source.equipment_for(&ids)?,
        materials: source.materials_for(&ids)?,
        photos: source.photos_for(&ids)?,
        entries,
    };
    debug!(
        entries = batch.entries.len(),
        equipment = batch.equipment.len(),
        materials = batch.materials.len(),
        photos = batch.photos.len(),
        "batch loaded"
    );
    Ok(batch)
}

/// Load one entry with its lines and photos, failing when the id is unknown.
pub fn load_entry<S: TimesheetSource + ?Sized>(source: &S, id: &str) -> AppResult<ReportBatch> {
    let entry = source
        .entry(id)?
        .ok_or_else(|| AppError::EntryNotFound(id.to_string()))?;

    let ids = vec![entry.id.clone()];
    Ok(ReportBatch {
        filter: ReportFilter::default(),
        equipment: source.equipment_for(&ids)?,
        materials: source.materials_for(&ids)?,
        photos: source.photos_for(&ids)?,
        entries: vec![entry],
    })
}

/// Give each entry's photos consecutive sequence numbers, in the given order.
pub(crate) fn number_photos(rows: impl IntoIterator<Item = (String, String, String)>) -> Vec<PhotoRef> {
    let mut next: std::collections::HashMap<String, u32> = std::collections::HashMap::new();
    rows.into_iter()
        .map(|(entry_id, storage_path, original_filename)| {
            let seq = next.entry(entry_id.clone()).or_default();
            let photo = PhotoRef {
                entry_id,
                storage_path,
                original_filename,
                sequence_index: *seq,
            };
            *seq += 1;
            photo
        })
        .collect()
}
