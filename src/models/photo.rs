use serde::{Deserialize, Serialize};

/// Reference to a slip photo held in blob storage.
///
/// Only the reference lives in the batch; bytes are fetched at render time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhotoRef {
    pub entry_id: String,
    pub storage_path: String,
    pub original_filename: String,
    /// Placement order among the photos of one entry.
    pub sequence_index: u32,
}

impl PhotoRef {
    /// Key used to re-join prefetched bytes with their page slot.
    pub fn slot_key(&self) -> (String, u32) {
        (self.entry_id.clone(), self.sequence_index)
    }
}
