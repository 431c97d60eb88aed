//! Parallel download of slip photo bytes ahead of layout.
//!
//! Fetching is the only concurrent part of a report build. Results are
//! keyed by `(entry_id, sequence_index)` so the single-threaded assembler
//! can place them in page order regardless of completion order.

use crate::errors::AppResult;
use crate::models::PhotoRef;
use crate::source::BlobStore;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Photo bytes that were fetched successfully.
#[derive(Debug, Default)]
pub struct Prefetched {
    slots: HashMap<(String, u32), Vec<u8>>,
}

impl Prefetched {
    pub fn get(&self, photo: &PhotoRef) -> Option<&[u8]> {
        self.slots.get(&photo.slot_key()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Fetch every photo on a pool of `workers` threads.
///
/// A failed fetch is logged and leaves its slot empty; it never fails the
/// whole call. Only a pool that cannot be started is an error.
pub fn prefetch<B: BlobStore + ?Sized>(store: &B, photos: &[&PhotoRef], workers: usize) -> AppResult<Prefetched> {
    if photos.is_empty() {
        return Ok(Prefetched::default());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("slip-fetch-{i}"))
        .build()?;

    let fetched: Vec<((String, u32), Option<Vec<u8>>)> = pool.install(|| {
        photos
            .par_iter()
            .map(|photo| {
                let bytes = match store.fetch(&photo.storage_path) {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        warn!(
                            entry_id = %photo.entry_id,
                            storage_path = %photo.storage_path,
                            error = %e,
                            "skipping slip photo"
                        );
                        None
                    }
                };
                (photo.slot_key(), bytes)
            })
            .collect()
    });

    let slots: HashMap<(String, u32), Vec<u8>> = fetched
        .into_iter()
        .filter_map(|(key, bytes)| bytes.map(|b| (key, b)))
        .collect();
    debug!(requested = photos.len(), fetched = slots.len(), "slip prefetch done");
    Ok(Prefetched { slots })
}
