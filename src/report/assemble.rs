//! Top-level report builders: sequencing of pages into one document.

use crate::errors::AppResult;
use crate::models::{LaborEntry, PhotoRef, ReportBatch};
use crate::render::Surface;
use crate::report::detail::render_day;
use crate::report::entry::{EntrySheet, render_entry_sheet};
use crate::report::filename;
use crate::report::image::{self, ImageFormat};
use crate::report::prefetch::{Prefetched, prefetch};
use crate::report::slip::render_slip;
use crate::report::summary::render_summary;
use crate::source::BlobStore;
use chrono::NaiveDate;
use tracing::{info, warn};

pub const CONTENT_TYPE: &str = "application/pdf";

/// A finished report, ready to be written or served.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Heading of the batch summary page.
    pub title: String,
    /// Shown on the single-entry cover sheet.
    pub company_name: String,
    pub generated_on: NaiveDate,
    pub prefetch_workers: usize,
}

/// Build the batch report: summary, then for each day its detail pages
/// followed by its slip pages. An empty batch gives a valid zero-page document.
pub fn build_batch_report<S, B>(
    mut surface: S,
    batch: &ReportBatch,
    blobs: &B,
    opts: &ReportOptions,
) -> AppResult<ReportDocument>
where
    S: Surface,
    B: BlobStore + ?Sized,
{
    let filename = filename::batch_filename(batch);
    if batch.is_empty() {
        info!("no entries matched, writing empty document");
        return Ok(finish(surface, filename));
    }

    let photos = batch.photos_in_page_order();
    let fetched = prefetch(blobs, &photos, opts.prefetch_workers)?;

    render_summary(&mut surface, batch, &opts.title, opts.generated_on);
    for day in batch.days() {
        render_day(&mut surface, batch, &day);
        for entry in &day.entries {
            for photo in batch.photos_of(&entry.id) {
                place_slip(&mut surface, &fetched, entry, photo);
            }
        }
    }

    let doc = finish(surface, filename);
    info!(
        entries = batch.entries.len(),
        pages = doc.page_count,
        file = %doc.filename,
        "batch report built"
    );
    Ok(doc)
}

/// Build the single-entry report: a landscape cover sheet, then its slips.
/// `batch` must hold exactly the entry to print, as from `source::load_entry`.
pub fn build_entry_report<S, B>(
    mut surface: S,
    batch: &ReportBatch,
    blobs: &B,
    opts: &ReportOptions,
) -> AppResult<ReportDocument>
where
    S: Surface,
    B: BlobStore + ?Sized,
{
    let Some(entry) = batch.entries.first() else {
        return Ok(finish(surface, filename::EMPTY_BATCH.to_string()));
    };

    let photos = batch.photos_of(&entry.id);
    let fetched = prefetch(blobs, &photos, opts.prefetch_workers)?;

    let equipment: Vec<_> = batch.equipment_of(&entry.id).cloned().collect();
    let materials: Vec<_> = batch.materials_of(&entry.id).cloned().collect();
    render_entry_sheet(
        &mut surface,
        &EntrySheet {
            company_name: &opts.company_name,
            entry,
            equipment: &equipment,
            materials: &materials,
            has_photos: !photos.is_empty(),
        },
    );
    for photo in photos {
        place_slip(&mut surface, &fetched, entry, photo);
    }

    let doc = finish(surface, filename::entry_filename(entry));
    info!(entry = %entry.id, pages = doc.page_count, "entry report built");
    Ok(doc)
}

/// Decode and draw one slip page. Missing bytes or undecodable images skip
/// the photo; the rest of the document is unaffected.
fn place_slip<S: Surface>(surface: &mut S, fetched: &Prefetched, entry: &LaborEntry, photo: &PhotoRef) {
    let Some(bytes) = fetched.get(photo) else {
        return;
    };

    let decoded = match image::decode(bytes, ImageFormat::from_path(&photo.storage_path)) {
        Ok(d) => d,
        Err(e) => {
            warn!(
                entry_id = %photo.entry_id,
                storage_path = %photo.storage_path,
                error = %e,
                "skipping undecodable slip photo"
            );
            return;
        }
    };

    let id = surface.embed_image(&decoded);
    render_slip(surface, entry, photo, id, &decoded);
}

fn finish<S: Surface>(surface: S, filename: String) -> ReportDocument {
    let page_count = surface.page_count();
    ReportDocument {
        bytes: surface.finish(),
        filename,
        content_type: CONTENT_TYPE,
        page_count,
    }
}
