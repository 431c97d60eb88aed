//! Subcommand handlers and the plumbing they share.

pub mod batch;
pub mod config;
pub mod entry;
pub mod init;
pub mod payroll;

use crate::cli::parser::{Cli, FilterArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::report::ReportOptions;
use crate::source::{DirBlobStore, MemorySource, SqliteSource, TimesheetSource};
use crate::utils::path::expand_tilde;
use crate::utils::{date, range};
use chrono::NaiveDate;

/// Open the snapshot when `--snapshot` is given, the SQLite database otherwise.
pub(crate) fn open_source(cli: &Cli, cfg: &Config) -> AppResult<Box<dyn TimesheetSource>> {
    let hauling = cfg.hauling_units();
    match &cli.snapshot {
        Some(snapshot) => {
            let src = MemorySource::load(&expand_tilde(snapshot), &hauling)?;
            Ok(Box::new(src.with_limit(cfg.max_entries)))
        }
        None => {
            let path = expand_tilde(&cfg.database);
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "database '{}' not found, run `sitesheet init` first",
                    path.display()
                )));
            }
            Ok(Box::new(SqliteSource::open(&path, hauling, cfg.max_entries)?))
        }
    }
}

pub(crate) fn blob_store(cfg: &Config) -> DirBlobStore {
    DirBlobStore::new(expand_tilde(&cfg.blob_root))
}

pub(crate) fn report_options(cfg: &Config) -> ReportOptions {
    ReportOptions {
        title: cfg.report_title.clone(),
        company_name: cfg.company_name.clone(),
        generated_on: date::today(),
        prefetch_workers: cfg.prefetch_workers,
    }
}

/// Turn `--from/--to` or `--range` into optional bounds.
pub(crate) fn resolve_dates(args: &FilterArgs) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    if let Some(r) = &args.range {
        let (from, to) = range::parse_range(r)?;
        return Ok((Some(from), Some(to)));
    }
    let from = args.from.as_deref().map(date::parse_date).transpose()?;
    let to = args.to.as_deref().map(date::parse_date).transpose()?;
    match (from, to) {
        (Some(f), Some(t)) if f > t => Err(AppError::InvalidRange(format!("{f} is after {t}"))),
        bounds => Ok(bounds),
    }
}
