use crate::cli::commands::{blob_store, open_source, report_options, resolve_dates};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{ReportFilter, Selection};
use crate::render::PdfSurface;
use crate::report::build_batch_report;
use crate::source::load_batch;
use crate::ui::messages::{success, warning};
use crate::utils::fs_utils::{resolve_output, write_output};

/// Handle the `batch` command: filter, load, lay out and write the PDF.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Batch {
        dates,
        employee,
        job_type,
        search,
        out,
        force,
    } = &cli.command
    else {
        return Ok(());
    };

    let (from, to) = resolve_dates(dates)?;
    let filter = ReportFilter::builder()
        .date_from(from)
        .date_to(to)
        .employee(Selection::from_input(employee.as_deref()))
        .job_type(Selection::from_input(job_type.as_deref()))
        .text_search(search.as_deref())
        .build();

    let source = open_source(cli, cfg)?;
    let batch = load_batch(source.as_ref(), &filter)?;
    if batch.is_empty() {
        warning("No timesheet entries match the filter; writing an empty report.");
    } else if batch.entries.len() >= cfg.max_entries {
        warning(format!(
            "Report limited to the first {} entries (max_entries).",
            cfg.max_entries
        ));
    }

    let doc = build_batch_report(PdfSurface::new(), &batch, &blob_store(cfg), &report_options(cfg))?;

    let path = resolve_output(out.as_deref(), &doc.filename);
    write_output(&path, &doc.bytes, *force)?;
    success(format!(
        "Batch report written: {} ({} page{})",
        path.display(),
        doc.page_count,
        if doc.page_count == 1 { "" } else { "s" }
    ));
    Ok(())
}
