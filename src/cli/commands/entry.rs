use crate::cli::commands::{blob_store, open_source, report_options};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::render::PdfSurface;
use crate::report::build_entry_report;
use crate::source::load_entry;
use crate::ui::messages::success;
use crate::utils::fs_utils::{resolve_output, write_output};

/// Handle the `entry` command: cover sheet plus slips for one timesheet.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Entry { id, out, force } = &cli.command else {
        return Ok(());
    };

    let source = open_source(cli, cfg)?;
    let batch = load_entry(source.as_ref(), id.trim())?;
    let doc = build_entry_report(PdfSurface::new(), &batch, &blob_store(cfg), &report_options(cfg))?;

    let path = resolve_output(out.as_deref(), &doc.filename);
    write_output(&path, &doc.bytes, *force)?;
    success(format!(
        "Entry report written: {} ({} pages)",
        path.display(),
        doc.page_count
    ));
    Ok(())
}
