use crate::cli::commands::{open_source, resolve_dates};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::ReportFilter;
use crate::report::filename::payroll_filename;
use crate::report::payroll::{payroll_rows, write_payroll_csv};
use crate::ui::messages::{success, warning};
use crate::utils::fs_utils::{resolve_output, write_output};

/// Handle the `payroll` command: hours per employee and pay week as CSV.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Payroll { dates, out, force } = &cli.command else {
        return Ok(());
    };

    let (Some(from), Some(to)) = resolve_dates(dates)? else {
        return Err(AppError::InvalidRange(
            "payroll needs both --from and --to, or --range".into(),
        ));
    };

    let filter = ReportFilter::builder()
        .date_from(Some(from))
        .date_to(Some(to))
        .build();
    let source = open_source(cli, cfg)?;
    let entries = source.query_entries(&filter)?;
    if entries.is_empty() {
        warning(format!("No timesheet entries between {from} and {to}."));
    }

    let rows = payroll_rows(&entries, cfg.pay_week_start()?);
    let mut buf = Vec::new();
    write_payroll_csv(&mut buf, &rows)?;

    let path = resolve_output(out.as_deref(), &payroll_filename(from, to));
    write_output(&path, &buf, *force)?;
    success(format!("Payroll written: {} ({} rows)", path.display(), rows.len()));
    Ok(())
}
