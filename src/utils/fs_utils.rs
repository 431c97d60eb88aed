use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Check whether a file can be created or overwritten.
///
/// - file does NOT exist → Ok
/// - file exists and `force` is set → Ok
/// - file exists and `force == false` → ask the user for confirmation.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer).map_err(AppError::from)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled: existing file not overwritten".to_string(),
        ))
    }
}

/// Where to write a report: `out` as given, `suggested` inside `out` when it
/// is a directory, or `suggested` in the working directory when absent.
pub(crate) fn resolve_output(out: Option<&str>, suggested: &str) -> PathBuf {
    match out {
        Some(p) => {
            let p = crate::utils::path::expand_tilde(p);
            if p.is_dir() { p.join(suggested) } else { p }
        }
        None => PathBuf::from(suggested),
    }
}

/// Write `bytes` to `path` after the overwrite check, creating parent dirs.
pub(crate) fn write_output(path: &Path, bytes: &[u8], force: bool) -> AppResult<()> {
    ensure_writable(path, force)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
