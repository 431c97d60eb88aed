use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        info(format!("Current configuration ({}):\n", path.display()));
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if *edit_config {
        if !path.exists() {
            cfg.save_to(&path)?;
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let editor_to_use = editor.clone().unwrap_or_else(|| default_editor.clone());

        if run_editor(&editor_to_use, &path) {
            success(format!("Configuration file edited using '{editor_to_use}'"));
        } else {
            warning(format!(
                "Editor '{editor_to_use}' not available, falling back to '{default_editor}'"
            ));
            if !run_editor(&default_editor, &path) {
                return Err(AppError::Config(format!(
                    "failed to edit configuration file with '{default_editor}'"
                )));
            }
            success(format!("Configuration file edited using '{default_editor}'"));
        }

        // Surface mistakes right away rather than on the next report.
        Config::load_from(&path)?;
    }

    Ok(())
}

fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}
