use crate::errors::{AppError, AppResult};
use crate::models::HaulingUnits;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SITESHEET_HOME";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_blob_root")]
    pub blob_root: String,
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default = "default_report_title")]
    pub report_title: String,
    /// Upper bound on entries pulled into one batch report.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_prefetch_workers")]
    pub prefetch_workers: usize,
    #[serde(default = "default_pay_week_start")]
    pub pay_week_start: String,
    /// Equipment names logged with trucking hours instead of operated hours.
    #[serde(default = "default_hauling_units")]
    pub hauling_units: Vec<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_blob_root() -> String {
    Config::config_dir().join("slips").to_string_lossy().to_string()
}
fn default_company_name() -> String {
    "Timesheets".to_string()
}
fn default_report_title() -> String {
    "Timesheet Report".to_string()
}
fn default_max_entries() -> usize {
    500
}
fn default_prefetch_workers() -> usize {
    4
}
fn default_pay_week_start() -> String {
    "Thu".to_string()
}
fn default_hauling_units() -> Vec<String> {
    vec!["Dump Truck".to_string()]
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            blob_root: default_blob_root(),
            company_name: default_company_name(),
            report_title: default_report_title(),
            max_entries: default_max_entries(),
            prefetch_workers: default_prefetch_workers(),
            pay_week_start: default_pay_week_start(),
            hauling_units: default_hauling_units(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("sitesheet")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".sitesheet")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sitesheet.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("sitesheet.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    fn validate(&self) -> AppResult<()> {
        self.pay_week_start()?;
        if self.max_entries == 0 {
            return Err(AppError::Config("max_entries must be at least 1".into()));
        }
        Ok(())
    }

    pub fn pay_week_start(&self) -> AppResult<Weekday> {
        crate::report::payroll::parse_weekday(&self.pay_week_start)
    }

    pub fn hauling_units(&self) -> HaulingUnits {
        HaulingUnits::new(self.hauling_units.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_conf(name: &str) -> PathBuf {
        let p = env::temp_dir().join(format!("sitesheet_cfg_{name}_{}.conf", std::process::id()));
        let _ = fs::remove_file(&p);
        p
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let p = temp_conf("partial");
        fs::write(&p, "database: /tmp/ts.sqlite\ncompany_name: Conrod Construction\n").unwrap();
        let cfg = Config::load_from(&p).unwrap();
        assert_eq!(cfg.database, "/tmp/ts.sqlite");
        assert_eq!(cfg.company_name, "Conrod Construction");
        assert_eq!(cfg.max_entries, 500);
        assert_eq!(cfg.prefetch_workers, 4);
        assert_eq!(cfg.pay_week_start().unwrap(), Weekday::Thu);
        assert!(cfg.hauling_units().contains("dump truck"));
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn bad_week_start_is_rejected() {
        let p = temp_conf("bad");
        fs::write(&p, "database: x\npay_week_start: Funday\n").unwrap();
        assert!(matches!(Config::load_from(&p), Err(AppError::Config(_))));
        let _ = fs::remove_file(&p);
    }

    #[test]
    fn save_then_load() {
        let p = temp_conf("roundtrip");
        let cfg = Config {
            max_entries: 50,
            ..Config::default()
        };
        cfg.save_to(&p).unwrap();
        assert_eq!(Config::load_from(&p).unwrap().max_entries, 50);
        let _ = fs::remove_file(&p);
    }
}
