//! Diagnostic logging for the report engine.
//!
//! stdout is left to command output and `ui::messages`; tracing events go
//! to stderr. `SITESHEET_LOG` (or `RUST_LOG`) takes precedence over the
//! configured level.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_ENV: &str = "SITESHEET_LOG";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("sitesheet={default_level}")))
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging(default_level: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(filter(default_level))
        .with(fmt_layer)
        .try_init();
}
