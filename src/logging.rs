//! File logging. Stdout belongs to the screen, so logs never go there.

use crate::config::{Config, LogConfig};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "TXED_LOG";

/// Installs the global subscriber. Does nothing if no log file can be opened.
pub fn init(config: &LogConfig) {
    let Some(path) = log_path(config) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn log_path(config: &LogConfig) -> Option<PathBuf> {
    config
        .file
        .clone()
        .or_else(|| Config::dir().map(|dir| dir.join("txed.log")))
}

fn filter(config: &LogConfig) -> EnvFilter {
    filter_with(std::env::var(LOG_ENV).ok().as_deref(), &config.level)
}

/// The env value wins over the configured level; anything unparsable falls back.
fn filter_with(env_value: Option<&str>, level: &str) -> EnvFilter {
    env_value
        .map_or_else(|| EnvFilter::try_new(level), EnvFilter::try_new)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
