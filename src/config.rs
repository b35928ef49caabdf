//! Editor configuration.
//!
//! Loaded from `~/.txed/config.toml`. Every field has a default, so a
//! missing file, a missing section or a missing key all fall back cleanly:
//!
//! ```toml
//! [editor]
//! product_name = "Text Editor"
//!
//! [input]
//! # Read timeout in tenths of a second after a keypress starts
//! escape_timeout_ds = 1
//! # Also move the cursor with w/a/s/d
//! wasd_navigation = false
//!
//! [session]
//! # Exit with a failure status on Ctrl-Q
//! quit_is_failure = false
//!
//! [log]
//! level = "info"
//! # file = "/tmp/txed.log"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorConfig,
    pub input: InputConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name shown in the welcome banner
    pub product_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            product_name: "Text Editor".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub escape_timeout_ds: u8,
    pub wasd_navigation: bool,
}

impl InputConfig {
    /// Read timeout to install in raw mode. Never zero: a zero timeout
    /// makes every read return at once and the key loop spin.
    #[must_use]
    pub fn read_timeout_ds(&self) -> u8 {
        self.escape_timeout_ds.max(1)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ds: 1,
            wasd_navigation: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub quit_is_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    /// Also returns why the file was ignored, if it was.
    pub fn load() -> (Self, Option<String>) {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), None),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let reason = format!("Failed to read config {}: {}", path.display(), e);
                return (Self::default(), Some(reason));
            }
        };
        match toml::from_str(&content) {
            Ok(config) => (config, None),
            Err(e) => {
                let reason = format!("Failed to parse config {}: {}", path.display(), e);
                (Self::default(), Some(reason))
            }
        }
    }

    /// Directory holding the config and the default log file
    pub fn dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".txed"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::dir().map(|dir| dir.join("config.toml"))
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
