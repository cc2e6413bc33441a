//! Station configuration.
//!
//! Settings live in an optional `config.toml` in the working directory:
//!
//! ```toml
//! [printers]
//! medium = "158.39.88.208"
//! large = "158.39.89.81"
//!
//! [logging]
//! level = "warn"
//! json = false
//! dir = "./logs"
//! ```
//!
//! # Environment variables
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | LABEL_PRINTER_MEDIUM | `printers.medium` |
//! | LABEL_PRINTER_LARGE | `printers.large` |

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use zpl_printer::LabelSize;

/// Default file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const DEFAULT_MEDIUM_HOST: &str = "158.39.88.208";
const DEFAULT_LARGE_HOST: &str = "158.39.89.81";

/// Configuration for the label station.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Default printer per label size.
    pub printers: PrinterDefaults,

    /// Log output settings.
    pub logging: LoggingSettings,
}

/// Default printer address for each label size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterDefaults {
    pub medium: String,
    pub large: String,
}

impl Default for PrinterDefaults {
    fn default() -> Self {
        Self {
            medium: DEFAULT_MEDIUM_HOST.to_string(),
            large: DEFAULT_LARGE_HOST.to_string(),
        }
    }
}

impl PrinterDefaults {
    /// Printer address for `size`
    pub fn host_for(&self, size: LabelSize) -> &str {
        match size {
            LabelSize::Medium => &self.medium,
            LabelSize::Large => &self.large,
        }
    }

    /// Replace blank entries with the built-in defaults
    fn fill_blanks(&mut self) {
        let defaults = Self::default();
        if self.medium.trim().is_empty() {
            self.medium = defaults.medium;
        }
        if self.large.trim().is_empty() {
            self.large = defaults.large;
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level used when no `-v` flag and no `RUST_LOG` is given.
    pub level: String,

    /// JSON log lines instead of plain text.
    pub json: bool,

    /// Directory for daily rotated log files.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            dir: None,
        }
    }
}

impl StationConfig {
    /// Loads `config.toml` from the working directory, or defaults if absent.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load_from(path)
        } else {
            Ok(Self::default().with_env())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config.with_env())
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.printers.fill_blanks();
        Ok(config)
    }

    /// Applies `LABEL_PRINTER_*` environment overrides.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("LABEL_PRINTER_MEDIUM").filter(|h| !h.trim().is_empty()) {
            self.printers.medium = host;
        }
        if let Some(host) = lookup("LABEL_PRINTER_LARGE").filter(|h| !h.trim().is_empty()) {
            self.printers.large = host;
        }
        self
    }
}
