//! CLI configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::Context;
use distvec_core::EngineConfig;
use serde::{Deserialize, Serialize};

/// Full configuration for a distvec run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DistvecConfig {
    /// Distance-vector engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Where and how simulation results are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Format of the simulation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Forwarding tables and message lines, one epoch after another.
    Text,
    /// All epochs as a single JSON document.
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report file; `-` writes to stdout.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default = "default_output_format")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_output_path() -> PathBuf {
    PathBuf::from("output.txt")
}
fn default_output_format() -> OutputFormat {
    OutputFormat::Text
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: default_output_format(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl DistvecConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config {}", path.display()))?;
            let config: DistvecConfig = toml::from_str(&contents)
                .with_context(|| format!("invalid config {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Whether the report goes to stdout rather than a file.
    pub fn writes_to_stdout(&self) -> bool {
        self.output.path.as_os_str() == "-"
    }
}
