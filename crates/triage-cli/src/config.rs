//! Configuration for the triage CLI.
//!
//! Values are resolved in layers, later layers winning:
//!
//! 1. Compiled defaults
//! 2. User config (`<config dir>/triage/config.toml`)
//! 3. Project config (`triage.toml` in the working directory, or `--config`)
//! 4. Environment variables (`TRIAGE_*`, `.env.local` honoured)
//! 5. CLI flags
//!
//! ```toml
//! [allocation]
//! parallel = true
//!
//! [report]
//! pretty = true
//! format = "table"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "triage.toml";

/// Allocate teams in parallel (`true`/`false`).
pub const PARALLEL_ENV: &str = "TRIAGE_PARALLEL";

/// Pretty-print JSON reports (`true`/`false`).
pub const PRETTY_ENV: &str = "TRIAGE_PRETTY";

/// Default output format (`table`, `json`, `brief`).
pub const FORMAT_ENV: &str = "TRIAGE_FORMAT";

/// Errors raised while resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "brief" => Some(OutputFormat::Brief),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllocationConfig {
    /// Allocate independent teams on the rayon pool.
    pub parallel: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Indent JSON output.
    pub pretty: bool,
    /// Format used when no `--format` flag is given.
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            format: OutputFormat::Table,
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TriageConfig {
    pub allocation: AllocationConfig,
    pub report: ReportConfig,
}

/// Overrides taken from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub sequential: bool,
    pub compact: bool,
    pub format: Option<OutputFormat>,
}

impl TriageConfig {
    /// Resolves configuration from files, the process environment and flags.
    ///
    /// An explicit `config_path` must exist; the implicit files are optional.
    pub fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = user_config_path().filter(|p| p.exists()) {
            config.merge_file(&path)?;
        }

        match config_path {
            Some(path) => config.merge_file(path)?,
            None => {
                let project = Path::new(PROJECT_CONFIG_FILE);
                if project.exists() {
                    config.merge_file(project)?;
                }
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        Ok(config)
    }

    /// Parses a config from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Overlays the keys set in `path` onto the current values.
    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn merge_toml(&mut self, text: &str) -> std::result::Result<(), toml::de::Error> {
        let layer: ConfigLayer = toml::from_str(text)?;
        if let Some(allocation) = layer.allocation {
            if let Some(parallel) = allocation.parallel {
                self.allocation.parallel = parallel;
            }
        }
        if let Some(report) = layer.report {
            if let Some(pretty) = report.pretty {
                self.report.pretty = pretty;
            }
            if let Some(format) = report.format {
                self.report.format = format;
            }
        }
        Ok(())
    }

    /// Applies `TRIAGE_*` variables returned by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PARALLEL_ENV) {
            self.allocation.parallel = parse_bool(PARALLEL_ENV, &value)?;
        }
        if let Some(value) = lookup(PRETTY_ENV) {
            self.report.pretty = parse_bool(PRETTY_ENV, &value)?;
        }
        if let Some(value) = lookup(FORMAT_ENV) {
            self.report.format =
                OutputFormat::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                    key: FORMAT_ENV.to_string(),
                    value,
                    expected: "table, json or brief",
                })?;
        }
        Ok(())
    }

    /// Applies command-line flags.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if overrides.sequential {
            self.allocation.parallel = false;
        }
        if overrides.compact {
            self.report.pretty = false;
        }
        if let Some(format) = overrides.format {
            self.report.format = format;
        }
    }
}

/// Partial config as written in a file; unset keys stay `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    allocation: Option<AllocationLayer>,
    report: Option<ReportLayer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AllocationLayer {
    parallel: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportLayer {
    pretty: Option<bool>,
    format: Option<OutputFormat>,
}

/// Location of the per-user config file, if a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("triage").join("config.toml"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            expected: "true or false",
        }),
    }
}
