//! Analyzer configuration.
//!
//! Loaded from `redscope.toml` in the working directory, or from the file
//! named by `--config`. User values are merged over the stock defaults, so a
//! config file only needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [analysis]
//! parallel = true           # Run the four detectors concurrently
//! sample_grid = 50          # Resample grid side for the Dominant Color method
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//!
//! [fetch]
//! timeout_secs = 15         # Per-attempt timeout for URL sources
//! proxies = [               # Tried in order after the direct request
//!     "https://corsproxy.io/?{url}",
//!     "https://api.allorigins.win/raw?url={url}",
//! ]
//!
//! [output]
//! format = "text"           # "text" or "json"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::fetch::URL_PLACEHOLDER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "redscope.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Detector scheduling and tuning.
    pub analysis: AnalysisConfig,
    /// How URL sources are downloaded.
    pub fetch: FetchConfig,
    /// Report rendering.
    pub output: OutputConfig,
}

impl AnalyzerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SAMPLE_GRID).contains(&self.analysis.sample_grid) {
            return Err(ConfigError::Validation(format!(
                "analysis.sample_grid must be 1-{MAX_SAMPLE_GRID}"
            )));
        }
        if self.analysis.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "analysis.max_processes must be at least 1".into(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be non-zero".into(),
            ));
        }
        if let Some(bad) = self
            .fetch
            .proxies
            .iter()
            .find(|p| !p.contains(URL_PLACEHOLDER))
        {
            return Err(ConfigError::Validation(format!(
                "fetch.proxies entry '{bad}' has no {URL_PLACEHOLDER} placeholder"
            )));
        }
        Ok(())
    }
}

const MAX_SAMPLE_GRID: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Run the detectors concurrently. Results are identical either way.
    pub parallel: bool,
    /// Side of the square grid the Dominant Color method resamples onto.
    pub sample_grid: u32,
    /// Maximum number of worker threads.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            sample_grid: crate::detect::dominant::SAMPLE_GRID,
            max_processes: None,
        }
    }
}

/// Resolve the effective thread count.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &AnalysisConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Per-attempt timeout in seconds.
    pub timeout_secs: u64,
    /// Proxy URL templates tried after the direct request, in order.
    /// Each must contain `{url}`.
    pub proxies: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            proxies: vec![
                "https://corsproxy.io/?{url}".to_string(),
                "https://api.allorigins.win/raw?url={url}".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented human-readable report.
    #[default]
    Text,
    /// Machine-readable JSON, including histogram bins.
    Json,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AnalyzerConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut merged), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                let value = match merged.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                merged.insert(key, value);
            }
            toml::Value::Table(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<AnalyzerConfig, ConfigError> {
    let merged = match overlay {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: AnalyzerConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the analyzer config.
///
/// An explicit path must exist. Without one, [`CONFIG_FILE`] in `dir` is
/// used when present and the stock defaults otherwise.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<AnalyzerConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(toml::from_str(&fs::read_to_string(path)?)?),
        None => load_raw_config(&dir.join(CONFIG_FILE))?,
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `redscope.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# redscope configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# redscope reads ./redscope.toml, or the file passed with --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Analysis
# ---------------------------------------------------------------------------
[analysis]
# Run the four detection methods concurrently. Results are identical
# either way; turn off to keep analysis on a single thread.
parallel = true

# Side of the square grid the Dominant Color method resamples the image
# onto before averaging (1-1024). Larger is slower and closer to the
# full-resolution mean.
sample_grid = 50

# Maximum parallel workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Fetching URL sources
# ---------------------------------------------------------------------------
[fetch]
# Per-attempt timeout in seconds.
timeout_secs = 15

# Proxies tried in order when the direct request fails. {url} is replaced
# by the percent-encoded image URL. Use an empty list to disable.
proxies = [
    "https://corsproxy.io/?{url}",
    "https://api.allorigins.win/raw?url={url}",
]

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# "text" for a readable report, "json" for machine-readable results.
format = "text"
"##
}
