//! # Configuration Utilities
//!
//! Optional TOML configuration shared by the `encode` and `decode` binaries.
//! Every field has a default, so a missing file or a missing table is fine.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [output]
//! directory = "outputs"
//! report = "outputs/report.json"
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::Result;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T, P>(path: P) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Top-level configuration for both binaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

/// Log verbosity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Where results are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory prepended to relative output paths
    pub directory: Option<PathBuf>,
    /// Path of the JSON run report, if one should be written
    pub report: Option<PathBuf>,
}

impl OutputConfig {
    /// Resolve an output path against the configured directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        match &self.directory {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl StegoConfig {
    /// Load from `path` when given, defaults otherwise.
    pub fn from_optional_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => load_config(path),
            None => Ok(Self::default()),
        }
    }
}
