use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::subtitle::LineEnding;
use crate::validation::TimecodeValidatorConfig;

/// Application configuration module
/// This module handles loading and validating the JSON configuration.
/// The file is only ever read; missing files fall back to defaults.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code of the track rendered first (ISO)
    #[serde(default = "default_upper_language")]
    pub upper_language: String,

    /// Language code of the track rendered second (ISO)
    #[serde(default = "default_lower_language")]
    pub lower_language: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Folder batch settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Timecode diagnostics run before each merge
    #[serde(default)]
    pub validation: TimecodeValidatorConfig,
}

/// How merged files are written
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Line terminator for written files
    #[serde(default)]
    pub line_ending: LineEnding,

    /// Replace existing output files without `--force`
    #[serde(default)]
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Lf,
            overwrite: false,
        }
    }
}

/// Folder batch processing settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchConfig {
    /// Maximum number of file pairs merged at the same time
    #[serde(default = "default_concurrent_jobs")]
    pub concurrent_jobs: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrent_jobs: default_concurrent_jobs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_upper_language() -> String {
    "en".to_string()
}

fn default_lower_language() -> String {
    "fr".to_string()
}

fn default_concurrent_jobs() -> usize {
    4
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration if the file exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found at '{}', using defaults.", path.display());
            Ok(Self::default())
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _upper_name = crate::language_utils::get_language_name(&self.upper_language)?;
        let _lower_name = crate::language_utils::get_language_name(&self.lower_language)?;

        // Pairing files by language needs two distinct languages
        if crate::language_utils::language_codes_match(&self.upper_language, &self.lower_language) {
            return Err(anyhow!(
                "Upper and lower languages must differ (both are '{}')",
                self.upper_language
            ));
        }

        if self.batch.concurrent_jobs == 0 {
            return Err(anyhow!("batch.concurrent_jobs must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            upper_language: default_upper_language(),
            lower_language: default_lower_language(),
            log_level: LogLevel::default(),
            output: OutputConfig::default(),
            batch: BatchConfig::default(),
            validation: TimecodeValidatorConfig::default(),
        }
    }
}
