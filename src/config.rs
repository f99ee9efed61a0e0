//! Ingestion configuration
//!
//! Per INGEST.md §4, every limit that shapes ingestion behavior lives
//! here: the selection size cap, the preview row cap, and the simulated
//! transfer pacing. All fields have defaults so an empty JSON object is
//! a valid config file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Ingestion configuration per INGEST.md §4
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Largest accepted file in bytes (default: 50 MiB)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,

    /// Data rows kept in a preview (default: 5)
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Simulated transfer progress increment in percent (default: 10)
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,

    /// Pause between progress increments in milliseconds (default: 100)
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Pause after reaching 100% before completion (default: 1000)
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Directory of dataset schema JSON files (default: builtin only)
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
}

fn default_max_file_size() -> u64 {
    50 * 1024 * 1024
}
fn default_preview_rows() -> usize {
    5
}
fn default_progress_step() -> u8 {
    10
}
fn default_step_delay_ms() -> u64 {
    100
}
fn default_settle_delay_ms() -> u64 {
    1000
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            preview_rows: default_preview_rows(),
            progress_step: default_progress_step(),
            step_delay_ms: default_step_delay_ms(),
            settle_delay_ms: default_settle_delay_ms(),
            schema_dir: None,
        }
    }
}

impl IngestConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        let config: IngestConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;

        let max_size = config.max_file_size_bytes.to_string();
        let rows = config.preview_rows.to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[
                ("max_file_size_bytes", max_size.as_str()),
                ("preview_rows", rows.as_str()),
            ],
        );

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_file_size_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_file_size_bytes must be > 0".to_string(),
            ));
        }

        if self.preview_rows == 0 {
            return Err(ConfigError::Invalid("preview_rows must be > 0".to_string()));
        }

        // A zero step would never reach 100%; over 100 overshoots in one hop.
        if self.progress_step == 0 || self.progress_step > 100 {
            return Err(ConfigError::Invalid(format!(
                "progress_step must be between 1 and 100, got {}",
                self.progress_step
            )));
        }

        Ok(())
    }

    /// Pause between progress increments
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Pause after the bar reaches 100%
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
