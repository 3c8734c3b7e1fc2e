//! Pipeline configuration.

use std::path::Path;

use huffpress_core::{Error, Result};
use serde::Deserialize;
use tracing::Level;

use crate::decoder::DecodeMode;

/// Settings for one encode/decode run.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print the symbol/code listing after encoding
    #[serde(default = "default_print_codes")]
    pub print_codes: bool,

    /// How the encoded file's trailing bits are decoded
    #[serde(default)]
    pub decode_mode: DecodeMode,

    /// Compare the decoded output with the input before writing it
    #[serde(default = "default_verify")]
    pub verify: bool,

    /// Inputs at least this large are counted in parallel shards
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            print_codes: default_print_codes(),
            decode_mode: DecodeMode::default(),
            verify: default_verify(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl PipelineConfig {
    /// Load a JSON configuration file. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io_at(path, e))?;
        Self::from_json(&text)
    }

    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| Error::invalid_config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<()> {
        self.tracing_level()?;
        if self.parallel_threshold == 0 {
            return Err(Error::invalid_config("parallel_threshold must be non-zero"));
        }
        Ok(())
    }

    /// The configured log level as a `tracing` level.
    pub fn tracing_level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| Error::invalid_config(format!("unknown log level '{}'", self.log_level)))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_print_codes() -> bool {
    true
}

fn default_verify() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    1024 * 1024 // 1MB
}
