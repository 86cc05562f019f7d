//! Sampler configuration
//!
//! Values come from defaults, an optional TOML file, and finally CLI
//! overrides applied by the caller. Nothing here is process-global: the
//! resolved [`SamplerConfig`] is passed into the sampler explicitly.
//!
//! ```toml
//! window_ms = 500
//! execution_units = 2
//! capacity_margin = 8
//! margin_step = 8
//! max_capacity_retries = 2
//! index_threshold = 4096
//! ```

use crate::diff::CorrelationStrategy;
use crate::errors::{ExError, ExErrorKind, Result, SamplerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplerConfig {
    /// Length of the sampling window in milliseconds
    pub window_ms: u64,
    /// Overrides the scheduler's reported execution unit count
    pub execution_units: Option<u32>,
    /// Extra buffer slots on top of the live task count
    pub capacity_margin: usize,
    /// Slots added to the margin on each capacity retry
    pub margin_step: usize,
    pub max_capacity_retries: u32,
    /// `before * after` size above which correlation indexes by handle
    pub index_threshold: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            window_ms: 1000,
            execution_units: None,
            capacity_margin: 10,
            margin_step: 10,
            max_capacity_retries: 3,
            index_threshold: 4096,
        }
    }
}

impl SamplerConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` — malformed TOML, unknown keys, or out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SamplerConfig = toml::from_str(text).map_err(|e| {
            ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(e.to_string())
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file from disk
    ///
    /// # Errors
    ///
    /// - `Io` — the file cannot be read
    /// - `InvalidConfig` — see [`SamplerConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_message(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// - `InvalidConfig` — `window_ms` or `execution_units` is zero
    pub fn validate(&self) -> Result<()> {
        if self.window_ms == 0 {
            return Err(SamplerError::InvalidConfig {
                reason: "window_ms must be greater than 0".to_string(),
            }
            .into());
        }
        if self.execution_units == Some(0) {
            return Err(SamplerError::InvalidConfig {
                reason: "execution_units must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn correlation_strategy(&self) -> CorrelationStrategy {
        CorrelationStrategy::Auto {
            index_threshold: self.index_threshold,
        }
    }
}
