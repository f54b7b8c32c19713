//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline pipeline width, forwarding and predictor settings.
//! 2. **Structures:** Hierarchical config for general and pipeline options.
//! 3. **Enums:** Branch predictor policy selection.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built from
//! command-line flags on top of `Config::default()`. It is read-only once a
//! pipeline has been constructed from it.

use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{MAX_HISTORY_BITS, MAX_PIPE_WIDTH};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants::DEFAULT_HISTORY_BITS;

    /// Default pipeline width (1 instruction per cycle).
    pub const PIPELINE_WIDTH: usize = 1;

    /// Default GShare global history length (12 bits, 4096 PHT entries).
    pub const HISTORY_BITS: usize = DEFAULT_HISTORY_BITS;
}

/// Branch prediction policy.
///
/// `None` disables prediction entirely: conditional branches are fetched like
/// any other instruction and never stall fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// No branch predictor.
    #[default]
    None,
    /// Predict every conditional branch as taken.
    #[serde(alias = "Static")]
    AlwaysTaken,
    /// Global history XOR address indexed table of 2-bit counters.
    #[serde(alias = "Gshare")]
    GShare,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "general": { "trace_pipeline": true },
///     "pipeline": {
///         "width": 4,
///         "enable_exe_fwd": true,
///         "enable_mem_fwd": true,
///         "branch_predictor": "GShare"
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_pipeline);
/// assert_eq!(config.pipeline.width, 4);
/// assert_eq!(config.pipeline.branch_predictor, BranchPredictor::GShare);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline, forwarding and branch predictor configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing sections and fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks that every parameter is within its supported range.
    ///
    /// A pipeline is never constructed from a configuration that fails here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate()
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Emit the per-cycle pipeline occupancy dump at debug level.
    #[serde(default)]
    pub trace_pipeline: bool,

    /// Abort the run with an error if it has not halted after this many cycles.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Superscalar width (lanes per stage)
    #[serde(default = "PipelineConfig::default_width")]
    pub width: usize,

    /// Bypass from the Execute latch
    #[serde(default)]
    pub enable_exe_fwd: bool,

    /// Bypass from the Memory latch
    #[serde(default)]
    pub enable_mem_fwd: bool,

    /// Branch predictor policy
    #[serde(default)]
    pub branch_predictor: BranchPredictor,

    /// GShare global history length in bits
    #[serde(default = "PipelineConfig::default_history_bits")]
    pub history_bits: usize,
}

impl PipelineConfig {
    /// Returns the default pipeline width (instructions per cycle).
    fn default_width() -> usize {
        defaults::PIPELINE_WIDTH
    }

    /// Returns the default GShare history length.
    fn default_history_bits() -> usize {
        defaults::HISTORY_BITS
    }

    /// Validates width and history length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_PIPE_WIDTH {
            return Err(ConfigError::InvalidWidth {
                width: self.width,
                max: MAX_PIPE_WIDTH,
            });
        }
        if self.history_bits == 0 || self.history_bits > MAX_HISTORY_BITS {
            return Err(ConfigError::InvalidHistoryBits {
                bits: self.history_bits,
                max: MAX_HISTORY_BITS,
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    /// Creates a default pipeline configuration.
    ///
    /// Single-issue, no forwarding, no branch predictor.
    fn default() -> Self {
        Self {
            width: defaults::PIPELINE_WIDTH,
            enable_exe_fwd: false,
            enable_mem_fwd: false,
            branch_predictor: BranchPredictor::default(),
            history_bits: defaults::HISTORY_BITS,
        }
    }
}
