//! Error definitions.
//!
//! The steady-state simulation loop has no runtime errors: hazards, stalls and
//! mispredictions are ordinary state transitions, and end-of-trace is a normal
//! termination path. Errors only arise at the edges:
//! 1. **Configuration:** Unreadable or out of range; rejected before any cycle executes.
//! 2. **Trace Access:** The trace file cannot be opened.
//! 3. **Run Limits:** A run exceeds the configured cycle budget.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Pipeline width outside `1..=max`.
    #[error("pipeline width must be between 1 and {max}, got {width}")]
    InvalidWidth {
        /// Requested width.
        width: usize,
        /// Largest supported width.
        max: usize,
    },

    /// GShare history length outside `1..=max`.
    #[error("gshare history length must be between 1 and {max} bits, got {bits}")]
    InvalidHistoryBits {
        /// Requested history length.
        bits: usize,
        /// Largest supported history length.
        max: usize,
    },

    /// The configuration file could not be read.
    #[error("could not read config '{}': {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The JSON configuration document could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace file could not be opened.
    #[error("could not open trace '{}': {source}", path.display())]
    TraceOpen {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The run did not halt within the configured cycle limit.
    #[error("simulation did not halt within {0} cycles")]
    CycleLimit(u64),
}
