//! Common types and constants used throughout the simulator.
//!
//! 1. **Constants:** Pipeline geometry, register space, op-id sentinels, trace layout.
//! 2. **Error Handling:** Configuration and simulation error types.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{ConfigError, SimError};
