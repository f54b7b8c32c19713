//! Superscalar in-order pipeline simulator library.
//!
//! This crate implements a trace-driven, cycle-accurate model of a five-stage
//! in-order pipeline with the following:
//! 1. **Trace:** Binary instruction records and the sources that supply them.
//! 2. **Core:** Per-lane latches, hazard detection, forwarding and bundle scheduling.
//! 3. **Branch Prediction:** Always-taken and GShare predictors with fetch-side recovery.
//! 4. **Simulation:** Configuration, the run loop and statistics collection.

/// Common constants and error types.
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Pipeline core (latches, stages, hazards, branch unit).
pub mod core;
/// Run loop driving a pipeline from a trace.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Instruction trace records, readers and writers.
pub mod trace;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Pipeline state; advance it one cycle at a time with `Pipeline::tick`.
pub use crate::core::Pipeline;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::from_trace_file`.
pub use crate::sim::Simulator;
