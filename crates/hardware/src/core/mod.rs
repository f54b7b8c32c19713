//! Processor core model.
//!
//! This module contains the instruction pipeline and the functional units it
//! consults. Only dependencies and timing are modelled; no instruction is
//! ever executed.

/// Instruction pipeline implementation (latches, hazards, bundle scheduling, stages).
pub mod pipeline;

/// Functional units (branch prediction).
pub mod units;

pub use self::pipeline::Pipeline;
