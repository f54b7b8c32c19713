//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the superscalar in-order pipeline.
//! It includes the following components:
//! 1. **Latches:** Per-lane inter-stage buffers (Fetch, Decode, Execute, Memory).
//! 2. **Hazards:** Detection of data hazards and resolution through forwarding.
//! 3. **Bundle:** Intra-bundle ordering, stall propagation and compaction at fetch.
//! 4. **Stages:** Fetch, Decode, Execute, Memory and Writeback.
//! 5. **Engine:** The pipeline state and its per-cycle driver.

/// Fetch bundle scheduling and compaction.
pub mod bundle;

/// Pipeline state and cycle driver.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches.
pub mod latches;

/// Pipeline stage implementations.
pub mod stages;

pub use engine::Pipeline;
