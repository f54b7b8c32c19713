//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Pipeline Geometry:** Stage count and lane limits.
//! 2. **Register Space:** Size of the architectural register identifier space.
//! 3. **Op-id Sentinels:** Reserved values for the op-id tracker and halt marker.
//! 4. **Trace Layout:** Size of one binary trace record.

/// Number of pipeline latches (Fetch, Decode, Execute, Memory).
///
/// Writeback consumes the Memory latch and owns no latch of its own.
pub const NUM_LATCHES: usize = 4;

/// Maximum supported pipeline width (lanes per stage).
pub const MAX_PIPE_WIDTH: usize = 8;

/// Number of distinct register identifiers a trace record can name.
///
/// Register ids are a single byte in the trace format.
pub const NUM_REGS: usize = 256;

/// Op-id reserved for "no instruction".
pub const INVALID_OP_ID: u64 = 0;

/// Initial halt op-id, used until the trace reports end-of-stream.
///
/// Effectively infinite; kept a few below `u64::MAX` so that `>=` comparisons
/// against any real op-id stay false.
pub const HALT_OP_ID_UNSET: u64 = u64::MAX - 3;

/// Default GShare global history length in bits.
pub const DEFAULT_HISTORY_BITS: usize = 12;

/// Largest accepted GShare global history length in bits.
pub const MAX_HISTORY_BITS: usize = 24;

/// Size of one encoded trace record in bytes.
pub const TRACE_RECORD_SIZE: usize = 24;
