//! Pipeline stage implementations.
//!
//! Each function advances one stage by one cycle. The engine calls them in
//! reverse pipeline order:
//! 1. **Writeback:** Retires the Memory latch, detects halt, releases branch stalls.
//! 2. **Memory:** Copies Execute into Memory.
//! 3. **Execute:** Copies Decode into Execute.
//! 4. **Decode:** Copies Fetch into Decode.
//! 5. **Fetch:** Schedules the bundle, compacts stalls, fetches and predicts.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
