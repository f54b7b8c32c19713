//! Writeback (WB) Stage.
//!
//! Retires every valid lane of the Memory latch. Retirement of the halt
//! op-id ends the run, and retirement of a mispredicted branch is the only
//! event that releases a pending fetch stall.

use crate::core::pipeline::engine::Pipeline;

/// Executes the writeback stage.
pub fn wb_stage(p: &mut Pipeline) {
    for lane in 0..p.width {
        let entry = p.latches.mem[lane];
        if entry.stall || !entry.valid {
            continue;
        }

        p.stats.instructions_retired += 1;

        if entry.op_id >= p.halt_op_id {
            tracing::debug!(op_id = entry.op_id, cycle = p.stats.cycles, "halt instruction retired");
            p.halted = true;
        }

        if entry.is_mispred_cbr {
            tracing::debug!(op_id = entry.op_id, "mispredicted branch retired, fetch resumes");
            p.fetch_cbr_stall = false;
        }
    }
}
