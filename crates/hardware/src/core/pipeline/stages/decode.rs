//! Instruction Decode (ID) Stage.
//!
//! Copies the Fetch latch into Decode. Stalls are decided at fetch, so the
//! copy always clears the stall flag; whether the copied instruction is
//! actually valid in Decode is settled later this cycle by the fetch stage.

use crate::core::pipeline::engine::Pipeline;

/// Executes the decode stage.
pub fn decode_stage(p: &mut Pipeline) {
    for lane in 0..p.width {
        if !p.latches.id[lane].stall {
            p.latches.id[lane] = p.latches.fe[lane];
            p.latches.id[lane].stall = false;
        }
    }
}
