//! Execute (EX) Stage.
//!
//! No values are computed; the stage only moves the Decode latch forward.

use crate::core::pipeline::engine::Pipeline;

/// Executes the execute stage.
pub fn execute_stage(p: &mut Pipeline) {
    for lane in 0..p.width {
        if !p.latches.ex[lane].stall {
            p.latches.ex[lane] = p.latches.id[lane];
        }
    }
}
