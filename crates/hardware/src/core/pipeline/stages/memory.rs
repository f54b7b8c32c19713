//! Memory (MEM) Stage.
//!
//! Memory timing is not modelled; the stage only moves the Execute latch forward.

use crate::core::pipeline::engine::Pipeline;

/// Executes the memory stage.
pub fn mem_stage(p: &mut Pipeline) {
    for lane in 0..p.width {
        if !p.latches.mem[lane].stall {
            p.latches.mem[lane] = p.latches.ex[lane];
        }
    }
}
