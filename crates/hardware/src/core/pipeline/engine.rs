//! Pipeline engine.
//!
//! The `Pipeline` owns every piece of mutable simulation state: the latches,
//! the branch unit, the op-id tracker, the halt marker and the branch-stall
//! flag. One call to [`Pipeline::tick`] advances exactly one cycle by running
//! the stages in reverse order (Writeback, Memory, Execute, Decode, Fetch),
//! so each stage reads its upstream latch before that latch is overwritten
//! in the same cycle. No shadow copy of the latches is needed.

use crate::common::constants::{HALT_OP_ID_UNSET, INVALID_OP_ID};
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::core::pipeline::hazards::Forwarding;
use crate::core::pipeline::latches::{LatchEntry, PipelineLatches, Stage};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::core::units::bru::BranchUnit;
use crate::stats::SimStats;
use crate::trace::TraceSource;

/// A superscalar in-order pipeline and all of its state.
#[derive(Clone, Debug)]
pub struct Pipeline {
    pub(crate) width: usize,
    pub(crate) forwarding: Forwarding,
    pub(crate) latches: PipelineLatches,
    pub(crate) bpred: Option<BranchUnit>,
    /// Last op-id handed out; the next fetched instruction gets one more.
    pub(crate) op_id_tracker: u64,
    /// Op-id whose retirement ends the run.
    pub(crate) halt_op_id: u64,
    /// Fetch is suppressed until the mispredicted branch retires.
    pub(crate) fetch_cbr_stall: bool,
    pub(crate) trace_exhausted: bool,
    pub(crate) halted: bool,
    pub(crate) trace_pipeline: bool,
    pub(crate) stats: SimStats,
}

impl Pipeline {
    /// Creates an empty pipeline from a validated configuration.
    ///
    /// Fails if the configuration is out of range; no cycle can run on an
    /// invalid width.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let pipe = &config.pipeline;
        Ok(Self {
            width: pipe.width,
            forwarding: Forwarding {
                exe: pipe.enable_exe_fwd,
                mem: pipe.enable_mem_fwd,
            },
            latches: PipelineLatches::new(pipe.width),
            bpred: BranchUnit::new(pipe),
            op_id_tracker: INVALID_OP_ID,
            halt_op_id: HALT_OP_ID_UNSET,
            fetch_cbr_stall: false,
            trace_exhausted: false,
            halted: false,
            trace_pipeline: config.general.trace_pipeline,
            stats: SimStats::default(),
        })
    }

    /// Runs one cycle of the entire pipeline.
    pub fn tick(&mut self, trace: &mut dyn TraceSource) {
        self.stats.cycles += 1;

        wb_stage(self);
        mem_stage(self);
        execute_stage(self);
        decode_stage(self);
        fetch_stage(self, trace);

        // Trace ended with nothing left in flight: either an empty trace, or
        // the last instruction retired before fetch could observe the end.
        if self.trace_exhausted && !self.halted && self.latches.is_drained() {
            tracing::debug!(cycle = self.stats.cycles, "pipeline drained after end of trace");
            self.halted = true;
        }

        if self.trace_pipeline {
            tracing::debug!("\n{}", self.dump_state());
        }
    }

    /// Returns true once the final instruction has retired.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Pipeline width in lanes.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Enabled bypass paths.
    pub fn forwarding(&self) -> Forwarding {
        self.forwarding
    }

    /// Lanes of one latch.
    pub fn latch(&self, stage: Stage) -> &[LatchEntry] {
        self.latches.stage(stage)
    }

    /// Last op-id assigned (0 before the first fetch).
    pub fn op_id_tracker(&self) -> u64 {
        self.op_id_tracker
    }

    /// Op-id whose retirement halts the run, once the trace has ended.
    pub fn halt_op_id(&self) -> Option<u64> {
        (self.halt_op_id != HALT_OP_ID_UNSET).then_some(self.halt_op_id)
    }

    /// Returns true while fetch waits for a mispredicted branch to retire.
    pub fn branch_stall_pending(&self) -> bool {
        self.fetch_cbr_stall
    }

    /// The branch unit, when a predictor is configured.
    pub fn branch_unit(&self) -> Option<&BranchUnit> {
        self.bpred.as_ref()
    }

    /// Snapshot of the statistics, including branch counters.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.stats.clone();
        if let Some(bu) = &self.bpred {
            stats.branches = bu.branches();
            stats.branch_mispredictions = bu.mispredictions();
        }
        stats
    }

    /// Renders the op-id grid: one row per lane, one column per latch.
    pub fn dump_state(&self) -> String {
        let mut out = String::new();
        out.push_str("--------------------------------------------\n");
        out.push_str(&format!(
            "cycle count : {} retired_instruction : {}\n",
            self.stats.cycles, self.stats.instructions_retired
        ));
        for stage in Stage::ALL {
            out.push_str(&format!(" {:>6} ", format!("{}:", stage.label())));
        }
        out.push('\n');
        for lane in 0..self.width {
            for stage in Stage::ALL {
                let entry = &self.latches.stage(stage)[lane];
                if entry.valid {
                    out.push_str(&format!(" {:>6} ", entry.op_id));
                } else {
                    out.push_str(" ------ ");
                }
            }
            out.push('\n');
        }
        out
    }
}
