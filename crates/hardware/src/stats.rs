//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline simulator. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived CPI/IPC.
//! 2. **Branch prediction:** Branches seen, mispredictions, and misprediction rate.
//! 3. **Stalls:** Fetch lanes held by data hazards and suppressed by branch recovery.
//! 4. **Forwarding:** Hazards cancelled by each bypass path.
//!
//! Every counter is a pure function of the trace and the configuration, so
//! two runs with the same inputs produce identical statistics.

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Number of instructions retired from Writeback.
    pub instructions_retired: u64,

    /// Conditional branches seen by the predictor.
    pub branches: u64,
    /// Conditional branches whose prediction was wrong.
    pub branch_mispredictions: u64,

    /// Fetch lane-cycles holding a valid instruction back because of a data hazard.
    pub stalls_data: u64,
    /// Fetch slots left empty while a mispredicted branch was in flight.
    pub stalls_control: u64,

    /// Hazards resolved by the Execute bypass.
    pub forwards_ex: u64,
    /// Hazards resolved by the Memory bypass.
    pub forwards_mem: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"branch"`, `"hazards"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "branch", "hazards"];

impl SimStats {
    /// Cycles per retired instruction (0 if nothing retired).
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Retired instructions per cycle (0 before the first cycle).
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Percentage of branches mispredicted (0 if no branches).
    pub fn mispredict_rate(&self) -> f64 {
        if self.branches == 0 {
            0.0
        } else {
            100.0 * self.branch_mispredictions as f64 / self.branches as f64
        }
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. An
    /// empty slice renders everything.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();

        out.push_str("==========================================================\n");
        out.push_str("PIPELINE SIMULATION STATISTICS\n");
        out.push_str("==========================================================\n");
        if want("summary") {
            out.push_str(&format!("sim_cycles               {}\n", self.cycles));
            out.push_str(&format!("sim_insts                {}\n", self.instructions_retired));
            out.push_str(&format!("sim_cpi                  {:.4}\n", self.cpi()));
            out.push_str(&format!("sim_ipc                  {:.4}\n", self.ipc()));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("branch") {
            out.push_str("BRANCH PREDICTION\n");
            out.push_str(&format!("  bp.branches            {}\n", self.branches));
            out.push_str(&format!("  bp.mispredicts         {}\n", self.branch_mispredictions));
            out.push_str(&format!("  bp.mispredict_rate     {:.2}%\n", self.mispredict_rate()));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("hazards") {
            out.push_str("HAZARDS\n");
            out.push_str(&format!("  stalls.data            {}\n", self.stalls_data));
            out.push_str(&format!("  stalls.control         {}\n", self.stalls_control));
            out.push_str(&format!("  forward.execute        {}\n", self.forwards_ex));
            out.push_str(&format!("  forward.memory         {}\n", self.forwards_mem));
        }
        out.push_str("==========================================================\n");
        out
    }

    /// Prints the requested statistics sections to stdout (all of them for
    /// an empty slice).
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }
}
