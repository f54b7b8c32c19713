//! Simulator: owns the pipeline and its trace side-by-side.
//!
//! Keeping the trace outside the pipeline lets the pipeline borrow it mutably
//! for exactly one fetch per tick, and lets tests drive the pipeline from an
//! in-memory trace without touching the filesystem.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Pipeline;
use crate::stats::SimStats;
use crate::trace::{TraceReader, TraceSource};

/// Top-level simulator: pipeline state plus the trace feeding it.
#[derive(Debug)]
pub struct Simulator<T: TraceSource> {
    /// Pipeline state (latches, branch unit, statistics).
    pub pipeline: Pipeline,
    trace: T,
    max_cycles: Option<u64>,
}

impl Simulator<TraceReader<BufReader<File>>> {
    /// Creates a simulator reading records from a binary trace file.
    pub fn from_trace_file(config: &Config, path: impl AsRef<Path>) -> Result<Self, SimError> {
        let trace = TraceReader::open(path)?;
        Self::new(config, trace)
    }
}

impl<T: TraceSource> Simulator<T> {
    /// Creates a new simulator with the given configuration and trace.
    pub fn new(config: &Config, trace: T) -> Result<Self, SimError> {
        let pipeline = Pipeline::new(config)?;
        tracing::info!(
            width = config.pipeline.width,
            exe_fwd = config.pipeline.enable_exe_fwd,
            mem_fwd = config.pipeline.enable_mem_fwd,
            predictor = ?config.pipeline.branch_predictor,
            "simulator configured"
        );
        Ok(Self {
            pipeline,
            trace,
            max_cycles: config.general.max_cycles,
        })
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// Has no effect once the pipeline has halted.
    pub fn tick(&mut self) {
        if !self.pipeline.is_halted() {
            self.pipeline.tick(&mut self.trace);
        }
    }

    /// Returns true once the final instruction has retired.
    pub fn is_halted(&self) -> bool {
        self.pipeline.is_halted()
    }

    /// Ticks until the pipeline halts and returns the final statistics.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if a cycle limit is configured and the
    /// pipeline has not halted when it is reached.
    pub fn run(&mut self) -> Result<SimStats, SimError> {
        while !self.pipeline.is_halted() {
            if let Some(limit) = self.max_cycles.filter(|&l| self.pipeline.stats.cycles >= l) {
                tracing::warn!(limit, "cycle limit reached before halt");
                return Err(SimError::CycleLimit(limit));
            }
            self.pipeline.tick(&mut self.trace);
        }

        let stats = self.stats();
        tracing::info!(
            cycles = stats.cycles,
            retired = stats.instructions_retired,
            cpi = stats.cpi(),
            "simulation halted"
        );
        Ok(stats)
    }

    /// Snapshot of the current statistics.
    pub fn stats(&self) -> SimStats {
        self.pipeline.stats()
    }

    /// The trace source, positioned after the last record fetched.
    pub fn trace(&self) -> &T {
        &self.trace
    }
}
