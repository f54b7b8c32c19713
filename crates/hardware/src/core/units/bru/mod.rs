//! Branch prediction unit (BRU).
//!
//! This module contains the direction predictors (always-taken and gshare),
//! the 2-bit saturating counter they are built from, and `BranchUnit`, which
//! wraps the configured predictor together with its branch statistics.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Two-bit saturating counter.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always taken).
pub mod static_bp;

use self::{gshare::GSharePredictor, static_bp::AlwaysTakenPredictor};
use crate::config::{BranchPredictor as BpType, PipelineConfig};

/// Enum wrapper for static dispatch of branch predictors.
/// This avoids vtable lookups in the fetch loop.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Predicts taken unconditionally.
    AlwaysTaken(AlwaysTakenPredictor),
    /// Two-level adaptive predictor.
    GShare(GSharePredictor),
}

impl BranchPredictorWrapper {
    /// Builds the configured predictor, or `None` when prediction is disabled.
    pub fn new(config: &PipelineConfig) -> Option<Self> {
        match config.branch_predictor {
            BpType::None => None,
            BpType::AlwaysTaken => Some(Self::AlwaysTaken(AlwaysTakenPredictor::new())),
            BpType::GShare => Some(Self::GShare(GSharePredictor::new(config.history_bits))),
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict_branch(&self, pc: u64) -> bool {
        match self {
            Self::AlwaysTaken(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
        }
    }

    #[inline(always)]
    fn update_branch(&mut self, pc: u64, taken: bool) {
        match self {
            Self::AlwaysTaken(bp) => bp.update_branch(pc, taken),
            Self::GShare(bp) => bp.update_branch(pc, taken),
        }
    }
}

/// A predictor plus its branch and misprediction counters.
#[derive(Clone, Debug)]
pub struct BranchUnit {
    predictor: BranchPredictorWrapper,
    num_branches: u64,
    num_mispred: u64,
}

impl BranchUnit {
    /// Builds the configured unit, or `None` when prediction is disabled.
    pub fn new(config: &PipelineConfig) -> Option<Self> {
        BranchPredictorWrapper::new(config).map(Self::with_predictor)
    }

    /// Wraps an already constructed predictor.
    pub fn with_predictor(predictor: BranchPredictorWrapper) -> Self {
        Self {
            predictor,
            num_branches: 0,
            num_mispred: 0,
        }
    }

    /// Predicts the branch at `pc` and counts it as a seen branch.
    pub fn predict(&mut self, pc: u64) -> bool {
        self.num_branches += 1;
        self.predictor.predict_branch(pc)
    }

    /// Trains the predictor with the resolved direction.
    pub fn update(&mut self, pc: u64, taken: bool) {
        self.predictor.update_branch(pc, taken);
    }

    /// Counts one misprediction.
    pub fn record_mispredict(&mut self) {
        self.num_mispred += 1;
    }

    /// Branches predicted so far.
    pub fn branches(&self) -> u64 {
        self.num_branches
    }

    /// Mispredictions so far.
    pub fn mispredictions(&self) -> u64 {
        self.num_mispred
    }

    /// The underlying predictor.
    pub fn predictor(&self) -> &BranchPredictorWrapper {
        &self.predictor
    }
}
