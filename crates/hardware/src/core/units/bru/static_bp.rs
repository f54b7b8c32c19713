//! Static Branch Predictor.
//!
//! Implements an "Always Taken" policy for conditional branches. It keeps no
//! direction state, so training is a no-op.

use super::BranchPredictor;

/// Always-taken predictor.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysTakenPredictor;

impl AlwaysTakenPredictor {
    /// Creates a new always-taken predictor.
    pub fn new() -> Self {
        Self
    }
}

impl BranchPredictor for AlwaysTakenPredictor {
    fn predict_branch(&self, _pc: u64) -> bool {
        true
    }

    fn update_branch(&mut self, _pc: u64, _taken: bool) {}
}
