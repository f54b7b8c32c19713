//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements. Prediction is a pure lookup; all learning happens
//! in `update_branch`, which always receives the resolved direction.

/// Trait for branch direction prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    fn predict_branch(&self, pc: u64) -> bool;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    ///
    /// Called for every predicted branch, whether or not the prediction was
    /// correct.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    fn update_branch(&mut self, pc: u64, taken: bool);
}
