//! Functional units.
//!
//! This module contains the units the pipeline consults while fetching. The
//! trace already fixes every outcome, so the only unit with behaviour of its
//! own is the branch predictor.

/// Branch Resolution Unit: direction predictors and their statistics.
pub mod bru;
