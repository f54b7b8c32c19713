//! Simulation driver.
//!
//! Couples a [`Pipeline`](crate::core::Pipeline) with the trace it consumes and
//! runs it to completion.

pub mod simulator;

pub use simulator::Simulator;
