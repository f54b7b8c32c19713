//! Simulator Driver Tests.
//!
//! Verifies the run loop on file-backed and in-memory traces, the cycle
//! limit and error propagation from configuration and trace access.

use pipesim_core::common::{ConfigError, SimError};
use pipesim_core::config::{BranchPredictor, Config};
use pipesim_core::trace::{InMemoryTrace, write_trace};
use pipesim_core::Simulator;
use tempfile::NamedTempFile;

use crate::common::builder::{RecordBuilder, branches, independent};
use crate::common::harness::TestContext;

#[test]
fn file_and_memory_traces_give_the_same_result() {
    let mut records = independent(6);
    records.push(RecordBuilder::alu().src1(0).dest(3).build());
    records.extend(branches(3, 0x40, false));

    let ctx = TestContext::new().width(2).bpred(BranchPredictor::GShare);

    let mut file = NamedTempFile::new().unwrap();
    write_trace(&mut file, &records).unwrap();
    let mut from_file = Simulator::from_trace_file(&ctx.config, file.path()).unwrap();

    assert_eq!(from_file.run().unwrap(), ctx.run(&records));
    assert!(from_file.trace().is_exhausted());
}

#[test]
fn cycle_limit_stops_a_run_that_has_not_halted() {
    let mut config = Config::default();
    config.general.max_cycles = Some(10);
    let mut sim = Simulator::new(&config, InMemoryTrace::new(independent(100))).unwrap();

    let err = sim.run().unwrap_err();
    assert!(matches!(err, SimError::CycleLimit(10)));
    assert_eq!(sim.stats().cycles, 10);
    assert!(!sim.is_halted());
}

#[test]
fn cycle_limit_equal_to_run_length_is_not_an_error() {
    let mut config = Config::default();
    config.general.max_cycles = Some(5);
    let mut sim = Simulator::new(&config, InMemoryTrace::new(independent(1))).unwrap();
    assert_eq!(sim.run().unwrap().cycles, 5);
}

#[test]
fn invalid_configuration_is_reported_before_running() {
    let mut config = Config::default();
    config.pipeline.width = 0;
    let err = Simulator::new(&config, InMemoryTrace::default()).unwrap_err();
    assert!(matches!(err, SimError::Config(ConfigError::InvalidWidth { .. })));
}

#[test]
fn missing_trace_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = Simulator::from_trace_file(&Config::default(), dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, SimError::TraceOpen { .. }));
}

#[test]
fn manual_ticks_match_run() {
    let records = independent(7);
    let ctx = TestContext::new().width(3);

    let mut sim = ctx.simulator(&records);
    while !sim.is_halted() {
        sim.tick();
    }
    assert_eq!(sim.stats(), ctx.run(&records));
}
