//! Pipeline Engine Tests.
//!
//! Verifies construction-time validation, halt detection (including the
//! drain rule for traces that end with nothing in flight), op-id
//! assignment, branch-stall bookkeeping and the state dump.

use pipesim_core::common::ConfigError;
use pipesim_core::config::{BranchPredictor, Config};
use pipesim_core::core::Pipeline;
use pipesim_core::core::pipeline::latches::{PipelineLatch, Stage};
use pipesim_core::trace::{InMemoryTrace, TraceRecord};
use proptest::prelude::*;
use rstest::rstest;

use crate::common::builder::{RecordBuilder, independent};
use crate::common::harness::TestContext;
use crate::common::strategies;

fn pipeline(width: usize, bp: BranchPredictor) -> Pipeline {
    let mut config = Config::default();
    config.pipeline.width = width;
    config.pipeline.branch_predictor = bp;
    Pipeline::new(&config).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0)]
#[case(9)]
fn invalid_width_is_rejected(#[case] width: usize) {
    let mut config = Config::default();
    config.pipeline.width = width;
    assert!(matches!(
        Pipeline::new(&config),
        Err(ConfigError::InvalidWidth { width: w, max: 8 }) if w == width
    ));
}

#[rstest]
#[case(0)]
#[case(25)]
fn invalid_history_length_is_rejected(#[case] bits: usize) {
    let mut config = Config::default();
    config.pipeline.history_bits = bits;
    assert!(matches!(
        Pipeline::new(&config),
        Err(ConfigError::InvalidHistoryBits { .. })
    ));
}

#[test]
fn new_pipeline_is_empty() {
    let p = pipeline(4, BranchPredictor::GShare);
    assert_eq!(p.width(), 4);
    assert_eq!(p.op_id_tracker(), 0);
    assert_eq!(p.halt_op_id(), None);
    assert!(!p.is_halted());
    assert!(!p.branch_stall_pending());
    assert!(p.branch_unit().is_some());
    for stage in Stage::ALL {
        assert!(p.latch(stage).is_idle());
    }
}

#[test]
fn no_predictor_builds_no_branch_unit() {
    assert!(pipeline(1, BranchPredictor::None).branch_unit().is_none());
}

// ══════════════════════════════════════════════════════════
// 2. Halt
// ══════════════════════════════════════════════════════════

#[test]
fn empty_trace_halts_after_one_cycle() {
    let stats = TestContext::new().width(4).run(&[]);
    assert_eq!(stats.cycles, 1);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.cpi(), 0.0);
}

#[test]
fn halt_marker_is_set_when_end_of_trace_is_seen() {
    let mut p = pipeline(1, BranchPredictor::None);
    let mut trace = InMemoryTrace::new(independent(2));

    p.tick(&mut trace);
    p.tick(&mut trace);
    assert_eq!(p.halt_op_id(), None);

    p.tick(&mut trace);
    assert_eq!(p.halt_op_id(), Some(2));
    assert!(!p.is_halted());
}

#[test]
fn last_instruction_retiring_before_end_of_trace_is_seen_still_halts() {
    // The branch blocks fetch until it retires, so the end of the trace is
    // only observed once nothing is left in flight.
    let trace = vec![RecordBuilder::branch(false).build()];
    let mut halted_at = None;
    let stats = TestContext::new()
        .bpred(BranchPredictor::AlwaysTaken)
        .run_observed(&trace, |p| {
            if p.is_halted() && halted_at.is_none() {
                halted_at = Some(p.stats().cycles);
            }
        });
    assert_eq!(halted_at, Some(5));
    assert_eq!(stats.instructions_retired, 1);
}

#[test]
fn ticking_after_halt_through_the_simulator_is_a_no_op() {
    let mut sim = TestContext::new().simulator(&independent(1));
    let stats = sim.run().unwrap();
    sim.tick();
    assert_eq!(sim.stats(), stats);
}

// ══════════════════════════════════════════════════════════
// 3. Branch bookkeeping
// ══════════════════════════════════════════════════════════

#[test]
fn mispredicted_branch_holds_fetch_until_it_retires() {
    let mut p = pipeline(1, BranchPredictor::AlwaysTaken);
    let mut records = vec![RecordBuilder::branch(false).build()];
    records.extend(independent(3));
    let mut trace = InMemoryTrace::new(records);

    p.tick(&mut trace);
    assert!(p.branch_stall_pending());
    assert!(p.latch(Stage::Fetch)[0].is_mispred_cbr);

    for _ in 0..3 {
        p.tick(&mut trace);
        assert!(p.branch_stall_pending());
        assert_eq!(p.op_id_tracker(), 1);
    }

    p.tick(&mut trace);
    assert!(!p.branch_stall_pending());
    assert_eq!(p.op_id_tracker(), 2);
    assert_eq!(trace.remaining(), 2);
}

#[test]
fn stats_snapshot_includes_branch_counters() {
    let mut p = pipeline(2, BranchPredictor::AlwaysTaken);
    let mut trace = InMemoryTrace::new(vec![
        RecordBuilder::branch(true).build(),
        RecordBuilder::branch(true).build(),
    ]);
    p.tick(&mut trace);
    let stats = p.stats();
    assert_eq!(stats.branches, 2);
    assert_eq!(stats.branch_mispredictions, 0);
}

// ══════════════════════════════════════════════════════════
// 4. State dump
// ══════════════════════════════════════════════════════════

#[test]
fn dump_shows_op_ids_per_lane_and_stage() {
    let mut p = pipeline(2, BranchPredictor::None);
    let mut trace = InMemoryTrace::new(independent(4));
    p.tick(&mut trace);
    p.tick(&mut trace);

    let dump = p.dump_state();
    let lines: Vec<&str> = dump.lines().collect();

    assert!(lines[1].contains("cycle count : 2"));
    assert!(lines[1].contains("retired_instruction : 0"));
    let header: Vec<&str> = lines[2].split_whitespace().collect();
    assert_eq!(header, ["FE:", "ID:", "EX:", "MEM:"]);
    let lane0: Vec<&str> = lines[3].split_whitespace().collect();
    let lane1: Vec<&str> = lines[4].split_whitespace().collect();
    assert_eq!(lane0, ["3", "1", "------", "------"]);
    assert_eq!(lane1, ["4", "2", "------", "------"]);
}

#[test]
fn pipeline_trace_logging_does_not_change_timing() {
    let trace: Vec<TraceRecord> = (0..12)
        .map(|i| RecordBuilder::alu().src1(i % 3).dest((i + 1) % 3).build())
        .collect();
    let quiet = TestContext::new().width(2).run(&trace);
    let traced = TestContext::new().width(2).trace_pipeline().run(&trace);
    assert_eq!(quiet, traced);
}

// ══════════════════════════════════════════════════════════
// 5. Properties
// ══════════════════════════════════════════════════════════

fn bpred() -> impl Strategy<Value = BranchPredictor> {
    prop_oneof![
        Just(BranchPredictor::None),
        Just(BranchPredictor::AlwaysTaken),
        Just(BranchPredictor::GShare),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_run_retires_the_whole_trace_in_order(
        trace in prop::collection::vec(strategies::record_with_branches(), 0..40),
        width in 1usize..=8,
        exe in any::<bool>(),
        mem in any::<bool>(),
        bp in bpred(),
    ) {
        let ctx = TestContext::new().width(width).forwarding(exe, mem).bpred(bp).history_bits(6);
        let mut last_tracker = 0;
        let mut violations = Vec::new();

        let stats = ctx.run_observed(&trace, |p| {
            if p.op_id_tracker() < last_tracker {
                violations.push(format!("op-id tracker went backwards at cycle {}", p.stats().cycles));
            }
            last_tracker = p.op_id_tracker();

            for stage in Stage::ALL {
                let ids: Vec<u64> = p.latch(stage).iter().filter(|e| e.valid).map(|e| e.op_id).collect();
                if ids.contains(&0) {
                    violations.push(format!("valid op-id 0 in {stage:?}"));
                }
                if ids.windows(2).any(|w| w[0] >= w[1]) {
                    violations.push(format!("{stage:?} lanes out of order: {ids:?}"));
                }
                if ids.iter().any(|&id| id > p.op_id_tracker()) {
                    violations.push(format!("{stage:?} holds an unassigned op-id"));
                }
            }

            if p.is_halted() {
                for stage in [Stage::Fetch, Stage::Decode, Stage::Execute] {
                    if !p.latch(stage).is_idle() {
                        violations.push(format!("halted with work in {stage:?}"));
                    }
                }
            }
        });

        prop_assert!(violations.is_empty(), "{:?}", violations);
        prop_assert_eq!(stats.instructions_retired, trace.len() as u64);
        prop_assert_eq!(last_tracker, trace.len() as u64);
        prop_assert!(stats.cycles >= (trace.len() as u64).div_ceil(width as u64) + 1);
    }

    #[test]
    fn identical_inputs_give_identical_statistics(
        trace in prop::collection::vec(strategies::record_with_branches(), 0..30),
        width in 1usize..=4,
    ) {
        let ctx = TestContext::new().width(width).mem_fwd().bpred(BranchPredictor::GShare);
        prop_assert_eq!(ctx.run(&trace), ctx.run(&trace));
    }

    #[test]
    fn forwarding_never_slows_a_scalar_pipeline_down(
        trace in prop::collection::vec(strategies::record(), 1..30),
    ) {
        let slow = TestContext::new().run(&trace);
        let fast = TestContext::new().exe_fwd().mem_fwd().run(&trace);
        prop_assert!(fast.cycles <= slow.cycles);
        prop_assert!(fast.stalls_data <= slow.stalls_data);
    }
}
