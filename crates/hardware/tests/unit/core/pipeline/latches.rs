//! Pipeline Latch Tests.

use pipesim_core::core::pipeline::latches::{LatchEntry, PipelineLatch, PipelineLatches, Stage};
use pipesim_core::trace::TraceRecord;

use crate::common::builder::entry;

#[test]
fn bubble_is_invalid_with_op_id_zero() {
    let b = LatchEntry::bubble();
    assert!(!b.valid);
    assert!(!b.stall);
    assert_eq!(b.op_id, 0);
    assert!(!b.is_mispred_cbr);
}

#[test]
fn bubbles_sort_after_every_instruction() {
    let mut lanes = vec![
        LatchEntry::bubble(),
        entry(u64::MAX - 10, TraceRecord::default()),
        entry(3, TraceRecord::default()),
    ];
    lanes.sort_by_key(LatchEntry::age_key);
    assert_eq!(lanes[0].op_id, 3);
    assert_eq!(lanes[1].op_id, u64::MAX - 10);
    assert!(!lanes[2].valid);
}

#[test]
fn new_latches_are_drained() {
    let latches = PipelineLatches::new(4);
    assert!(latches.is_drained());
    for stage in Stage::ALL {
        assert_eq!(latches.stage(stage).len(), 4);
        assert!(latches.stage(stage).is_idle());
    }
}

#[test]
fn one_valid_lane_anywhere_keeps_latches_busy() {
    let mut latches = PipelineLatches::new(2);
    latches.mem[1] = entry(1, TraceRecord::default());
    assert!(!latches.is_drained());
    assert!(!latches.stage(Stage::Memory).is_idle());
    assert!(latches.stage(Stage::Fetch).is_idle());
}

#[test]
fn stage_labels_match_dump_columns() {
    let labels: Vec<_> = Stage::ALL.iter().map(|s| s.label()).collect();
    assert_eq!(labels, ["FE", "ID", "EX", "MEM"]);
}
