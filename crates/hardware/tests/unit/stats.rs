//! Statistics Tests.
//!
//! Verifies the derived ratios, the JSON form and the text report sections.

use pipesim_core::config::BranchPredictor;
use pipesim_core::stats::{STATS_SECTIONS, SimStats};
use pretty_assertions::assert_eq;

use crate::common::builder::branches;
use crate::common::harness::TestContext;

fn sample() -> SimStats {
    SimStats {
        cycles: 300,
        instructions_retired: 200,
        branches: 40,
        branch_mispredictions: 10,
        stalls_data: 12,
        stalls_control: 30,
        forwards_ex: 7,
        forwards_mem: 3,
    }
}

#[test]
fn cpi_and_ipc() {
    let s = sample();
    assert!((s.cpi() - 1.5).abs() < 1e-12);
    assert!((s.ipc() - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn mispredict_rate_is_a_percentage() {
    assert!((sample().mispredict_rate() - 25.0).abs() < 1e-12);
}

#[test]
fn ratios_are_zero_when_undefined() {
    let s = SimStats::default();
    assert_eq!(s.cpi(), 0.0);
    assert_eq!(s.ipc(), 0.0);
    assert_eq!(s.mispredict_rate(), 0.0);
}

#[test]
fn json_uses_field_names() {
    let value = serde_json::to_value(sample()).unwrap();
    assert_eq!(value["cycles"], 300);
    assert_eq!(value["instructions_retired"], 200);
    assert_eq!(value["branch_mispredictions"], 10);
    assert_eq!(value["stalls_control"], 30);
    assert_eq!(value["forwards_mem"], 3);
}

#[test]
fn full_report_contains_every_section() {
    let report = sample().render_sections(&[]);
    assert!(report.contains("sim_cycles               300"));
    assert!(report.contains("sim_cpi                  1.5000"));
    assert!(report.contains("BRANCH PREDICTION"));
    assert!(report.contains("bp.mispredict_rate     25.00%"));
    assert!(report.contains("HAZARDS"));
    assert!(report.contains("forward.execute        7"));
}

#[test]
fn report_can_be_limited_to_one_section() {
    let report = sample().render_sections(&["branch".to_string()]);
    assert!(report.contains("BRANCH PREDICTION"));
    assert!(!report.contains("sim_cycles"));
    assert!(!report.contains("HAZARDS"));
}

#[test]
fn every_section_name_is_recognised() {
    let empty = SimStats::default().render_sections(&["none".to_string()]);
    for name in STATS_SECTIONS {
        let report = SimStats::default().render_sections(&[(*name).to_string()]);
        assert!(report.len() > empty.len(), "section {name} rendered nothing");
    }
}

#[test]
fn run_statistics_feed_the_report() {
    let stats = TestContext::new()
        .bpred(BranchPredictor::AlwaysTaken)
        .run(&branches(4, 0x80, false));
    assert_eq!(stats.mispredict_rate(), 100.0);
    assert!(stats.render_sections(&[]).contains("bp.mispredicts         4"));
}
