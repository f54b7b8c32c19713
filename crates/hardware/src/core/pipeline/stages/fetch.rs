//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. Each cycle it:
//! 1. Decides which instructions already in the Fetch latch may enter Decode.
//! 2. Compacts the ones that must wait into the lowest lanes.
//! 3. Refills every free lane from the trace, unless a mispredicted branch
//!    is still in flight.
//! 4. Predicts and immediately trains on each newly fetched conditional branch.

use crate::core::pipeline::bundle::{compact_stalled, schedule_bundle};
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::latches::LatchEntry;
use crate::trace::TraceSource;

/// Executes the instruction fetch stage of the pipeline.
///
/// Must run after the decode stage has copied the Fetch latch, since the
/// validity it computes here is written over that copy.
pub fn fetch_stage(p: &mut Pipeline, trace: &mut dyn TraceSource) {
    let outcome = schedule_bundle(
        &mut p.latches.fe,
        &p.latches.ex,
        &p.latches.mem,
        p.forwarding,
    );

    for (id, fe) in p.latches.id.iter_mut().zip(&p.latches.fe) {
        id.valid = fe.valid && !fe.stall;
        id.stall = false;
    }

    p.stats.stalls_data += outcome.stalled as u64;
    p.stats.forwards_ex += outcome.forwarded_ex as u64;
    p.stats.forwards_mem += outcome.forwarded_mem as u64;

    if outcome.first_stall.is_some() {
        compact_stalled(&mut p.latches.fe);
    }

    for lane in 0..p.width {
        if p.latches.fe[lane].stall {
            continue;
        }

        if p.fetch_cbr_stall {
            p.latches.fe[lane] = LatchEntry::bubble();
            p.stats.stalls_control += 1;
            continue;
        }

        let mut op = fetch_op(p, trace);
        if op.valid && op.record.is_cond_branch() {
            check_branch(p, &mut op);
        }
        p.latches.fe[lane] = op;
    }
}

/// Pulls the next record from the trace and assigns it an op-id.
///
/// At end of stream the last assigned op-id becomes the halt marker and a
/// bubble is returned; the trace is not polled again afterwards.
fn fetch_op(p: &mut Pipeline, trace: &mut dyn TraceSource) -> LatchEntry {
    if p.trace_exhausted {
        return LatchEntry::bubble();
    }

    match trace.next_record() {
        Some(record) => {
            p.op_id_tracker += 1;
            LatchEntry::fetched(p.op_id_tracker, record)
        }
        None => {
            p.trace_exhausted = true;
            p.halt_op_id = p.op_id_tracker;
            tracing::debug!(halt_op_id = p.halt_op_id, cycle = p.stats.cycles, "trace exhausted");
            LatchEntry::bubble()
        }
    }
}

/// Predicts a freshly fetched conditional branch and trains on its outcome.
///
/// The trace already carries the resolved direction, so the predictor is
/// updated at fetch rather than at retirement. A wrong prediction marks the
/// branch and blocks fetch until it retires.
pub fn check_branch(p: &mut Pipeline, op: &mut LatchEntry) {
    let Some(bu) = p.bpred.as_mut() else {
        return;
    };

    let pc = op.record.inst_addr;
    let resolved = op.record.br_taken;
    let predicted = bu.predict(pc);
    bu.update(pc, resolved);

    if predicted != resolved {
        bu.record_mispredict();
        op.is_mispred_cbr = true;
        p.fetch_cbr_stall = true;
        tracing::debug!(
            op_id = op.op_id,
            pc,
            predicted,
            resolved,
            "branch mispredicted, fetch stalled"
        );
    }
}
