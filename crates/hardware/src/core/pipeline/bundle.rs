//! Fetch bundle scheduling.
//!
//! Every cycle the instructions sitting in the Fetch latch are classified in
//! lane order (program order within the bundle) as either advancing into
//! Decode or stalling in place:
//! 1. **In-order issue:** Once a lane stalls, every younger lane stalls with it.
//! 2. **Cross-stage hazards:** Checked against Execute/Memory, with optional forwarding.
//! 3. **Intra-bundle hazards:** Same-cycle siblings can never forward to each other.
//! 4. **Compaction:** Stalled instructions move to the lowest lanes, oldest first.

use crate::common::constants::NUM_REGS;
use crate::core::pipeline::hazards::{self, BypassPath, Forwarding};
use crate::core::pipeline::latches::LatchEntry;
use crate::trace::TraceRecord;

/// Writers issued earlier in the current bundle.
///
/// Reset at the start of every cycle.
#[derive(Clone, Debug)]
pub struct BundleTracker {
    pending_writers: [u16; NUM_REGS],
    cc_write_pending: bool,
}

impl Default for BundleTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleTracker {
    /// Creates a tracker with no pending writers.
    pub fn new() -> Self {
        Self {
            pending_writers: [0; NUM_REGS],
            cc_write_pending: false,
        }
    }

    /// Returns true if `rec` reads something an earlier lane of this bundle writes.
    pub fn conflicts(&self, rec: &TraceRecord) -> bool {
        let reg = rec
            .sources()
            .any(|src| self.pending_writers[usize::from(src)] != 0);
        reg || (rec.cc_read && self.cc_write_pending)
    }

    /// Registers `rec` as a producer for the lanes after it.
    pub fn record_producer(&mut self, rec: &TraceRecord) {
        if let Some(rd) = rec.dest_reg() {
            self.pending_writers[usize::from(rd)] += 1;
        }
        self.cc_write_pending |= rec.cc_write;
    }
}

/// Result of classifying one bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BundleOutcome {
    /// Lane index of the first stall, if any.
    pub first_stall: Option<usize>,
    /// Valid lanes held in Fetch this cycle.
    pub stalled: usize,
    /// Lanes that advanced thanks to the Execute bypass.
    pub forwarded_ex: usize,
    /// Lanes that advanced thanks to the Memory bypass.
    pub forwarded_mem: usize,
}

/// Classifies each Fetch lane as advancing or stalled.
///
/// Sets `stall` on every Fetch lane. Empty lanes never raise a stall of their
/// own but do inherit one from an older lane.
pub fn schedule_bundle(
    fetch: &mut [LatchEntry],
    ex: &[LatchEntry],
    mem: &[LatchEntry],
    fwd: Forwarding,
) -> BundleOutcome {
    let mut tracker = BundleTracker::new();
    let mut outcome = BundleOutcome::default();
    let mut prev_stall = false;

    for (lane, entry) in fetch.iter_mut().enumerate() {
        if prev_stall {
            entry.stall = true;
        } else if !entry.valid {
            entry.stall = false;
        } else {
            let rec = entry.record;
            let (cross, bypass) = hazards::resolve(&rec, ex, mem, fwd);
            let sibling = tracker.conflicts(&rec);
            tracker.record_producer(&rec);

            entry.stall = cross || sibling;
            if !entry.stall {
                match bypass {
                    Some(BypassPath::Execute) => outcome.forwarded_ex += 1,
                    Some(BypassPath::Memory) => outcome.forwarded_mem += 1,
                    None => {}
                }
            }
        }

        if entry.stall {
            if outcome.first_stall.is_none() {
                outcome.first_stall = Some(lane);
            }
            if entry.valid {
                outcome.stalled += 1;
            }
        }
        prev_stall = entry.stall;
    }

    outcome
}

/// Moves stalled instructions to the front of the Fetch latch.
///
/// Stalled lanes are packed into lanes `0..n` in ascending op-id order (empty
/// entries sort last and are dropped); every other lane becomes an unstalled
/// bubble, ready to be refilled by fetch.
pub fn compact_stalled(fetch: &mut [LatchEntry]) {
    let mut held: Vec<LatchEntry> = fetch
        .iter()
        .filter(|e| e.stall && e.valid)
        .copied()
        .collect();
    held.sort_by_key(LatchEntry::age_key);

    for (lane, slot) in fetch.iter_mut().enumerate() {
        *slot = held.get(lane).copied().unwrap_or_default();
    }
}
