//! Data Hazard Detection and Forwarding.
//!
//! This module decides, for one candidate instruction sitting in the Fetch
//! latch, whether it may advance into Decode. It provides:
//! 1. **Hazard Detection:** Register and condition-code RAW checks against the Execute and Memory latches.
//! 2. **Operand Forwarding:** A two-point bypass network (Execute, Memory) that can cancel a detected stall.
//!
//! Loads only produce their value in Memory, so a load sitting in Execute
//! cannot be bypassed from there. A candidate with several producers
//! advances only when every one of them can be bypassed.

use crate::core::pipeline::latches::LatchEntry;
use crate::trace::TraceRecord;

/// Enabled bypass paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Forwarding {
    /// Bypass from the Execute latch.
    pub exe: bool,
    /// Bypass from the Memory latch.
    pub mem: bool,
}

impl Forwarding {
    /// Returns true if either path is enabled.
    #[inline]
    pub fn any(self) -> bool {
        self.exe || self.mem
    }
}

/// Which bypass path resolved a hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BypassPath {
    /// Value taken from the Execute latch.
    Execute,
    /// Value taken from the Memory latch.
    Memory,
}

/// Checks whether `candidate` depends on any older instruction in Execute or Memory.
///
/// A lane matches if it is valid and either writes a register the candidate
/// reads, or writes the condition code while the candidate reads it. The
/// result is a plain OR across all lanes of both stages; it does not say
/// which producer caused the hazard.
///
/// # Examples
///
/// ```
/// use pipesim_core::core::pipeline::hazards::detect_hazard;
/// use pipesim_core::core::pipeline::latches::LatchEntry;
/// use pipesim_core::trace::TraceRecord;
///
/// let producer = TraceRecord { dest: 5, dest_needed: true, ..Default::default() };
/// let consumer = TraceRecord { src1_reg: 5, src1_needed: true, ..Default::default() };
///
/// let ex = [LatchEntry::fetched(1, producer)];
/// let mem = [LatchEntry::bubble()];
/// assert!(detect_hazard(&consumer, &ex, &mem));
/// ```
pub fn detect_hazard(candidate: &TraceRecord, ex: &[LatchEntry], mem: &[LatchEntry]) -> bool {
    ex.iter()
        .chain(mem)
        .any(|producer| producer.valid && candidate.depends_on(&producer.record))
}

/// Tries to resolve a detected hazard through the bypass network.
///
/// Every matching producer must be covered for the hazard to clear. A
/// matching Execute producer is covered when Execute forwarding is enabled
/// and the producer is not a load. A matching Memory producer is covered
/// when Memory forwarding is enabled; loads are fine there. If any match is
/// left uncovered the stall stands.
///
/// # Returns
///
/// The path that resolved the hazard (Execute when any Execute producer was
/// bypassed, else Memory), or `None` if the stall stands.
pub fn forward(
    candidate: &TraceRecord,
    ex: &[LatchEntry],
    mem: &[LatchEntry],
    fwd: Forwarding,
) -> Option<BypassPath> {
    let matches = |producer: &&LatchEntry| producer.valid && candidate.depends_on(&producer.record);

    let ex_covered = ex
        .iter()
        .filter(matches)
        .all(|p| fwd.exe && !p.record.is_load());
    let mem_covered = mem.iter().filter(matches).all(|_| fwd.mem);
    if !(ex_covered && mem_covered) {
        return None;
    }

    if ex.iter().any(|p| matches(&p)) {
        Some(BypassPath::Execute)
    } else if mem.iter().any(|p| matches(&p)) {
        Some(BypassPath::Memory)
    } else {
        None
    }
}

/// Full cross-stage check: detection followed, if needed, by forwarding.
///
/// # Returns
///
/// `(stall, bypass)` where `bypass` is set when forwarding cancelled a hazard.
pub fn resolve(
    candidate: &TraceRecord,
    ex: &[LatchEntry],
    mem: &[LatchEntry],
    fwd: Forwarding,
) -> (bool, Option<BypassPath>) {
    if !detect_hazard(candidate, ex, mem) {
        return (false, None);
    }
    if !fwd.any() {
        return (true, None);
    }
    match forward(candidate, ex, mem, fwd) {
        Some(path) => (false, Some(path)),
        None => (true, None),
    }
}
