//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the per-lane entry carried between the pipeline stages:
//! Fetch → Decode → Execute → Memory → (Writeback).
//!
//! 1. **Instruction Flow:** One `LatchEntry` per lane per stage, copied forward each cycle.
//! 2. **Superscalar Support:** Every latch is `width` lanes wide.
//! 3. **Branch Recovery:** Mispredicted branches carry a flag that releases fetch on retirement.

use crate::common::constants::{INVALID_OP_ID, NUM_LATCHES};
use crate::trace::TraceRecord;

/// A pipeline latch position, named after the stage that fills it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Filled by fetch from the trace.
    Fetch,
    /// Copied from Fetch.
    Decode,
    /// Copied from Decode.
    Execute,
    /// Copied from Execute; consumed by Writeback.
    Memory,
}

impl Stage {
    /// All latch positions in pipeline order.
    pub const ALL: [Self; NUM_LATCHES] = [Self::Fetch, Self::Decode, Self::Execute, Self::Memory];

    /// Short column label used by the state dump.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetch => "FE",
            Self::Decode => "ID",
            Self::Execute => "EX",
            Self::Memory => "MEM",
        }
    }
}

/// One lane of one pipeline latch.
///
/// An entry is never deallocated; once its instruction passes Writeback the
/// slot is simply overwritten by whatever flows in behind it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatchEntry {
    /// Holds a live instruction.
    pub valid: bool,
    /// Held in place this cycle. Only ever set in the Fetch latch.
    pub stall: bool,
    /// Program-order identifier; `0` means no instruction.
    pub op_id: u64,
    /// Conditional branch whose prediction was wrong.
    pub is_mispred_cbr: bool,
    /// Instruction descriptor.
    pub record: TraceRecord,
}

impl LatchEntry {
    /// Creates a freshly fetched, valid entry.
    pub fn fetched(op_id: u64, record: TraceRecord) -> Self {
        Self {
            valid: true,
            stall: false,
            op_id,
            is_mispred_cbr: false,
            record,
        }
    }

    /// Creates an empty (bubble) entry.
    pub fn bubble() -> Self {
        Self::default()
    }

    /// Ordering key placing older instructions first and bubbles last.
    #[inline]
    pub fn age_key(&self) -> u64 {
        if self.op_id == INVALID_OP_ID {
            u64::MAX
        } else {
            self.op_id
        }
    }
}

/// Common operations over one latch (all lanes of one stage).
pub trait PipelineLatch {
    /// Returns true if no lane holds a valid instruction.
    fn is_idle(&self) -> bool;
}

impl PipelineLatch for [LatchEntry] {
    fn is_idle(&self) -> bool {
        self.iter().all(|e| !e.valid)
    }
}

/// The four latches of a `width`-lane pipeline.
#[derive(Clone, Debug)]
pub struct PipelineLatches {
    /// Fetch latch (IF).
    pub fe: Vec<LatchEntry>,
    /// Decode latch (ID).
    pub id: Vec<LatchEntry>,
    /// Execute latch (EX).
    pub ex: Vec<LatchEntry>,
    /// Memory latch (MEM).
    pub mem: Vec<LatchEntry>,
}

impl PipelineLatches {
    /// Creates empty latches with `width` lanes each.
    pub fn new(width: usize) -> Self {
        Self {
            fe: vec![LatchEntry::bubble(); width],
            id: vec![LatchEntry::bubble(); width],
            ex: vec![LatchEntry::bubble(); width],
            mem: vec![LatchEntry::bubble(); width],
        }
    }

    /// Lanes of one stage.
    pub fn stage(&self, stage: Stage) -> &[LatchEntry] {
        match stage {
            Stage::Fetch => &self.fe,
            Stage::Decode => &self.id,
            Stage::Execute => &self.ex,
            Stage::Memory => &self.mem,
        }
    }

    /// Returns true if no stage holds a valid instruction.
    pub fn is_drained(&self) -> bool {
        Stage::ALL.iter().all(|&s| self.stage(s).is_idle())
    }
}
