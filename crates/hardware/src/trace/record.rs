//! Instruction trace records.
//!
//! A record describes one dynamic instruction: its kind, address, the
//! registers it reads and writes, its condition-code usage, and for
//! conditional branches the resolved direction. Values are never modelled.
//!
//! The binary encoding is a fixed 24-byte little-endian layout:
//!
//! | offset | size | field                         |
//! |-------:|-----:|-------------------------------|
//! | 0      | 8    | instruction address           |
//! | 8      | 1    | op kind                       |
//! | 9      | 1    | src1 register                 |
//! | 10     | 1    | src1 needed                   |
//! | 11     | 1    | src2 register                 |
//! | 12     | 1    | src2 needed                   |
//! | 13     | 1    | destination register          |
//! | 14     | 1    | destination needed            |
//! | 15     | 1    | condition-code read           |
//! | 16     | 1    | condition-code write          |
//! | 17     | 1    | branch taken                  |
//! | 18     | 6    | reserved (zero)               |

use crate::common::constants::TRACE_RECORD_SIZE;

/// Operation class of a traced instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpKind {
    /// Integer ALU operation.
    #[default]
    Alu = 0,
    /// Memory load; its result is available one stage later than an ALU result.
    Load = 1,
    /// Memory store.
    Store = 2,
    /// Conditional branch.
    CondBranch = 3,
    /// Anything else (jumps, system ops, nops).
    Other = 4,
}

impl OpKind {
    /// Decodes an op kind byte, returning `None` for unknown encodings.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Alu),
            1 => Some(Self::Load),
            2 => Some(Self::Store),
            3 => Some(Self::CondBranch),
            4 => Some(Self::Other),
            _ => None,
        }
    }
}

/// One instruction descriptor as recorded in the trace.
///
/// Immutable once fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceRecord {
    /// Operation class.
    pub op: OpKind,
    /// Instruction address.
    pub inst_addr: u64,
    /// First source register.
    pub src1_reg: u8,
    /// Whether `src1_reg` is read.
    pub src1_needed: bool,
    /// Second source register.
    pub src2_reg: u8,
    /// Whether `src2_reg` is read.
    pub src2_needed: bool,
    /// Destination register.
    pub dest: u8,
    /// Whether `dest` is written.
    pub dest_needed: bool,
    /// Reads the condition code.
    pub cc_read: bool,
    /// Writes the condition code.
    pub cc_write: bool,
    /// Resolved direction, meaningful only for conditional branches.
    pub br_taken: bool,
}

impl TraceRecord {
    /// Returns true for conditional branches.
    #[inline]
    pub fn is_cond_branch(&self) -> bool {
        self.op == OpKind::CondBranch
    }

    /// Returns true for loads.
    #[inline]
    pub fn is_load(&self) -> bool {
        self.op == OpKind::Load
    }

    /// Returns the destination register if this instruction writes one.
    #[inline]
    pub fn dest_reg(&self) -> Option<u8> {
        self.dest_needed.then_some(self.dest)
    }

    /// Returns true if this instruction reads `reg` through either source.
    #[inline]
    pub fn reads_reg(&self, reg: u8) -> bool {
        (self.src1_needed && self.src1_reg == reg) || (self.src2_needed && self.src2_reg == reg)
    }

    /// Iterates the source registers this instruction actually reads.
    pub fn sources(&self) -> impl Iterator<Item = u8> {
        let src1 = self.src1_needed.then_some(self.src1_reg);
        let src2 = self.src2_needed.then_some(self.src2_reg);
        src1.into_iter().chain(src2)
    }

    /// Returns true if `producer` writes something this record reads.
    ///
    /// Covers both register RAW dependencies and condition-code dependencies.
    #[inline]
    pub fn depends_on(&self, producer: &Self) -> bool {
        let reg = producer.dest_reg().is_some_and(|rd| self.reads_reg(rd));
        let cc = self.cc_read && producer.cc_write;
        reg || cc
    }

    /// Decodes a record from its fixed-size binary form.
    ///
    /// Returns `None` if the op kind byte is not a known encoding.
    pub fn decode(bytes: &[u8; TRACE_RECORD_SIZE]) -> Option<Self> {
        let mut addr = [0u8; 8];
        addr.copy_from_slice(&bytes[0..8]);
        Some(Self {
            inst_addr: u64::from_le_bytes(addr),
            op: OpKind::from_u8(bytes[8])?,
            src1_reg: bytes[9],
            src1_needed: bytes[10] != 0,
            src2_reg: bytes[11],
            src2_needed: bytes[12] != 0,
            dest: bytes[13],
            dest_needed: bytes[14] != 0,
            cc_read: bytes[15] != 0,
            cc_write: bytes[16] != 0,
            br_taken: bytes[17] != 0,
        })
    }

    /// Encodes the record in the fixed-size binary form.
    pub fn encode(&self) -> [u8; TRACE_RECORD_SIZE] {
        let mut out = [0u8; TRACE_RECORD_SIZE];
        out[0..8].copy_from_slice(&self.inst_addr.to_le_bytes());
        out[8] = self.op as u8;
        out[9] = self.src1_reg;
        out[10] = u8::from(self.src1_needed);
        out[11] = self.src2_reg;
        out[12] = u8::from(self.src2_needed);
        out[13] = self.dest;
        out[14] = u8::from(self.dest_needed);
        out[15] = u8::from(self.cc_read);
        out[16] = u8::from(self.cc_write);
        out[17] = u8::from(self.br_taken);
        out
    }
}
