//! Instruction trace input.
//!
//! 1. **Records:** The per-instruction descriptor and its binary encoding.
//! 2. **Sources:** File-backed and in-memory record streams.

/// Trace sources and the trace writer.
pub mod reader;

/// Instruction descriptors and their binary layout.
pub mod record;

pub use reader::{InMemoryTrace, TraceReader, TraceSource, write_trace};
pub use record::{OpKind, TraceRecord};
