//! Trace sources.
//!
//! The pipeline pulls one record per fetch slot from a [`TraceSource`]. A
//! source answers `None` once the stream is over; a short read or a malformed
//! record both end the stream, and the source stays exhausted afterwards.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read, Write};
use std::path::Path;

use crate::common::constants::TRACE_RECORD_SIZE;
use crate::common::error::SimError;
use crate::trace::record::TraceRecord;

/// Sequential supplier of instruction records.
pub trait TraceSource {
    /// Returns the next record, or `None` at end of stream.
    fn next_record(&mut self) -> Option<TraceRecord>;
}

/// Reads fixed-size binary records from any byte stream.
#[derive(Debug)]
pub struct TraceReader<R: Read> {
    inner: R,
    records_read: u64,
    exhausted: bool,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file for buffered sequential reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SimError::TraceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> TraceReader<R> {
    /// Wraps a byte stream.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            records_read: 0,
            exhausted: false,
        }
    }

    /// Number of well-formed records returned so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Returns true once the stream has ended.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl<R: Read> TraceSource for TraceReader<R> {
    fn next_record(&mut self) -> Option<TraceRecord> {
        if self.exhausted {
            return None;
        }

        let mut buf = [0u8; TRACE_RECORD_SIZE];
        if let Err(e) = self.inner.read_exact(&mut buf) {
            self.exhausted = true;
            if e.kind() == ErrorKind::UnexpectedEof {
                tracing::debug!(records = self.records_read, "end of trace");
            } else {
                tracing::warn!(records = self.records_read, error = %e, "trace read failed, ending stream");
            }
            return None;
        }

        match TraceRecord::decode(&buf) {
            Some(rec) => {
                self.records_read += 1;
                Some(rec)
            }
            None => {
                self.exhausted = true;
                tracing::warn!(
                    record = self.records_read,
                    op_kind = buf[8],
                    "malformed trace record, ending stream"
                );
                None
            }
        }
    }
}

/// A trace held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTrace {
    records: VecDeque<TraceRecord>,
}

impl InMemoryTrace {
    /// Creates a trace from records in program order.
    pub fn new(records: impl IntoIterator<Item = TraceRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Number of records not yet consumed.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl TraceSource for InMemoryTrace {
    fn next_record(&mut self) -> Option<TraceRecord> {
        self.records.pop_front()
    }
}

/// Writes records in the binary trace layout.
pub fn write_trace<'a, W: Write>(
    out: &mut W,
    records: impl IntoIterator<Item = &'a TraceRecord>,
) -> io::Result<()> {
    for rec in records {
        out.write_all(&rec.encode())?;
    }
    out.flush()
}
