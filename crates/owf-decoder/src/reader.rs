use std::io::Read;

use log::{debug, trace};
use owf_wire::header::{self, LENGTH_SIZE, SAMPLE_WIDTH};
use owf_wire::{Budget, WireError};

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::visitor::{Entity, Visit, Visitor};

/// Decode context shared by every field decoder.
///
/// Holds the byte source, the allocation ceiling, the visitor and a
/// couple of counters. It deliberately does not hold the budget of the
/// segment being parsed: each segment's [`Budget`] lives on the stack
/// frame that opened it and is passed down by `&mut`, so a child can
/// only ever debit the segment it was handed.
///
/// The segment engine is the three recursion shapes used throughout the
/// format:
///
/// ```text
///   unwrap_top          [len][...payload...]            no parent
///   unwrap              [len][...payload...]            charged to parent
///   unwrap_multi        item item item ...              items self-delimit
///   unwrap_nested_multi [len][item] [len][item] ...     each item skippable
/// ```
pub(crate) struct Reader<'v, R, V> {
    source: R,
    visitor: &'v mut V,
    max_alloc: u32,
    skip_chunk: u32,
    scratch: Vec<u8>,
    offset: u64,
    skipped: u64,
}

impl<'v, R: Read, V: Visitor> Reader<'v, R, V> {
    pub(crate) fn new(source: R, visitor: &'v mut V, config: &DecoderConfig) -> Self {
        Self {
            source,
            visitor,
            max_alloc: config.max_alloc,
            skip_chunk: config.aligned_skip_chunk(),
            scratch: Vec::new(),
            offset: 0,
            skipped: 0,
        }
    }

    /// Bytes pulled from the source so far.
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes drained by segment skips so far.
    pub(crate) fn skipped(&self) -> u64 {
        self.skipped
    }

    // ── Byte source ──────────────────────────────────────────────────────

    /// Fill `dst` from the source without touching any budget.
    ///
    /// Zero-length reads are no-ops and never reach the source.
    pub(crate) fn pull(&mut self, dst: &mut [u8]) -> Result<(), DecodeError> {
        if dst.is_empty() {
            return Ok(());
        }
        self.source
            .read_exact(dst)
            .map_err(|source| DecodeError::Io {
                requested: dst.len(),
                offset: self.offset,
                source,
            })?;
        self.offset += dst.len() as u64;
        Ok(())
    }

    /// Read exactly `N` bytes from the current segment.
    ///
    /// The debit is validated before the read, so a short or misaligned
    /// budget never causes bytes past the segment to be consumed.
    pub(crate) fn read_exact<const N: usize>(
        &mut self,
        budget: &mut Budget,
    ) -> Result<[u8; N], DecodeError> {
        budget.debit(u32::try_from(N).unwrap_or(u32::MAX))?;
        let mut buf = [0u8; N];
        self.pull(&mut buf)?;
        Ok(buf)
    }

    /// Read a big-endian signed 64-bit time field.
    pub(crate) fn read_time(&mut self, budget: &mut Budget) -> Result<i64, DecodeError> {
        Ok(i64::from_be_bytes(self.read_exact::<8>(budget)?))
    }

    // ── Allocation guard ─────────────────────────────────────────────────

    /// Reserve room for `count` items spanning `length` wire bytes.
    ///
    /// The ceiling is checked first; the allocator is only consulted for
    /// requests within it.
    fn allocate<T>(&self, length: u32, count: usize) -> Result<Vec<T>, DecodeError> {
        if length > self.max_alloc {
            return Err(DecodeError::AllocationLimitExceeded {
                requested: length,
                max: self.max_alloc,
            });
        }
        let mut buf = Vec::new();
        buf.try_reserve_exact(count)
            .map_err(|_| DecodeError::AllocationFailure { requested: length })?;
        Ok(buf)
    }

    /// Read a variable-length byte field of `length` bytes.
    pub(crate) fn read_bytes(
        &mut self,
        budget: &mut Budget,
        length: u32,
    ) -> Result<Vec<u8>, DecodeError> {
        let mut buf = self.allocate::<u8>(length, length as usize)?;
        budget.debit(length)?;
        buf.resize(length as usize, 0);
        self.pull(&mut buf)?;
        Ok(buf)
    }

    /// Read `length` bytes of big-endian doubles, converting to host order.
    ///
    /// Samples are decoded straight into the guarded allocation through a
    /// small stack buffer, so the field is never held twice.
    pub(crate) fn read_doubles(
        &mut self,
        budget: &mut Budget,
        length: u32,
    ) -> Result<Vec<f64>, DecodeError> {
        check_sample_alignment(length)?;
        let width = SAMPLE_WIDTH as usize;
        let mut samples = self.allocate::<f64>(length, length as usize / width)?;
        budget.debit(length)?;

        let mut chunk = [0u8; 512];
        let mut left = length as usize;
        while left > 0 {
            let n = left.min(chunk.len());
            self.pull(&mut chunk[..n])?;
            samples.extend(chunk[..n].chunks_exact(width).map(|group| {
                let mut word = [0u8; 8];
                word.copy_from_slice(group);
                f64::from_be_bytes(word)
            }));
            left -= n;
        }
        Ok(samples)
    }

    // ── Visitor dispatch ─────────────────────────────────────────────────

    pub(crate) fn dispatch(&mut self, entity: Entity) -> Visit {
        let kind = entity.kind();
        let verdict = self.visitor.visit(entity);
        trace!("{kind} dispatched at offset {}: {verdict:?}", self.offset);
        verdict
    }

    // ── Segment engine ───────────────────────────────────────────────────

    /// Read one length header and decode the segment it brackets.
    ///
    /// Returns the decoded value and the total number of bytes consumed,
    /// header included.
    pub(crate) fn unwrap_top<T, F>(&mut self, decode: F) -> Result<(T, u64), DecodeError>
    where
        F: FnOnce(&mut Self, &mut Budget) -> Result<T, DecodeError>,
    {
        let mut header = [0u8; LENGTH_SIZE as usize];
        self.pull(&mut header)?;
        let length = header::parse_length(header)?;
        let value = self.enter(length, decode)?;
        Ok((value, u64::from(length) + u64::from(LENGTH_SIZE)))
    }

    /// Decode an individually length-prefixed child of `parent`.
    ///
    /// The header and the child's declared length are both charged to
    /// the parent before the child is decoded, so a child can never claim
    /// more than its parent has left.
    pub(crate) fn unwrap<T, F>(&mut self, parent: &mut Budget, decode: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Self, &mut Budget) -> Result<T, DecodeError>,
    {
        parent.debit(LENGTH_SIZE)?;
        let mut header = [0u8; LENGTH_SIZE as usize];
        self.pull(&mut header)?;
        let length = header::parse_length(header)?;
        parent.debit(length)?;
        self.enter(length, decode)
    }

    /// Call `decode` back to back until `budget` is exhausted.
    ///
    /// Every item decoder consumes at least one length header, so each
    /// iteration strictly shrinks the budget.
    pub(crate) fn unwrap_multi<F>(&mut self, budget: &mut Budget, mut decode: F) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self, &mut Budget) -> Result<(), DecodeError>,
    {
        while !budget.is_exhausted() {
            decode(self, budget)?;
        }
        Ok(())
    }

    /// Call [`unwrap`](Self::unwrap) with `decode` until `budget` is exhausted.
    pub(crate) fn unwrap_nested_multi<F>(
        &mut self,
        budget: &mut Budget,
        mut decode: F,
    ) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self, &mut Budget) -> Result<(), DecodeError>,
    {
        while !budget.is_exhausted() {
            self.unwrap(budget, &mut decode)?;
        }
        Ok(())
    }

    /// Run `decode` over a fresh budget of `length` bytes, then drain
    /// whatever it left unread.
    fn enter<T, F>(&mut self, length: u32, decode: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Self, &mut Budget) -> Result<T, DecodeError>,
    {
        let mut budget = Budget::new(length)?;
        trace!("segment of {length} bytes at offset {}", self.offset);

        let value = decode(self, &mut budget)?;

        if !budget.is_exhausted() {
            self.skip(&mut budget)?;
        }
        if !budget.is_exhausted() {
            return Err(DecodeError::TrailingData {
                remaining: budget.remaining(),
            });
        }
        Ok(value)
    }

    /// Drain the rest of `budget` from the source without keeping it.
    fn skip(&mut self, budget: &mut Budget) -> Result<(), DecodeError> {
        let total = budget.remaining();
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.resize(self.skip_chunk as usize, 0);

        let result = self.drain(budget, &mut scratch);
        self.scratch = scratch;
        result?;

        self.skipped += u64::from(total);
        debug!("skipped {total} bytes, now at offset {}", self.offset);
        Ok(())
    }

    fn drain(&mut self, budget: &mut Budget, scratch: &mut [u8]) -> Result<(), DecodeError> {
        while !budget.is_exhausted() {
            let n = budget.remaining().min(self.skip_chunk);
            budget.debit(n)?;
            self.pull(&mut scratch[..n as usize])?;
        }
        Ok(())
    }
}

/// Reject a sample array whose length is not a whole number of doubles.
fn check_sample_alignment(length: u32) -> Result<(), WireError> {
    if length % SAMPLE_WIDTH == 0 {
        Ok(())
    } else {
        Err(WireError::Misaligned {
            length,
            align: SAMPLE_WIDTH,
        })
    }
}
