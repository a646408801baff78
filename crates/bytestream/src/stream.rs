//! The ring buffer engine.
//!
//! Layout
//! - `storage` holds `capacity + 1` logical slots (plus rounding headroom
//!   that is never addressed). Indexes wrap modulo `capacity + 1`; the spare
//!   slot lets `head == tail` mean "empty" while `used == capacity` means
//!   "full".
//! - `head` is the oldest unread byte, `tail` is where the next byte lands.
//! - `free` is cached and always recomputed from `used`, never adjusted on
//!   its own.
//!
//! Every operation that touches a range of slots goes through `runs`, which
//! splits `[start, start + len)` into at most two physical runs: one up to
//! the end of the logical storage and one from index zero.
//!
//! Failure checks all happen before any index or counter is modified, so a
//! rejected call leaves the stream exactly as it found it.

use alloc::{vec, vec::Vec};
use core::{fmt, ops::Range};

use log::{debug, trace};

use crate::{
    eol::find_eol,
    error::{Result, StreamError},
    options::StreamOptions,
};

/// Occupancy snapshot returned by [`ByteStream::status`].
///
/// `free + used == capacity` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Maximum number of bytes the stream can hold.
    pub capacity: usize,
    /// Bytes that can still be written.
    pub free: usize,
    /// Bytes currently buffered.
    pub used: usize,
}

/// Where [`ByteStream::read`] puts the bytes it consumes.
#[derive(Debug)]
pub enum Destination<'a> {
    /// Copy the bytes out; the slice length is the read size.
    Keep(&'a mut [u8]),
    /// Consume this many bytes without copying them anywhere.
    Discard(usize),
}

impl Destination<'_> {
    /// Number of bytes the read will consume.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Destination::Keep(buf) => buf.len(),
            Destination::Discard(len) => *len,
        }
    }

    /// Whether the read is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fixed-capacity FIFO of bytes backed by a single ring of storage.
pub struct ByteStream {
    storage: Vec<u8>,
    head: usize,
    tail: usize,
    capacity: usize,
    used: usize,
    free: usize,
}

impl fmt::Debug for ByteStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteStream")
            .field("capacity", &self.capacity)
            .field("used", &self.used)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish_non_exhaustive()
    }
}

impl ByteStream {
    /// Allocates a stream with the configured capacity.
    ///
    /// # Errors
    ///
    /// `StreamError::BadCapacity` if the capacity is out of range, or
    /// `StreamError::NoMemory` if the storage cannot be allocated.
    pub fn new(options: StreamOptions) -> Result<Self> {
        let capacity = options.validate()? as usize;
        let storage_len = options.storage_len();

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(storage_len)
            .map_err(|_| StreamError::NoMemory)?;
        storage.resize(storage_len, 0);

        debug!("allocated byte stream: capacity {capacity}, storage {storage_len} bytes");
        Ok(Self {
            storage,
            head: 0,
            tail: 0,
            capacity,
            used: 0,
            free: capacity,
        })
    }

    /// Shorthand for [`ByteStream::new`] with only a capacity.
    ///
    /// # Errors
    ///
    /// See [`ByteStream::new`].
    pub fn with_capacity(capacity: u32) -> Result<Self> {
        Self::new(StreamOptions { capacity })
    }

    /// Releases the stream and its storage. Dropping the stream does the
    /// same; this spells it out at call sites that want it visible.
    pub fn close(self) {
        debug!("releasing byte stream of capacity {}", self.capacity);
    }

    /// Current capacity, free and used byte counts.
    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            capacity: self.capacity,
            free: self.free,
            used: self.used,
        }
    }

    /// Maximum number of bytes the stream can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes currently buffered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Bytes that can still be written.
    #[must_use]
    pub fn free(&self) -> usize {
        self.free
    }

    /// Whether no bytes are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Whether no further byte can be written.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free == 0
    }

    /// Appends all of `data`, or nothing.
    ///
    /// # Errors
    ///
    /// `StreamError::NoSpace` if fewer than `data.len()` bytes are free.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        if self.free < data.len() {
            trace!("write of {} bytes rejected: {} free", data.len(), self.free);
            return Err(StreamError::NoSpace {
                requested: data.len(),
                free: self.free,
            });
        }

        let (first, second) = self.runs(self.tail, data.len());
        let (front, back) = data.split_at(first.len());
        self.storage[first].copy_from_slice(front);
        self.storage[second].copy_from_slice(back);

        self.tail = self.advance(self.tail, data.len());
        self.set_used(self.used + data.len());
        Ok(())
    }

    /// Consumes bytes from the head, copying them out or discarding them.
    ///
    /// # Errors
    ///
    /// `StreamError::NoData` if fewer bytes are buffered than requested.
    pub fn read(&mut self, dest: Destination<'_>) -> Result<()> {
        let size = dest.len();
        if size == 0 {
            return Ok(());
        }
        if self.used < size {
            trace!("read of {size} bytes rejected: {} buffered", self.used);
            return Err(StreamError::NoData {
                requested: size,
                available: self.used,
            });
        }

        if let Destination::Keep(out) = dest {
            self.copy_out(self.head, out);
        }

        self.head = self.advance(self.head, size);
        self.set_used(self.used - size);
        Ok(())
    }

    /// Drops `len` bytes from the head without copying them.
    ///
    /// # Errors
    ///
    /// `StreamError::NoData` if fewer than `len` bytes are buffered.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.read(Destination::Discard(len))
    }

    /// Copies `out.len()` bytes starting `offset` bytes past the head,
    /// leaving the stream untouched.
    ///
    /// # Errors
    ///
    /// `StreamError::BadOffset` if `offset` is not below the buffered length
    /// (checked even for an empty `out`), then `StreamError::NoData` if the
    /// range runs past the buffered bytes.
    pub fn peek(&self, out: &mut [u8], offset: usize) -> Result<()> {
        if offset >= self.used {
            trace!("peek at offset {offset} rejected: {} buffered", self.used);
            return Err(StreamError::BadOffset {
                offset,
                used: self.used,
            });
        }
        if out.is_empty() {
            return Ok(());
        }
        if out.len() > self.used - offset {
            trace!(
                "peek of {} bytes at offset {offset} rejected: {} buffered",
                out.len(),
                self.used
            );
            return Err(StreamError::NoData {
                requested: offset.saturating_add(out.len()),
                available: self.used,
            });
        }

        self.copy_out(self.advance(self.head, offset), out);
        Ok(())
    }

    /// Extracts or measures the next line, end-of-line marker included.
    ///
    /// - With `out`, the line is copied into it and consumed. The line must
    ///   fit in `capacity` bytes and in `out`.
    /// - Without `out`, the stream is left untouched and the line length is
    ///   only reported through `out_len`, subject to the same `capacity`.
    ///
    /// The line length is stored in `out_len` when one is given.
    ///
    /// # Errors
    ///
    /// - `StreamError::MissingTarget` if both `out` and `out_len` are `None`.
    /// - `StreamError::NoEol` if no complete line is buffered.
    /// - `StreamError::BadSize` if the line is longer than the allowed size.
    pub fn readline(
        &mut self,
        out: Option<&mut [u8]>,
        capacity: usize,
        out_len: Option<&mut usize>,
    ) -> Result<()> {
        if out.is_none() && out_len.is_none() {
            return Err(StreamError::MissingTarget);
        }

        let limit = out.as_ref().map_or(capacity, |buf| buf.len().min(capacity));
        let len = self.line_len(limit)?;

        if let Some(slot) = out_len {
            *slot = len;
        }
        if let Some(buf) = out {
            self.read(Destination::Keep(&mut buf[..len]))?;
        }
        Ok(())
    }

    /// Consumes the next line into `buf` and returns its length, marker
    /// included.
    ///
    /// # Errors
    ///
    /// `StreamError::NoEol` if no complete line is buffered, or
    /// `StreamError::BadSize` if the line is longer than `buf`.
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<usize> {
        let len = self.line_len(buf.len())?;
        self.read(Destination::Keep(&mut buf[..len]))?;
        Ok(len)
    }

    /// Length of the next buffered line, marker included, without consuming
    /// it.
    ///
    /// # Errors
    ///
    /// `StreamError::NoEol` if no complete line is buffered, or
    /// `StreamError::BadSize` if the line is longer than `capacity`.
    pub fn line_len(&self, capacity: usize) -> Result<usize> {
        let (first, second) = self.segments();
        let Some(len) = find_eol(first, second) else {
            trace!("no end-of-line marker in {} buffered bytes", self.used);
            return Err(StreamError::NoEol);
        };
        if len > capacity {
            trace!("line of {len} bytes exceeds buffer of {capacity} bytes");
            return Err(StreamError::BadSize { line: len, capacity });
        }
        Ok(len)
    }

    /// Drains complete lines, marker included, until none is left.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines { stream: self }
    }

    /// The buffered bytes in FIFO order, as the run up to the physical end
    /// of storage followed by the wrapped run from its start. The second
    /// slice is empty unless the buffered region wraps.
    #[must_use]
    pub fn segments(&self) -> (&[u8], &[u8]) {
        let (first, second) = self.runs(self.head, self.used);
        (&self.storage[first], &self.storage[second])
    }

    /// Discards everything buffered. The storage is kept.
    pub fn clear(&mut self) {
        debug!("clearing byte stream with {} buffered bytes", self.used);
        self.head = 0;
        self.tail = 0;
        self.set_used(0);
    }

    /// Number of logical slots; indexes wrap at this value.
    #[inline]
    fn slots(&self) -> usize {
        self.capacity + 1
    }

    #[inline]
    fn advance(&self, index: usize, len: usize) -> usize {
        (index + len) % self.slots()
    }

    /// Splits `len` slots starting at `start` into the run before the
    /// wrap and the run after it.
    #[inline]
    fn runs(&self, start: usize, len: usize) -> (Range<usize>, Range<usize>) {
        let contiguous = self.slots() - start;
        if contiguous >= len {
            (start..start + len, 0..0)
        } else {
            (start..self.slots(), 0..len - contiguous)
        }
    }

    fn copy_out(&self, start: usize, out: &mut [u8]) {
        let (first, second) = self.runs(start, out.len());
        let (front, back) = out.split_at_mut(first.len());
        front.copy_from_slice(&self.storage[first]);
        back.copy_from_slice(&self.storage[second]);
    }

    fn set_used(&mut self, used: usize) {
        self.used = used;
        self.free = self.capacity - used;
        self.check_invariants();
    }

    #[inline]
    fn check_invariants(&self) {
        debug_assert!(self.used <= self.capacity, "used exceeds capacity");
        debug_assert_eq!(self.free + self.used, self.capacity);
        debug_assert!(self.head < self.slots() && self.tail < self.slots());
        debug_assert_eq!(
            (self.tail + self.slots() - self.head) % self.slots(),
            self.used,
            "head/tail distance disagrees with used count"
        );
    }
}

/// Draining iterator over complete lines. See [`ByteStream::lines`].
#[derive(Debug)]
pub struct Lines<'a> {
    stream: &'a mut ByteStream,
}

impl Iterator for Lines<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.stream.line_len(usize::MAX).ok()?;
        let mut line = vec![0; len];
        self.stream.read(Destination::Keep(&mut line)).ok()?;
        Some(line)
    }
}
