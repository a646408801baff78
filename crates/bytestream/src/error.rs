use thiserror::Error;

/// Result alias used by every fallible `ByteStream` operation.
pub type Result<T> = core::result::Result<T, StreamError>;

/// Errors reported by `ByteStream` operations.
///
/// A failed call never mutates the stream: head, tail and the occupancy
/// counters are exactly as they were before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// The backing storage could not be allocated.
    #[error("failed to allocate stream storage")]
    NoMemory,
    /// A write asked for more room than is free.
    #[error("insufficient space: {requested} bytes requested, {free} free")]
    NoSpace {
        /// Bytes the caller tried to write.
        requested: usize,
        /// Bytes free at the time of the call.
        free: usize,
    },
    /// A read or peek asked for more bytes than are buffered.
    #[error("insufficient data: {requested} bytes requested, {available} available")]
    NoData {
        /// Bytes the caller asked for, counted from the head.
        requested: usize,
        /// Bytes buffered at the time of the call.
        available: usize,
    },
    /// A peek started at or past the last buffered byte.
    #[error("invalid offset {offset}: only {used} bytes buffered")]
    BadOffset {
        /// Requested offset from the head.
        offset: usize,
        /// Bytes buffered at the time of the call.
        used: usize,
    },
    /// The next line does not fit the caller's buffer.
    #[error("line of {line} bytes exceeds buffer of {capacity} bytes")]
    BadSize {
        /// Length of the line including its end-of-line marker.
        line: usize,
        /// Capacity the caller offered.
        capacity: usize,
    },
    /// No end-of-line marker is buffered.
    #[error("no end-of-line marker buffered")]
    NoEol,
    /// `readline` was given neither an output buffer nor a length slot.
    #[error("readline requires an output buffer or a length slot")]
    MissingTarget,
    /// The configured capacity is zero or above `MAX_CAPACITY`.
    #[error("invalid capacity {0}")]
    BadCapacity(u32),
}

impl StreamError {
    /// Whether the caller can retry after draining, refilling or resizing
    /// its own buffer. Allocation failures and contract violations are not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::NoMemory | Self::MissingTarget | Self::BadCapacity(_)
        )
    }
}
