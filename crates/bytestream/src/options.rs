use log::trace;

use crate::error::{Result, StreamError};

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: u32 = 1024;

/// Largest accepted capacity; the headroom keeps the storage rounding from
/// overflowing.
pub const MAX_CAPACITY: u32 = u32::MAX - 8;

/// Configuration options for a `ByteStream`.
///
/// # Examples
///
/// ```rust
/// use bytestream::{ByteStream, StreamOptions};
///
/// let stream = ByteStream::new(StreamOptions { capacity: 256 }).unwrap();
/// assert_eq!(stream.capacity(), 256);
///
/// let stream = ByteStream::new(StreamOptions::default()).unwrap();
/// assert_eq!(stream.capacity(), 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamOptions {
    /// Number of bytes the stream can hold at once.
    ///
    /// Must be in `1..=MAX_CAPACITY`. The stream allocates slightly more
    /// than this (see [`StreamOptions::storage_len`]), but never accepts
    /// more than `capacity` buffered bytes.
    ///
    /// # Default
    ///
    /// `1024`
    pub capacity: u32,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StreamOptions {
    /// Checks the capacity bounds and returns the capacity.
    ///
    /// # Errors
    ///
    /// `StreamError::BadCapacity` if the capacity is zero or larger than
    /// `MAX_CAPACITY`.
    pub fn validate(&self) -> Result<u32> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            trace!("rejecting stream capacity {}", self.capacity);
            return Err(StreamError::BadCapacity(self.capacity));
        }
        Ok(self.capacity)
    }

    /// Physical size of the backing storage: the smallest multiple of 8
    /// strictly greater than the capacity. One of the extra slots is the
    /// guard slot separating the full and empty states; the rest are unused.
    #[must_use]
    pub fn storage_len(&self) -> usize {
        (((self.capacity >> 3) as usize) + 1) << 3
    }
}
