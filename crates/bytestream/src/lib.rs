//! A fixed-capacity ring buffer for byte streams.
//!
//! `ByteStream` stages raw bytes between a producer and a consumer: bytes
//! are written at the tail, read or skipped from the head, inspected in place
//! with [`ByteStream::peek`], and pulled out a line at a time with
//! [`ByteStream::readline`]. Storage is allocated once, at construction, and
//! the stream never grows; a write that does not fit is rejected whole.
//!
//! ```rust
//! use bytestream::{ByteStream, Destination, StreamOptions};
//!
//! let mut stream = ByteStream::new(StreamOptions { capacity: 64 }).unwrap();
//! stream.write(b"foo\r\nbar").unwrap();
//!
//! let mut line = [0u8; 16];
//! let len = stream.read_line(&mut line).unwrap();
//! assert_eq!(&line[..len], b"foo\r\n");
//!
//! let mut rest = [0u8; 3];
//! stream.read(Destination::Keep(&mut rest)).unwrap();
//! assert_eq!(&rest, b"bar");
//! assert!(stream.is_empty());
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod eol;
mod error;
#[cfg(feature = "std")]
mod io;
mod options;
mod stream;

#[cfg(test)]
mod tests;

pub use eol::{Eol, find_eol, find_eol_marker};
pub use error::{Result, StreamError};
pub use options::{DEFAULT_CAPACITY, MAX_CAPACITY, StreamOptions};
pub use stream::{ByteStream, Destination, Lines, Status};
