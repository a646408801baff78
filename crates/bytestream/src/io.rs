//! `std::io` adapters, enabled by the `std` feature.
//!
//! Unlike the native API, these follow the short read/write conventions of
//! `std::io`: a write stores as much as fits and a read returns what is
//! buffered. A full stream accepts `Ok(0)` bytes and an empty one yields
//! `Ok(0)`.

use std::io;

use crate::{
    error::StreamError,
    stream::{ByteStream, Destination},
};

impl From<StreamError> for io::Error {
    fn from(err: StreamError) -> Self {
        let kind = match err {
            StreamError::NoMemory => io::ErrorKind::OutOfMemory,
            StreamError::NoSpace { .. } | StreamError::NoData { .. } | StreamError::NoEol => {
                io::ErrorKind::WouldBlock
            }
            StreamError::BadOffset { .. }
            | StreamError::BadSize { .. }
            | StreamError::MissingTarget
            | StreamError::BadCapacity(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

impl io::Write for ByteStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = buf.len().min(self.free());
        ByteStream::write(self, &buf[..n])?;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.len());
        ByteStream::read(self, Destination::Keep(&mut buf[..n]))?;
        Ok(n)
    }
}

impl io::BufRead for ByteStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.segments().0)
    }

    fn consume(&mut self, amt: usize) {
        let consumed = self.skip(amt.min(self.len()));
        debug_assert!(consumed.is_ok());
    }
}
