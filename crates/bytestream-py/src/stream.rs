use ::bytestream::{ByteStream, Destination, StreamError, DEFAULT_CAPACITY};
use pyo3::{prelude::*, types::PyBytes};

use crate::errors::stream_err;

/// Python-facing wrapper around `ByteStream`. Reads return fresh `bytes`
/// objects; errors surface as `ByteStreamError` subclasses.
#[pyclass(name = "ByteStream", module = "bytestream")]
#[derive(Debug)]
pub struct PyByteStream {
    inner: ByteStream,
}

#[pymethods]
impl PyByteStream {
    #[new]
    #[pyo3(signature = (capacity = DEFAULT_CAPACITY))]
    pub fn new(capacity: u32) -> PyResult<Self> {
        let inner = ByteStream::with_capacity(capacity).map_err(stream_err)?;
        Ok(Self { inner })
    }

    #[getter]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn write(&mut self, data: &[u8]) -> PyResult<()> {
        self.inner.write(data).map_err(stream_err)
    }

    pub fn read<'py>(&mut self, py: Python<'py>, size: usize) -> PyResult<Bound<'py, PyBytes>> {
        let available = self.inner.len();
        if size > available {
            return Err(stream_err(StreamError::NoData {
                requested: size,
                available,
            }));
        }
        let mut out = vec![0; size];
        self.inner
            .read(Destination::Keep(&mut out))
            .map_err(stream_err)?;
        Ok(PyBytes::new(py, &out))
    }

    pub fn skip(&mut self, size: usize) -> PyResult<()> {
        self.inner.skip(size).map_err(stream_err)
    }

    #[pyo3(signature = (size, offset = 0))]
    pub fn peek<'py>(
        &self,
        py: Python<'py>,
        size: usize,
        offset: usize,
    ) -> PyResult<Bound<'py, PyBytes>> {
        // An empty window runs only the offset check.
        self.inner.peek(&mut [], offset).map_err(stream_err)?;
        let available = self.inner.len();
        if size > available - offset {
            return Err(stream_err(StreamError::NoData {
                requested: offset.saturating_add(size),
                available,
            }));
        }
        let mut out = vec![0; size];
        self.inner.peek(&mut out, offset).map_err(stream_err)?;
        Ok(PyBytes::new(py, &out))
    }

    /// Consumes the next line, end-of-line marker included. `max_len`
    /// defaults to the stream capacity.
    #[pyo3(signature = (max_len = None))]
    pub fn readline<'py>(
        &mut self,
        py: Python<'py>,
        max_len: Option<usize>,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let limit = max_len.unwrap_or_else(|| self.inner.capacity());
        let len = self.inner.line_len(limit).map_err(stream_err)?;
        let mut line = vec![0; len];
        self.inner
            .read(Destination::Keep(&mut line))
            .map_err(stream_err)?;
        Ok(PyBytes::new(py, &line))
    }

    pub fn has_line(&self) -> bool {
        self.inner.line_len(usize::MAX).is_ok()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// `(capacity, free, used)`
    pub fn status(&self) -> (usize, usize, usize) {
        let status = self.inner.status();
        (status.capacity, status.free, status.used)
    }

    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    pub fn __repr__(&self) -> String {
        let status = self.inner.status();
        format!(
            "ByteStream(capacity={}, used={})",
            status.capacity, status.used
        )
    }
}
