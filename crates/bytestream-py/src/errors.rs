use ::bytestream::StreamError;
use pyo3::{
    create_exception,
    exceptions::{PyException, PyMemoryError, PyValueError},
    PyErr,
};

create_exception!(bytestream, ByteStreamError, PyException);
create_exception!(bytestream, NoSpaceError, ByteStreamError);
create_exception!(bytestream, NoDataError, ByteStreamError);
create_exception!(bytestream, BadOffsetError, ByteStreamError);
create_exception!(bytestream, BadSizeError, ByteStreamError);
create_exception!(bytestream, NoEolError, ByteStreamError);

/// Maps a stream error onto the matching Python exception.
pub fn stream_err(err: StreamError) -> PyErr {
    let msg = err.to_string();
    match err {
        StreamError::NoMemory => PyMemoryError::new_err(msg),
        StreamError::NoSpace { .. } => NoSpaceError::new_err(msg),
        StreamError::NoData { .. } => NoDataError::new_err(msg),
        StreamError::BadOffset { .. } => BadOffsetError::new_err(msg),
        StreamError::BadSize { .. } => BadSizeError::new_err(msg),
        StreamError::NoEol => NoEolError::new_err(msg),
        StreamError::MissingTarget | StreamError::BadCapacity(_) => PyValueError::new_err(msg),
    }
}
