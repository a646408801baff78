mod errors;
mod stream;

pub use errors::{
    stream_err, BadOffsetError, BadSizeError, ByteStreamError, NoDataError, NoEolError,
    NoSpaceError,
};
pub use stream::PyByteStream;

use pyo3::prelude::*;

#[pymodule]
pub fn bytestream(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_class::<PyByteStream>()?;
    m.add("ByteStreamError", py.get_type::<ByteStreamError>())?;
    m.add("NoSpaceError", py.get_type::<NoSpaceError>())?;
    m.add("NoDataError", py.get_type::<NoDataError>())?;
    m.add("BadOffsetError", py.get_type::<BadOffsetError>())?;
    m.add("BadSizeError", py.get_type::<BadSizeError>())?;
    m.add("NoEolError", py.get_type::<NoEolError>())?;
    m.add("DEFAULT_CAPACITY", ::bytestream::DEFAULT_CAPACITY)?;
    Ok(())
}
