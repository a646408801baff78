//! End-of-line detection over a possibly wrapped byte region.
//!
//! Buffered bytes may sit in two physical runs: from the head to the end of
//! storage, then from the start of storage to the tail. The scanner treats
//! the runs as one logical sequence, so a `\r` closing the first run and a
//! `\n` opening the second form a single CRLF.

/// An end-of-line marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eol {
    /// A lone carriage return, `\r`.
    Cr,
    /// A lone line feed, `\n`.
    Lf,
    /// A carriage return followed by a line feed, `\r\n`.
    CrLf,
}

impl Eol {
    /// Number of bytes the marker occupies.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            Eol::Cr | Eol::Lf => 1,
            Eol::CrLf => 2,
        }
    }

    /// The marker bytes.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Eol::Cr => b"\r",
            Eol::Lf => b"\n",
            Eol::CrLf => b"\r\n",
        }
    }
}

/// Finds the first line in `first` followed by `second`.
///
/// Returns the line length, marker included, together with the marker kind.
/// A `\r` that is the very last buffered byte counts as a `Cr` marker; the
/// scan is a snapshot and does not wait for a `\n` that may arrive later.
#[must_use]
pub fn find_eol_marker(first: &[u8], second: &[u8]) -> Option<(usize, Eol)> {
    if let Some((end, eol)) = scan(first, second.first().copied()) {
        return Some((end, eol));
    }
    scan(second, None).map(|(end, eol)| (first.len() + end, eol))
}

/// Length of the first line in `first` followed by `second`, marker
/// included. See [`find_eol_marker`].
///
/// ```rust
/// use bytestream::find_eol;
///
/// assert_eq!(find_eol(b"foo\r\nbar", b""), Some(5));
/// assert_eq!(find_eol(b"foo\r", b"\nbar"), Some(5));
/// assert_eq!(find_eol(b"foo", b"bar"), None);
/// ```
#[must_use]
pub fn find_eol(first: &[u8], second: &[u8]) -> Option<usize> {
    find_eol_marker(first, second).map(|(len, _)| len)
}

/// Scans one run. `lookahead` is the byte logically following the run, used
/// only to join a trailing `\r` with a leading `\n` of the next run.
fn scan(run: &[u8], lookahead: Option<u8>) -> Option<(usize, Eol)> {
    let at = run.iter().position(|&b| b == b'\r' || b == b'\n')?;
    if run[at] == b'\n' {
        return Some((at + 1, Eol::Lf));
    }
    let next = run.get(at + 1).copied().or(lookahead);
    if next == Some(b'\n') {
        Some((at + 2, Eol::CrLf))
    } else {
        Some((at + 1, Eol::Cr))
    }
}
