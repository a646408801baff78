use alloc::vec;

use rstest::rstest;

use crate::{ByteStream, Destination, Status, StreamError};

fn stream(capacity: u32) -> ByteStream {
    ByteStream::with_capacity(capacity).unwrap()
}

fn status(capacity: usize, free: usize, used: usize) -> Status {
    Status {
        capacity,
        free,
        used,
    }
}

#[test]
fn write_exactly_free_then_one_more() {
    let mut s = stream(10);
    s.write(b"abc").unwrap();
    s.write(&[7; 7]).unwrap();
    assert_eq!(s.status(), status(10, 0, 10));

    s.skip(1).unwrap();
    assert_eq!(
        s.write(b"xy"),
        Err(StreamError::NoSpace {
            requested: 2,
            free: 1
        })
    );
    assert_eq!(s.status(), status(10, 1, 9));
}

#[test]
fn zero_sized_operations_are_noops() {
    let mut s = stream(4);
    s.write(b"").unwrap();
    s.read(Destination::Keep(&mut [])).unwrap();
    s.read(Destination::Discard(0)).unwrap();
    assert_eq!(s.status(), status(4, 4, 0));

    s.write(b"ab").unwrap();
    s.peek(&mut [], 1).unwrap();
    assert_eq!(s.status(), status(4, 2, 2));
}

#[rstest]
#[case(0, 0)]
#[case(3, 0)]
#[case(3, 5)]
fn peek_at_used_is_bad_offset(#[case] used: usize, #[case] extra: usize) {
    let mut s = stream(8);
    s.write(&vec![b'x'; used]).unwrap();
    let mut out = vec![0; extra];
    assert_eq!(
        s.peek(&mut out, used),
        Err(StreamError::BadOffset { offset: used, used })
    );
}

#[test]
fn read_and_peek_past_used_is_no_data() {
    let mut s = stream(8);
    s.write(b"abcd").unwrap();

    let mut out = [0u8; 5];
    assert_eq!(
        s.read(Destination::Keep(&mut out)),
        Err(StreamError::NoData {
            requested: 5,
            available: 4
        })
    );
    assert_eq!(
        s.read(Destination::Discard(5)),
        Err(StreamError::NoData {
            requested: 5,
            available: 4
        })
    );
    assert_eq!(
        s.peek(&mut out[..3], 2),
        Err(StreamError::NoData {
            requested: 5,
            available: 4
        })
    );
    assert_eq!(s.status(), status(8, 4, 4));
}

#[test]
fn discard_skips_without_copy() {
    let mut s = stream(8);
    s.write(b"headbody").unwrap();
    s.read(Destination::Discard(4)).unwrap();
    let mut out = [0u8; 4];
    s.read(Destination::Keep(&mut out)).unwrap();
    assert_eq!(&out, b"body");
}

#[test]
fn wraparound_write_read_write() {
    let mut s = stream(8);
    s.write(b"012345").unwrap();
    let mut head = [0u8; 4];
    s.read(Destination::Keep(&mut head)).unwrap();
    assert_eq!(&head, b"0123");

    s.write(b"abcdef").unwrap();
    let mut out = [0u8; 8];
    s.read(Destination::Keep(&mut out)).unwrap();
    assert_eq!(&out, b"45abcdef");
}

#[test]
fn readline_leaves_remainder() {
    let mut s = stream(64);
    s.write(b"foo\r\nbar").unwrap();

    let mut line = [0u8; 64];
    let mut len = 0;
    s.readline(Some(&mut line), 64, Some(&mut len)).unwrap();
    assert_eq!(len, 5);
    assert_eq!(&line[..len], b"foo\r\n");
    assert_eq!(s.status(), status(64, 61, 3));

    let mut rest = [0u8; 3];
    s.peek(&mut rest, 0).unwrap();
    assert_eq!(&rest, b"bar");
}

#[test]
fn readline_split_crlf() {
    // Capacity 8 gives 9 slots; a head at 6 puts "ab\r" in slots 6..9 and
    // "\n" in slot 0.
    let mut s = stream(8);
    s.write(b"123456").unwrap();
    s.skip(6).unwrap();
    s.write(b"ab\r\nz").unwrap();

    let (first, second) = s.segments();
    assert_eq!(first, b"ab\r");
    assert_eq!(second, b"\nz");

    let mut line = [0u8; 8];
    assert_eq!(s.read_line(&mut line), Ok(4));
    assert_eq!(&line[..4], b"ab\r\n");
    assert_eq!(s.read_line(&mut line), Err(StreamError::NoEol));
    assert_eq!(s.len(), 1);
}

#[test]
fn readline_without_marker() {
    let mut s = stream(32);
    s.write(b"incomplete").unwrap();
    let mut line = [0u8; 32];
    let mut len = 0;
    assert_eq!(
        s.readline(Some(&mut line), 32, Some(&mut len)),
        Err(StreamError::NoEol)
    );
    assert_eq!(len, 0);
    assert_eq!(s.status(), status(32, 22, 10));
}

#[test]
fn readline_on_empty_stream_is_no_eol() {
    let mut s = stream(4);
    let mut len = 0;
    assert_eq!(s.readline(None, 4, Some(&mut len)), Err(StreamError::NoEol));
}

#[test]
fn readline_line_too_long() {
    let mut s = stream(32);
    s.write(b"a long line\n").unwrap();

    let mut small = [0u8; 4];
    assert_eq!(
        s.readline(Some(&mut small), 32, None),
        Err(StreamError::BadSize {
            line: 12,
            capacity: 4
        })
    );
    let mut len = 0;
    assert_eq!(
        s.readline(None, 11, Some(&mut len)),
        Err(StreamError::BadSize {
            line: 12,
            capacity: 11
        })
    );
    assert_eq!(s.len(), 12);

    // Recover by discarding the line whole.
    s.readline(None, usize::MAX, Some(&mut len)).unwrap();
    s.skip(len).unwrap();
    assert!(s.is_empty());
}

#[test]
fn readline_probe_leaves_stream() {
    let mut s = stream(16);
    s.write(b"one\ntwo\r").unwrap();

    let mut len = 0;
    s.readline(None, 16, Some(&mut len)).unwrap();
    assert_eq!(len, 4);
    s.readline(None, 16, Some(&mut len)).unwrap();
    assert_eq!(len, 4);
    assert_eq!(s.status(), status(16, 8, 8));
}

#[test]
fn readline_requires_a_target() {
    let mut s = stream(16);
    s.write(b"line\n").unwrap();
    assert_eq!(s.readline(None, 16, None), Err(StreamError::MissingTarget));
    assert_eq!(s.len(), 5);
}

const NO_LINES: &[&[u8]] = &[];

#[rstest]
#[case(b"a\rb\nc\r\nd", &[&b"a\r"[..], b"b\n", b"c\r\n"], b"d")]
#[case(b"\n\n\r\r", &[&b"\n"[..], b"\n", b"\r", b"\r"], b"")]
#[case(b"no eol", NO_LINES, b"no eol")]
fn lines_drain_complete_lines(
    #[case] input: &[u8],
    #[case] expected: &[&[u8]],
    #[case] remainder: &[u8],
) {
    let mut s = stream(32);
    s.write(input).unwrap();
    let lines: alloc::vec::Vec<_> = s.lines().collect();
    assert_eq!(lines, expected);

    let mut rest = vec![0; s.len()];
    s.read(Destination::Keep(&mut rest)).unwrap();
    assert_eq!(rest, remainder);
}

#[test]
fn clear_after_activity() {
    let mut s = stream(8);
    s.write(b"abcdef").unwrap();
    s.skip(5).unwrap();
    s.write(b"ghij").unwrap();
    s.clear();
    assert_eq!(s.status(), status(8, 8, 0));
    assert_eq!(s.segments(), (&b""[..], &b""[..]));

    s.write(b"fresh").unwrap();
    let mut out = [0u8; 5];
    s.read(Destination::Keep(&mut out)).unwrap();
    assert_eq!(&out, b"fresh");
}
