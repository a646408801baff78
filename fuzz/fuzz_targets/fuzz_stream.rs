#![no_main]
use std::collections::VecDeque;

use arbitrary::Arbitrary;
use bytestream::{ByteStream, Destination, StreamError, find_eol};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Write(Vec<u8>),
    Read(u16),
    Discard(u16),
    Peek { offset: u16, len: u16 },
    ReadLine { capacity: u16 },
    ProbeLine { capacity: u16 },
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Session {
    capacity: u16,
    ops: Vec<Op>,
}

/// Runs the session against a `VecDeque<u8>` model, panicking on the first
/// divergence.
fn run(session: Session) {
    let capacity = u32::from(session.capacity % 512) + 1;
    let mut stream = ByteStream::with_capacity(capacity).unwrap();
    let capacity = capacity as usize;
    let mut model: VecDeque<u8> = VecDeque::new();

    for op in session.ops {
        let before = stream.status();
        match op {
            Op::Write(data) => match stream.write(&data) {
                Ok(()) => model.extend(&data),
                Err(StreamError::NoSpace { .. }) => {
                    assert!(capacity - model.len() < data.len());
                    assert_eq!(stream.status(), before);
                }
                Err(err) => panic!("write failed with {err:?}"),
            },
            Op::Read(n) => {
                let mut out = vec![0; usize::from(n)];
                match stream.read(Destination::Keep(&mut out)) {
                    Ok(()) => {
                        let expected: Vec<u8> = model.drain(..out.len()).collect();
                        assert_eq!(out, expected);
                    }
                    Err(StreamError::NoData { .. }) => assert!(model.len() < out.len()),
                    Err(err) => panic!("read failed with {err:?}"),
                }
            }
            Op::Discard(n) => match stream.read(Destination::Discard(usize::from(n))) {
                Ok(()) => {
                    model.drain(..usize::from(n));
                }
                Err(StreamError::NoData { .. }) => assert!(model.len() < usize::from(n)),
                Err(err) => panic!("discard failed with {err:?}"),
            },
            Op::Peek { offset, len } => {
                let (offset, len) = (usize::from(offset), usize::from(len));
                let mut out = vec![0; len];
                match stream.peek(&mut out, offset) {
                    Ok(()) => {
                        let expected: Vec<u8> =
                            model.range(offset..offset + len).copied().collect();
                        assert_eq!(out, expected);
                    }
                    Err(StreamError::BadOffset { .. }) => assert!(offset >= model.len()),
                    Err(StreamError::NoData { .. }) => assert!(offset + len > model.len()),
                    Err(err) => panic!("peek failed with {err:?}"),
                }
                assert_eq!(stream.status(), before);
            }
            Op::ReadLine { capacity: limit } => {
                let mut line = vec![0; usize::from(limit)];
                let expected = find_eol(model.make_contiguous(), &[]);
                match stream.read_line(&mut line) {
                    Ok(len) => {
                        assert_eq!(Some(len), expected);
                        let drained: Vec<u8> = model.drain(..len).collect();
                        assert_eq!(line[..len], drained[..]);
                    }
                    Err(StreamError::NoEol) => assert_eq!(expected, None),
                    Err(StreamError::BadSize { line, .. }) => {
                        assert_eq!(Some(line), expected);
                        assert!(line > usize::from(limit));
                    }
                    Err(err) => panic!("readline failed with {err:?}"),
                }
            }
            Op::ProbeLine { capacity: limit } => {
                let mut len = 0;
                let probed = stream.readline(None, usize::from(limit), Some(&mut len));
                let expected = find_eol(model.make_contiguous(), &[]);
                match probed {
                    Ok(()) => assert_eq!(Some(len), expected),
                    Err(StreamError::NoEol) => assert_eq!(expected, None),
                    Err(StreamError::BadSize { line, capacity }) => {
                        assert_eq!(Some(line), expected);
                        assert_eq!(capacity, usize::from(limit));
                        assert!(line > capacity);
                    }
                    Err(err) => panic!("probe failed with {err:?}"),
                }
                assert_eq!(stream.status(), before);
            }
            Op::Clear => {
                stream.clear();
                model.clear();
            }
        }

        let status = stream.status();
        assert_eq!(status.used, model.len());
        assert_eq!(status.free + status.used, capacity);
        let (first, second) = stream.segments();
        let (m_first, m_second) = model.as_slices();
        assert!(first.iter().chain(second).eq(m_first.iter().chain(m_second)));
    }
}

fuzz_target!(|session: Session| run(session));
