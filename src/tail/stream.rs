//! Tail of a non-seekable stream such as standard input.
//!
//! A stream cannot be read backwards, so it is consumed to end of input
//! while only the trailing lines (or bytes) are retained.

use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;

use super::error::TailError;
use super::request::{ReadRequest, ReadResult};

const CHUNK_SIZE: usize = 8 * 1024;

/// Read a stream to end of input and keep its tail.
///
/// `label` names the stream in errors.
pub fn tail_stream<R: BufRead>(reader: R, label: &Path, request: ReadRequest) -> ReadResult {
    let result = match request {
        ReadRequest::Lines(count) => stream_lines(reader, count.max(1)),
        ReadRequest::Bytes(count) => stream_bytes(reader, count),
    };
    result.map_err(|e| TailError::io(label, e)).into()
}

fn stream_lines<R: BufRead>(reader: R, count: usize) -> std::io::Result<Vec<String>> {
    let mut kept: VecDeque<String> = VecDeque::with_capacity(count);

    for line in reader.split(b'\n') {
        let mut line = String::from_utf8_lossy(&line?).into_owned();
        if line.ends_with('\r') {
            line.pop();
        }
        if kept.len() == count {
            kept.pop_front();
        }
        kept.push_back(line);
    }

    Ok(kept.into())
}

fn stream_bytes<R: BufRead>(mut reader: R, count: u64) -> std::io::Result<Vec<String>> {
    let limit = usize::try_from(count).unwrap_or(usize::MAX);
    let mut kept: VecDeque<u8> = VecDeque::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        kept.extend(&chunk[..n]);
        if kept.len() > limit {
            kept.drain(..kept.len() - limit);
        }
    }

    let bytes: Vec<u8> = kept.into();
    Ok(vec![String::from_utf8_lossy(&bytes).into_owned()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tail::ReadStatus;
    use std::io::Cursor;

    const SIX_LINES: &str = "aaa\nbbbb\nccccc\ndddddd\nfffffff\ngggggggg\n";

    #[test]
    fn test_stream_last_lines() {
        let result = tail_stream(Cursor::new(SIX_LINES), Path::new("-"), ReadRequest::Lines(2));
        assert_eq!(result.units, vec!["fffffff", "gggggggg"]);
        assert_eq!(result.status(), ReadStatus::Success);
    }

    #[test]
    fn test_stream_fewer_lines() {
        let result = tail_stream(Cursor::new("a\r\nb"), Path::new("-"), ReadRequest::Lines(10));
        assert_eq!(result.units, vec!["a", "b"]);
    }

    #[test]
    fn test_stream_bytes() {
        let result = tail_stream(Cursor::new(SIX_LINES), Path::new("-"), ReadRequest::Bytes(12));
        assert_eq!(result.units, vec!["ff\ngggggggg\n"]);
    }

    #[test]
    fn test_stream_bytes_larger_than_chunk() {
        let input = "x".repeat(CHUNK_SIZE * 3) + "tail";
        let result = tail_stream(Cursor::new(input), Path::new("-"), ReadRequest::Bytes(4));
        assert_eq!(result.units, vec!["tail"]);
    }

    #[test]
    fn test_stream_empty_input() {
        let result = tail_stream(Cursor::new(""), Path::new("-"), ReadRequest::Lines(3));
        assert!(result.units.is_empty());
        assert_eq!(result.status(), ReadStatus::Success);
    }
}
