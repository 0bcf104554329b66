//! Tail extraction by lines or bytes.

mod bytes;
mod error;
mod lines;
mod request;
mod stream;

use std::path::Path;

use crate::source::ByteSource;

pub use bytes::tail_bytes;
pub use error::TailError;
pub use lines::{initial_window, split_lines, tail_lines, SAFETY_FACTOR};
pub use request::{ReadRequest, ReadResult, ReadStatus, TargetFile, DEFAULT_LINES};
pub use stream::tail_stream;

/// Read the tail of a source according to the request.
pub fn read_tail<S: ByteSource>(source: &mut S, path: &Path, request: ReadRequest) -> ReadResult {
    match request {
        ReadRequest::Lines(count) => tail_lines(source, path, count),
        ReadRequest::Bytes(count) => tail_bytes(source, path, count),
    }
}
