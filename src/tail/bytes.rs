//! Tail-by-bytes reader.

use std::path::Path;

use crate::source::ByteSource;

use super::error::TailError;
use super::request::ReadResult;

/// Return the last `count` bytes of a source as a single decoded unit.
///
/// A count larger than the file reads the whole file. There is no
/// estimation: one seek and one read.
pub fn tail_bytes<S: ByteSource>(source: &mut S, path: &Path, count: u64) -> ReadResult {
    last_bytes(source, path, count).into()
}

fn last_bytes<S: ByteSource>(
    source: &mut S,
    path: &Path,
    count: u64,
) -> Result<Vec<String>, TailError> {
    let size = source.size().map_err(|e| TailError::io(path, e))?;
    let take = count.min(size);
    let len = usize::try_from(take).map_err(|_| TailError::WindowTooLarge(take))?;

    let block = source
        .read_at(size - take, len)
        .map_err(|e| TailError::io(path, e))?;

    tracing::debug!(path = %path.display(), bytes = block.len(), "Read byte tail");
    Ok(vec![String::from_utf8_lossy(&block).into_owned()])
}
