//! Line splitting and the tail-by-lines window estimator.
//!
//! The estimator never reads a file from the start except for the short
//! scan of its first `N` lines. It reads a window anchored at end of file
//! and grows it until the window provably holds the last `N` complete lines.

use std::io;
use std::path::Path;

use crate::source::ByteSource;

use super::error::TailError;
use super::request::ReadResult;

/// Margin applied to the initial window size.
pub const SAFETY_FACTOR: u64 = 2;

/// Decode a block as text and split it into lines.
///
/// `\n` separates lines and a trailing `\r` is dropped from each. A final
/// line without a terminator is still a line; a trailing terminator does not
/// produce an empty last line. Invalid UTF-8 is replaced, not rejected.
#[must_use]
pub fn split_lines(block: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(block)
        .lines()
        .map(str::to_owned)
        .collect()
}

/// Estimate the initial window size for the last `count` lines.
///
/// Takes the longest of the first `count` lines (plus one byte for its
/// terminator), multiplies by `count` and then by [`SAFETY_FACTOR`].
///
/// # Errors
///
/// Returns an error if the line stream fails.
pub fn initial_window<S: ByteSource>(source: &mut S, count: usize) -> io::Result<u64> {
    let mut longest: u64 = 0;
    for line in source.head_lines()?.take(count) {
        longest = longest.max(line?.len() as u64 + 1);
    }

    Ok(longest
        .saturating_mul(count as u64)
        .saturating_mul(SAFETY_FACTOR))
}

/// Return the last `count` lines of a source.
///
/// Fewer lines are returned when the file has fewer. Any I/O failure yields
/// an empty result with failure status; `path` only labels the error.
pub fn tail_lines<S: ByteSource>(source: &mut S, path: &Path, count: usize) -> ReadResult {
    last_lines(source, path, count.max(1)).into()
}

fn last_lines<S: ByteSource>(
    source: &mut S,
    path: &Path,
    count: usize,
) -> Result<Vec<String>, TailError> {
    let io_err = |e: io::Error| TailError::io(path, e);

    let file_size = source.size().map_err(io_err)?;
    if file_size == 0 {
        return Ok(Vec::new());
    }

    let mut window = initial_window(source, count).map_err(io_err)?.max(1);

    let mut coefficient: u64 = 1;
    loop {
        let whole_file = window >= file_size;
        let candidate = if whole_file { file_size } else { window };

        let len = usize::try_from(candidate).map_err(|_| TailError::WindowTooLarge(candidate))?;
        let block = source.read_at(file_size - candidate, len).map_err(io_err)?;

        let mut captured = split_lines(&block);
        let total = captured.len();
        let shown = captured.split_off(total.saturating_sub(count));

        // An exact catch may start with a fragment of a longer line.
        if whole_file || total > shown.len() {
            tracing::debug!(
                path = %path.display(),
                window = candidate,
                coefficient,
                lines = shown.len(),
                "Tail window sufficient"
            );
            return Ok(shown);
        }

        tracing::trace!(
            path = %path.display(),
            window = candidate,
            captured = total,
            "Tail window too small, growing"
        );
        coefficient += 1;
        window = window.saturating_mul(coefficient);
    }
}
