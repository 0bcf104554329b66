//! Tail error types.

use std::path::PathBuf;

/// Errors that can occur while reading the tail of a file.
#[derive(thiserror::Error, Debug)]
pub enum TailError {
    /// Target file does not exist.
    #[error("{}: No such file or directory", .0.display())]
    NotFound(PathBuf),

    /// Seek, read or size query failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Requested window does not fit in memory on this platform.
    #[error("window of {0} bytes is too large")]
    WindowTooLarge(u64),
}

impl TailError {
    /// Attach a path to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
