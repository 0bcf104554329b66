//! Follow mode error types.

use std::path::PathBuf;

/// Errors that can occur while following files.
#[derive(thiserror::Error, Debug)]
pub enum FollowError {
    /// Followed file is now smaller than what was already emitted.
    #[error("{}: file truncated", path.display())]
    Truncated { path: PathBuf, offset: u64, size: u64 },

    /// Reading the appended bytes failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The watch on a directory is no longer usable.
    #[error("watch on {} is no longer valid", .0.display())]
    WatchInvalidated(PathBuf),

    /// Notify watcher error.
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),
}
