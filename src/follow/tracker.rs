//! Per-file read cursors for follow mode.

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use crate::source::ByteSource;
use crate::tail::TargetFile;

use super::error::FollowError;

/// State of a followed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorState {
    /// Waiting for changes.
    #[default]
    Active,
    /// Watch terminated; changes are ignored.
    Stopped,
}

/// What a change notification led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Path is not followed.
    Untracked,
    /// Cursor is stopped.
    Stopped,
    /// File did not grow.
    Unchanged,
    /// New content appended since the last read.
    Appended(String),
}

/// How much of a followed file has already been emitted.
///
/// Owns the file's source handle exclusively.
#[derive(Debug)]
pub struct ReadCursor<S> {
    target: TargetFile,
    source: S,
    offset: u64,
    state: CursorState,
}

impl<S: ByteSource> ReadCursor<S> {
    /// Create an active cursor positioned at the current end of file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file size cannot be read.
    pub fn at_end(target: TargetFile, mut source: S) -> io::Result<Self> {
        let offset = source.size()?;
        Ok(Self {
            target,
            source,
            offset,
            state: CursorState::Active,
        })
    }

    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn stop(&mut self) {
        self.state = CursorState::Stopped;
    }

    /// Read whatever was appended since the last read and advance.
    ///
    /// # Errors
    ///
    /// Returns [`FollowError::Truncated`] if the file shrank below the
    /// cursor, leaving the cursor untouched, or [`FollowError::Io`] if the
    /// read fails.
    pub fn read_appended(&mut self) -> Result<ChangeOutcome, FollowError> {
        if self.state == CursorState::Stopped {
            return Ok(ChangeOutcome::Stopped);
        }

        let size = self.source.size().map_err(|e| self.io_error(e))?;
        if size < self.offset {
            return Err(FollowError::Truncated {
                path: self.target.requested().to_path_buf(),
                offset: self.offset,
                size,
            });
        }
        if size == self.offset {
            return Ok(ChangeOutcome::Unchanged);
        }

        let delta = size - self.offset;
        let len = usize::try_from(delta).map_err(|_| {
            self.io_error(io::Error::new(
                io::ErrorKind::InvalidData,
                "appended data too large",
            ))
        })?;
        let block = self
            .source
            .read_at(self.offset, len)
            .map_err(|e| self.io_error(e))?;

        self.offset += block.len() as u64;
        tracing::trace!(
            path = %self.target.requested().display(),
            delta = block.len(),
            offset = self.offset,
            "Read appended data"
        );
        Ok(ChangeOutcome::Appended(
            String::from_utf8_lossy(&block).into_owned(),
        ))
    }

    fn io_error(&self, source: io::Error) -> FollowError {
        FollowError::Io {
            path: self.target.requested().to_path_buf(),
            source,
        }
    }
}

/// Registry of followed files keyed by their resolved absolute path.
#[derive(Debug)]
pub struct FollowTracker<S> {
    cursors: HashMap<PathBuf, ReadCursor<S>>,
}

impl<S> Default for FollowTracker<S> {
    fn default() -> Self {
        Self {
            cursors: HashMap::new(),
        }
    }
}

impl<S: ByteSource> FollowTracker<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start following a file from its current end.
    ///
    /// Tracking the same file twice keeps a single cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the target did not resolve or its size cannot
    /// be read.
    pub fn track(&mut self, target: TargetFile, source: S) -> Result<(), FollowError> {
        let Some(key) = target.resolved().map(Path::to_path_buf) else {
            return Err(FollowError::Io {
                path: target.requested().to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        };

        let path = target.requested().to_path_buf();
        let cursor = ReadCursor::at_end(target, source)
            .map_err(|source| FollowError::Io { path, source })?;

        tracing::debug!(key = %key.display(), offset = cursor.offset(), "Following file");
        self.cursors.insert(key, cursor);
        Ok(())
    }

    /// Handle a change notification for `path`.
    ///
    /// `path` must be absolute, as reported by the watch.
    ///
    /// # Errors
    ///
    /// Propagates [`ReadCursor::read_appended`] errors. The cursor stays
    /// active either way.
    pub fn handle_change(&mut self, path: &Path) -> Result<ChangeOutcome, FollowError> {
        match self.cursors.get_mut(path) {
            Some(cursor) => cursor.read_appended(),
            None => Ok(ChangeOutcome::Untracked),
        }
    }

    /// Stop every cursor.
    pub fn stop_all(&mut self) {
        for cursor in self.cursors.values_mut() {
            cursor.stop();
        }
    }

    #[must_use]
    pub fn cursor(&self, path: &Path) -> Option<&ReadCursor<S>> {
        self.cursors.get(path)
    }

    /// Distinct parent directories of every followed file, sorted.
    #[must_use]
    pub fn watched_dirs(&self) -> Vec<PathBuf> {
        self.cursors
            .keys()
            .filter_map(|p| p.parent().map(Path::to_path_buf))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
