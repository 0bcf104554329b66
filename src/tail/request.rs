//! Tail request and result types.

use std::io;
use std::path::{Path, PathBuf};

use crate::source::SourceOpener;

use super::error::TailError;

/// Default number of lines shown.
pub const DEFAULT_LINES: usize = 10;

/// One file to tail, as requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    /// Path exactly as the caller supplied it.
    requested: PathBuf,
    /// Stable absolute path, `None` if the file did not exist.
    resolved: Option<PathBuf>,
}

impl TargetFile {
    /// Resolve a requested path through the given opener.
    ///
    /// A missing file yields a target with no resolved path rather than an
    /// error, so the batch can report it and move on.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails for any reason other than the
    /// file not existing.
    pub fn resolve<O: SourceOpener>(opener: &O, path: impl Into<PathBuf>) -> Result<Self, TailError> {
        let requested = path.into();
        let resolved = match opener.resolve(&requested) {
            Ok(abs) => Some(abs),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(TailError::io(requested, e)),
        };
        Ok(Self {
            requested,
            resolved,
        })
    }

    /// Path as given by the caller.
    #[must_use]
    pub fn requested(&self) -> &Path {
        &self.requested
    }

    /// Stable absolute path used as the follow-mode key.
    #[must_use]
    pub fn resolved(&self) -> Option<&Path> {
        self.resolved.as_deref()
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.resolved.is_some()
    }
}

/// What part of a file to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadRequest {
    /// Last `N` lines, `N >= 1`.
    Lines(usize),
    /// Last `B` bytes.
    Bytes(u64),
}

impl ReadRequest {
    /// Build a request from optional line and byte counts.
    ///
    /// A byte count takes precedence over a line count.
    #[must_use]
    pub fn from_counts(lines: Option<usize>, bytes: Option<u64>) -> Self {
        match (bytes, lines) {
            (Some(b), _) => Self::Bytes(b),
            (None, Some(n)) => Self::Lines(n.max(1)),
            (None, None) => Self::Lines(DEFAULT_LINES),
        }
    }
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self::Lines(DEFAULT_LINES)
    }
}

/// Outcome status of a single read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    Success,
    Failure,
}

impl ReadStatus {
    /// Process exit code for this status.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    /// Combine two statuses; failure wins.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        if self == Self::Failure || other == Self::Failure {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

/// Output of one tail read.
///
/// In line mode each unit is a line without its terminator; in byte mode
/// there is exactly one unit holding the decoded chunk.
#[derive(Debug)]
pub struct ReadResult {
    pub units: Vec<String>,
    pub error: Option<TailError>,
}

impl ReadResult {
    #[must_use]
    pub fn success(units: Vec<String>) -> Self {
        Self { units, error: None }
    }

    #[must_use]
    pub fn failure(error: TailError) -> Self {
        Self {
            units: Vec::new(),
            error: Some(error),
        }
    }

    #[must_use]
    pub fn status(&self) -> ReadStatus {
        if self.error.is_some() {
            ReadStatus::Failure
        } else {
            ReadStatus::Success
        }
    }
}

impl From<Result<Vec<String>, TailError>> for ReadResult {
    fn from(result: Result<Vec<String>, TailError>) -> Self {
        match result {
            Ok(units) => Self::success(units),
            Err(e) => Self::failure(e),
        }
    }
}
