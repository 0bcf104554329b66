//! Multi-file orchestration: headers, per-file reads and the aggregate status.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::source::SourceOpener;
use crate::tail::{read_tail, ReadRequest, ReadResult, ReadStatus, TailError, TargetFile};
use crate::PROGRAM_NAME;

/// Options for one batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    pub request: ReadRequest,
    /// Suppress headers and separators.
    pub quiet: bool,
    /// Keep source handles for follow mode.
    pub follow: bool,
}

/// Result of a batch run.
#[derive(Debug)]
pub struct BatchReport<S> {
    /// Aggregate status; failure if any file failed.
    pub status: ReadStatus,
    /// Open handles of successfully read files, in request order. Empty
    /// unless following.
    pub followed: Vec<(TargetFile, S)>,
}

/// Tails a list of files in order and prints their output.
#[derive(Debug)]
pub struct Orchestrator<'a, O> {
    opener: &'a O,
    options: BatchOptions,
}

impl<'a, O: SourceOpener> Orchestrator<'a, O> {
    #[must_use]
    pub fn new(opener: &'a O, options: BatchOptions) -> Self {
        Self { opener, options }
    }

    /// Tail every path, in order, writing output to `out` and errors to `err`.
    ///
    /// A missing or unreadable file makes the aggregate status a failure but
    /// never stops the batch.
    ///
    /// # Errors
    ///
    /// Returns an error only if writing to `out` or `err` fails.
    pub fn run<W: Write, E: Write>(
        &self,
        paths: &[PathBuf],
        out: &mut W,
        err: &mut E,
    ) -> io::Result<BatchReport<O::Source>> {
        let mut status = ReadStatus::Success;
        let mut followed = Vec::new();
        let show_headers = paths.len() != 1 && !self.options.quiet;

        for (i, path) in paths.iter().enumerate() {
            let target = match TargetFile::resolve(self.opener, path.clone()) {
                Ok(t) if t.exists() => t,
                Ok(_) => {
                    report(err, &TailError::NotFound(path.clone()))?;
                    status = ReadStatus::Failure;
                    continue;
                }
                Err(e) => {
                    report(err, &e)?;
                    status = ReadStatus::Failure;
                    continue;
                }
            };

            if show_headers {
                writeln!(out, "==> {} <==", path.display())?;
            }

            let (result, source) = match self.opener.open(path) {
                Ok(mut source) => {
                    let result = read_tail(&mut source, path, self.options.request);
                    (result, Some(source))
                }
                Err(e) => (ReadResult::failure(TailError::io(path.clone(), e)), None),
            };

            for unit in &result.units {
                writeln!(out, "{unit}")?;
            }
            if let Some(e) = &result.error {
                report(err, e)?;
            }
            status = status.and(result.status());

            tracing::debug!(
                path = %path.display(),
                units = result.units.len(),
                status = ?result.status(),
                "Tailed file"
            );

            if self.options.follow && result.status() == ReadStatus::Success {
                if let Some(source) = source {
                    followed.push((target, source));
                }
            }

            if i != paths.len() - 1 && !self.options.quiet {
                writeln!(out)?;
            }
        }

        out.flush()?;
        Ok(BatchReport { status, followed })
    }
}

fn report<E: Write>(err: &mut E, error: &TailError) -> io::Result<()> {
    writeln!(err, "{PROGRAM_NAME}: {error}")
}
