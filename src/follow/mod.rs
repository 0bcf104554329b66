//! Follow mode: emit data appended to files as they grow.
//!
//! Events are handled one at a time on the calling task, in the order the
//! watcher delivers them.

mod error;
mod tracker;
mod watcher;

use std::future::Future;
use std::io::{self, Write};
use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::source::ByteSource;
use crate::PROGRAM_NAME;

pub use error::FollowError;
pub use tracker::{ChangeOutcome, CursorState, FollowTracker, ReadCursor};
pub use watcher::{DirectoryWatcher, WatchEvent};

/// Why the follow loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown was requested.
    Cancelled,
    /// A watched directory became unusable.
    Invalidated(PathBuf),
    /// The event channel closed.
    ChannelClosed,
}

/// Run the follow loop until shutdown or watch invalidation.
///
/// Appended data goes to `out` and is flushed immediately. Failed reads and
/// watcher errors are reported to `err` and watching continues. An
/// invalidated watch is reported to `err` and ends the loop. Every cursor is
/// stopped when the loop ends.
///
/// # Errors
///
/// Returns an error only if writing to `out` or `err` fails.
pub async fn run<S, F, W, E>(
    tracker: &mut FollowTracker<S>,
    events: &mut mpsc::UnboundedReceiver<WatchEvent>,
    shutdown: F,
    out: &mut W,
    err: &mut E,
) -> io::Result<StopReason>
where
    S: ByteSource,
    F: Future<Output = ()>,
    W: Write,
    E: Write,
{
    tokio::pin!(shutdown);

    let reason = loop {
        tokio::select! {
            () = &mut shutdown => break StopReason::Cancelled,
            event = events.recv() => match event {
                None => break StopReason::ChannelClosed,
                Some(WatchEvent::Changed(path)) => match tracker.handle_change(&path) {
                    Ok(ChangeOutcome::Appended(text)) => {
                        out.write_all(text.as_bytes())?;
                        out.flush()?;
                    }
                    Ok(_) => {}
                    Err(e) => writeln!(err, "{PROGRAM_NAME}: {e}")?,
                },
                Some(WatchEvent::Invalidated(dir)) => {
                    tracing::warn!(dir = %dir.display(), "Watch invalidated, stopping");
                    let e = FollowError::WatchInvalidated(dir.clone());
                    writeln!(err, "{PROGRAM_NAME}: {e}")?;
                    break StopReason::Invalidated(dir);
                }
                Some(WatchEvent::Error(e)) => writeln!(err, "{PROGRAM_NAME}: {e}")?,
            },
        }
    };

    tracker.stop_all();
    tracing::debug!(reason = ?reason, "Follow loop finished");
    Ok(reason)
}
