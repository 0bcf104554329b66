//! Directory watcher with notify integration.
//!
//! Watches the parent directories of followed files and forwards change
//! notifications, unbuffered and in delivery order, into a tokio channel.

use std::path::PathBuf;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::error::FollowError;

/// Events delivered to the follow loop.
#[derive(Debug)]
pub enum WatchEvent {
    /// Content or metadata of a path changed.
    Changed(PathBuf),
    /// A watched directory went away.
    Invalidated(PathBuf),
    /// The watcher reported an error.
    Error(FollowError),
}

/// Watches a set of directories for file changes.
///
/// Dropping the watcher ends the watch and closes the event channel.
pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
}

impl DirectoryWatcher {
    /// Start watching the given directories, non-recursively.
    ///
    /// Returns the watcher and a receiver for its events.
    ///
    /// # Errors
    ///
    /// Returns an error if the watcher cannot be created or a directory
    /// cannot be registered.
    pub fn new(
        dirs: Vec<PathBuf>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<WatchEvent>), FollowError> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let watched = dirs.clone();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            for event in translate(result, &watched) {
                // Receiver gone means the follow loop has finished.
                let _ = event_tx.send(event);
            }
        })?;

        for dir in &dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
            tracing::debug!(dir = %dir.display(), "Watching directory");
        }

        Ok((Self { _watcher: watcher }, event_rx))
    }
}

/// Map a raw notify result to follow loop events.
fn translate(result: notify::Result<Event>, watched: &[PathBuf]) -> Vec<WatchEvent> {
    let event = match result {
        Ok(event) => event,
        Err(e) => return vec![WatchEvent::Error(FollowError::Notify(e))],
    };

    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => {
            event.paths.into_iter().map(WatchEvent::Changed).collect()
        }
        EventKind::Remove(_) => event
            .paths
            .into_iter()
            .filter(|p| watched.contains(p))
            .map(WatchEvent::Invalidated)
            .collect(),
        _ => Vec::new(),
    }
}
