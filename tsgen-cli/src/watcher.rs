//! File watcher for regenerating declarations on change.
//!
//! Changes to PHP sources under the input directory are debounced and
//! delivered over a channel; everything else is ignored.

use crate::error::{CliResult, WatchError};
use crate::scanner::is_source_file;
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

/// Default debounce window.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Event types for file changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A source file was created or modified.
    Modified(PathBuf),
    /// A source file was deleted.
    Deleted(PathBuf),
    /// The watcher reported an error.
    Error(String),
}

/// Watches a directory tree for PHP source changes.
pub struct FileWatcher {
    root: PathBuf,
    debounce_ms: u64,
}

impl FileWatcher {
    /// Create a new file watcher for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Start watching.
    ///
    /// The debouncer must be kept alive for as long as events are wanted.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| forward(&tx, result),
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&self.root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::Init(e.to_string()))?;

        tracing::debug!(root = %self.root.display(), debounce_ms = self.debounce_ms, "watching");
        Ok((debouncer, rx))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn forward(tx: &Sender<WatchEvent>, result: Result<Vec<DebouncedEvent>, notify::Error>) {
    match result {
        Ok(events) => {
            for event in classify(events.into_iter().map(|e| e.path)) {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        Err(e) => {
            let _ = tx.send(WatchEvent::Error(WatchError::Notify(e.to_string()).to_string()));
        }
    }
}

/// Turn changed paths into events, keeping only PHP sources.
fn classify(paths: impl IntoIterator<Item = PathBuf>) -> Vec<WatchEvent> {
    paths
        .into_iter()
        .filter(|path| is_source_file(path))
        .map(|path| {
            if path.exists() {
                WatchEvent::Modified(path)
            } else {
                WatchEvent::Deleted(path)
            }
        })
        .collect()
}

impl WatchEvent {
    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    /// Get the error message if this is an error event.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
