//! Folder change notifier built on the platform's recommended watcher.
//!
//! Change events collapse to `()` on an mpsc channel that the event loop
//! drains between input polls. Bursts of events therefore coalesce into
//! however many drains happen to observe them, each handled as one complete
//! reconciliation pass.
//!
//! Events whose paths all refer to the sidecar file are discarded: every
//! reconciliation rewrites the sidecar inside the watched folder, and
//! reporting that write back as a change would have each save trigger the
//! next reconciliation indefinitely.

use crate::error::Result;
use crate::sidecar::SIDECAR_FILE;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

fn sidecar_only(event: &Event) -> bool {
    !event.paths.is_empty()
        && event
            .paths
            .iter()
            .all(|path| path.file_name() == Some(OsStr::new(SIDECAR_FILE)))
}

/// Watches at most one folder at a time and records that something changed.
pub struct FolderWatcher {
    watcher: RecommendedWatcher,
    rx: Receiver<()>,
    watched: Option<PathBuf>,
}

impl FolderWatcher {
    /// Creates an idle watcher; call [`FolderWatcher::watch`] to point it at
    /// a folder.
    ///
    /// # Errors
    ///
    /// [`crate::error::AppError::Watch`] if the platform watcher cannot be
    /// created.
    pub fn new() -> Result<Self> {
        let (tx, rx) = channel();
        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if !sidecar_only(&event) {
                    let _ = tx.send(());
                }
            }
        })?;
        Ok(Self {
            watcher,
            rx,
            watched: None,
        })
    }

    /// Replaces the watched path: unwatch whatever was watched, then watch
    /// the given folder non-recursively.
    ///
    /// # Errors
    ///
    /// [`crate::error::AppError::Watch`] if the new folder cannot be watched.
    pub fn watch(&mut self, folder: &Path) -> Result<()> {
        self.unwatch_all();
        self.watcher.watch(folder, RecursiveMode::NonRecursive)?;
        self.watched = Some(folder.to_path_buf());
        Ok(())
    }

    /// Stops watching. Failure to unwatch a path that may no longer exist is
    /// ignored.
    pub fn unwatch_all(&mut self) {
        if let Some(path) = self.watched.take() {
            let _ = self.watcher.unwatch(&path);
        }
    }

    /// Drains pending change notifications, reporting whether any arrived
    /// since the last drain.
    pub fn drain(&mut self) -> bool {
        let mut fired = false;
        while self.rx.try_recv().is_ok() {
            fired = true;
        }
        fired
    }
}
