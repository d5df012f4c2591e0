//! The session coordinates one open folder: store, watcher, reconciliation.
//!
//! Folder selection produces a path, the store loads its grouping, the
//! watcher is repointed, and an initial reconciliation pass picks up drift
//! between what the sidecar recorded and what exists on disk. Navigating back
//! discards the document from memory only; disk state is untouched.

use crate::error::{AppError, Result};
use crate::fileops::{self, FileEntry};
use crate::reconcile::{self, ReconcileOutcome};
use crate::store::GroupingStore;
use crate::watcher::FolderWatcher;
use std::collections::BTreeSet;
use std::path::Path;

/// Holds the at-most-one active folder session.
pub struct SessionController {
    watcher: FolderWatcher,
    store: Option<GroupingStore>,
    show_hidden: bool,
}

impl SessionController {
    /// Creates a controller with no folder open.
    ///
    /// # Errors
    ///
    /// [`AppError::Watch`] if the platform change notifier cannot be created.
    pub fn new(show_hidden: bool) -> Result<Self> {
        Ok(Self {
            watcher: FolderWatcher::new()?,
            store: None,
            show_hidden,
        })
    }

    /// Opens a folder: loads (or synthesizes) its grouping, repoints the
    /// watcher, and runs the initial reconciliation pass. Replaces any
    /// previously open folder.
    ///
    /// # Errors
    ///
    /// Load, watch, or initial-save failures. When only the initial
    /// reconciliation save fails the folder stays open with a valid in-memory
    /// document; any later edit retries the write.
    pub fn open_folder(&mut self, folder: &Path) -> Result<()> {
        let store = GroupingStore::load(folder.to_path_buf(), self.show_hidden)?;
        self.watcher.watch(store.folder())?;
        self.store = Some(store);
        self.refresh()?;
        Ok(())
    }

    /// Discards the in-memory document and stops watching. Disk state is left
    /// as of the last save.
    pub fn close_folder(&mut self) {
        self.store = None;
        self.watcher.unwatch_all();
    }

    /// The active store, if a folder is open.
    #[must_use]
    pub fn store(&self) -> Option<&GroupingStore> {
        self.store.as_ref()
    }

    /// Mutable access to the active store, if a folder is open.
    pub fn store_mut(&mut self) -> Option<&mut GroupingStore> {
        self.store.as_mut()
    }

    /// Drains the change notifier and, if anything fired, snapshots the
    /// directory listing and reconciles. Returns `None` when nothing fired or
    /// no folder is open.
    ///
    /// # Errors
    ///
    /// Listing or save failures from the reconciliation pass.
    pub fn poll(&mut self) -> Result<Option<ReconcileOutcome>> {
        if self.store.is_none() || !self.watcher.drain() {
            return Ok(None);
        }
        self.refresh().map(Some)
    }

    /// Snapshots the directory listing and reconciles unconditionally.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] when no folder is open; listing failures
    /// (e.g. the folder was deleted); save failures after the delta applied.
    pub fn refresh(&mut self) -> Result<ReconcileOutcome> {
        let show_hidden = self.show_hidden;
        let store = self
            .store
            .as_mut()
            .ok_or_else(|| AppError::invalid("no folder open"))?;
        let listing = fileops::list_files(store.folder(), show_hidden)?;
        let live: BTreeSet<String> = listing.into_iter().collect();
        reconcile::reconcile(store, &live)
    }

    /// Opens a managed file with the OS default handler, fire-and-forget.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] when no folder is open or the name is not a
    /// known entry.
    pub fn open_entry(&self, name: &str) -> Result<()> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| AppError::invalid("no folder open"))?;
        if !store.document().contains_file(name) {
            return Err(AppError::invalid(format!("no entry named {name}")));
        }
        let entry = FileEntry::new(store.folder(), name);
        fileops::open_with_default(&entry.absolute_path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session.rs"]
mod tests;
