//! The grouping store: owns the one active document for a folder and the
//! persistence contract with its sidecar file.
//!
//! Every user-driven mutation notifies subscribers and then rewrites the
//! sidecar in full. Write amplification is accepted; the document is expected
//! to stay at dozens to low hundreds of files. A failed write is returned to
//! the caller with the in-memory document left intact, so the next edit
//! retries it.

use crate::document::{GroupingDocument, SectionId, DEFAULT_HEADER, NEW_HEADER};
use crate::error::{AppError, Result};
use crate::fileops;
use crate::sidecar::{self, SIDECAR_FILE};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads, mutates, and persists the grouping document for exactly one folder.
pub struct GroupingStore {
    folder: PathBuf,
    doc: GroupingDocument,
    observers: Vec<Box<dyn Fn()>>,
}

impl GroupingStore {
    /// Loads the grouping for a folder.
    ///
    /// If the sidecar file is absent, unreadable, or fails schema validation,
    /// the store falls back to a single default section holding the folder's
    /// files in enumeration order and persists that document immediately so
    /// the fallback is durable. Files recorded in the sidecar but no longer on
    /// disk are silently dropped from their section.
    ///
    /// # Errors
    ///
    /// Propagates directory enumeration failures, and [`AppError::Write`] if
    /// the synthesized fallback document cannot be persisted.
    pub fn load(folder: PathBuf, show_hidden: bool) -> Result<Self> {
        let listing = fileops::list_files(&folder, show_hidden)?;
        let parsed = fs::read_to_string(folder.join(SIDECAR_FILE))
            .ok()
            .and_then(|text| sidecar::decode(&text).ok());
        if let Some(raw) = parsed {
            let on_disk: BTreeSet<&str> = listing.iter().map(String::as_str).collect();
            let sections = raw
                .into_iter()
                .map(|(header, files)| {
                    let kept = files
                        .into_iter()
                        .filter(|name| on_disk.contains(name.as_str()))
                        .collect();
                    (header, kept)
                })
                .collect();
            Ok(Self {
                folder,
                doc: GroupingDocument::from_sections(sections),
                observers: Vec::new(),
            })
        } else {
            let store = Self {
                folder,
                doc: GroupingDocument::new(DEFAULT_HEADER, listing),
                observers: Vec::new(),
            };
            store.save()?;
            Ok(store)
        }
    }

    /// Folder this store manages.
    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Read access to the owned document.
    #[must_use]
    pub fn document(&self) -> &GroupingDocument {
        &self.doc
    }

    /// Registers a callback invoked after every structural mutation,
    /// including reconciliation deltas. The UI layer uses this instead of any
    /// widget-event system.
    pub fn subscribe<F: Fn() + 'static>(&mut self, callback: F) {
        self.observers.push(Box::new(callback));
    }

    fn notify(&self) {
        for callback in &self.observers {
            callback();
        }
    }

    /// Serializes the document and fully overwrites the sidecar file. Save
    /// renumbers non-default section keys contiguously from 1 in display
    /// order; persisted keys are not stable across saves.
    ///
    /// # Errors
    ///
    /// [`AppError::Write`] on filesystem failure; the in-memory document is
    /// unaffected.
    pub fn save(&self) -> Result<()> {
        let text = sidecar::encode(&self.doc)?;
        let path = self.folder.join(SIDECAR_FILE);
        fs::write(&path, text).map_err(|source| AppError::Write { path, source })
    }

    /// Appends a new empty section, labelled "New Header" when no label is
    /// supplied, and persists.
    ///
    /// # Errors
    ///
    /// [`AppError::Write`] if persisting fails; the section is still added in
    /// memory.
    pub fn add_header(&mut self, label: Option<&str>) -> Result<SectionId> {
        let id = self.doc.add_section(label.unwrap_or(NEW_HEADER));
        self.notify();
        self.save()?;
        Ok(id)
    }

    /// Renames a section and persists. Empty labels are coerced to
    /// "Unnamed Header".
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] for the default section or an unknown id;
    /// [`AppError::Write`] if persisting fails.
    pub fn rename_header(&mut self, id: SectionId, label: &str) -> Result<()> {
        self.doc.rename_section(id, label)?;
        self.notify();
        self.save()
    }

    /// Deletes a section, re-homing its files into the nearest preceding
    /// section, and persists.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] for the default section or an unknown id;
    /// [`AppError::Write`] if persisting fails.
    pub fn delete_header(&mut self, id: SectionId) -> Result<()> {
        self.doc.delete_section(id)?;
        self.notify();
        self.save()
    }

    /// Relocates a file entry and persists.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] if the entry or target section is unknown;
    /// [`AppError::Write`] if persisting fails.
    pub fn move_item(&mut self, name: &str, target: SectionId, index: usize) -> Result<()> {
        self.doc.move_file(name, target, index)?;
        self.notify();
        self.save()
    }

    /// Moves a whole section to a new display position and persists.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] if the section is unknown, is the default
    /// section, or the position is out of range; [`AppError::Write`] if
    /// persisting fails.
    pub fn move_section(&mut self, id: SectionId, index: usize) -> Result<()> {
        self.doc.move_section(id, index)?;
        self.notify();
        self.save()
    }

    /// Union of all filenames currently placed in the document.
    #[must_use]
    pub fn known_files(&self) -> BTreeSet<String> {
        self.doc.known_files()
    }

    /// Applies a reconciliation delta without saving: removals first, then
    /// additions appended to the default section in the order given.
    /// Subscribers are notified only when the delta is non-empty; the caller
    /// is responsible for the unconditional save that follows reconciliation.
    pub fn apply_listing_delta(&mut self, removed: &[String], added: &[String]) {
        for name in removed {
            self.doc.remove_file(name);
        }
        for name in added {
            self.doc.adopt_file(name);
        }
        if !(removed.is_empty() && added.is_empty()) {
            self.notify();
        }
    }
}

#[cfg(test)]
#[path = "tests/store.rs"]
mod tests;
