//! In-memory representation of one folder's grouping.
//!
//! A document is an ordered sequence of sections; each section is a header
//! plus an ordered list of filenames. The first section is always the default
//! section: it holds ungrouped files, cannot be deleted or renamed, and is
//! pinned to display position zero. Two invariants hold across every
//! operation: a filename appears in at most one section, and no operation
//! leaves the document partially mutated.

use crate::error::{AppError, Result};
use std::collections::BTreeSet;

/// Header given to the default section of a synthesized document.
pub const DEFAULT_HEADER: &str = "default section";
/// Header given to a section added without an explicit label.
pub const NEW_HEADER: &str = "New Header";
/// Header substituted when a rename supplies an empty or whitespace label.
pub const UNNAMED_HEADER: &str = "Unnamed Header";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Opaque in-memory section identifier, stable across reorders within one
/// session. Distinct from the on-disk serialization key, which is renumbered
/// at every save.
pub struct SectionId(u64);

#[derive(Clone, Debug, PartialEq, Eq)]
/// One named, ordered group of files displayed under a header.
pub struct Section {
    /// Identifier assigned at creation, decoupled from display order.
    pub id: SectionId,
    /// Display name; "default section" by convention for the default section.
    pub header: String,
    /// Filenames relative to the folder root, in display order.
    pub files: Vec<String>,
}

#[derive(Clone, Debug)]
/// Ordered sections for one folder, default section first.
pub struct GroupingDocument {
    sections: Vec<Section>,
    next_id: u64,
}

impl GroupingDocument {
    /// Creates a document holding a single default section with the given
    /// header and files. Duplicate filenames are dropped keep-first.
    #[must_use]
    pub fn new(default_header: &str, files: Vec<String>) -> Self {
        Self::from_sections(vec![(default_header.to_string(), files)])
    }

    /// Builds a document from `(header, files)` pairs in display order. The
    /// first pair becomes the default section; an empty input yields a single
    /// empty default section. Filenames already seen in an earlier section are
    /// dropped keep-first so that global uniqueness holds by construction.
    #[must_use]
    pub fn from_sections(sections: Vec<(String, Vec<String>)>) -> Self {
        let mut doc = Self {
            sections: Vec::new(),
            next_id: 0,
        };
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for (header, files) in sections {
            let id = doc.fresh_id();
            let mut kept = Vec::with_capacity(files.len());
            for name in files {
                if seen.insert(name.clone()) {
                    kept.push(name);
                }
            }
            doc.sections.push(Section {
                id,
                header,
                files: kept,
            });
        }
        if doc.sections.is_empty() {
            let id = doc.fresh_id();
            doc.sections.push(Section {
                id,
                header: DEFAULT_HEADER.to_string(),
                files: Vec::new(),
            });
        }
        doc
    }

    fn fresh_id(&mut self) -> SectionId {
        let id = SectionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// All sections in display order; never empty.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Identifier of the default section.
    #[must_use]
    pub fn default_id(&self) -> SectionId {
        self.sections[0].id
    }

    /// Looks up a section by identifier.
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Display position of a section, if it exists.
    #[must_use]
    pub fn position(&self, id: SectionId) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Union of all filenames currently present across sections.
    #[must_use]
    pub fn known_files(&self) -> BTreeSet<String> {
        self.sections
            .iter()
            .flat_map(|s| s.files.iter().cloned())
            .collect()
    }

    /// Whether any section holds the given filename.
    #[must_use]
    pub fn contains_file(&self, name: &str) -> bool {
        self.locate_file(name).is_some()
    }

    fn locate_file(&self, name: &str) -> Option<(usize, usize)> {
        self.sections.iter().enumerate().find_map(|(si, s)| {
            s.files.iter().position(|f| f == name).map(|fi| (si, fi))
        })
    }

    /// Appends a new empty section with the given header and returns its
    /// identifier.
    pub fn add_section(&mut self, header: &str) -> SectionId {
        let id = self.fresh_id();
        self.sections.push(Section {
            id,
            header: header.to_string(),
            files: Vec::new(),
        });
        id
    }

    /// Renames a section. An empty or whitespace-only label is coerced to
    /// "Unnamed Header".
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] if the section does not exist or is the
    /// default section, which is not renameable.
    pub fn rename_section(&mut self, id: SectionId, label: &str) -> Result<()> {
        let pos = self
            .position(id)
            .ok_or_else(|| AppError::invalid("rename: no such section"))?;
        if pos == 0 {
            return Err(AppError::invalid("the default section cannot be renamed"));
        }
        let trimmed = label.trim();
        self.sections[pos].header = if trimmed.is_empty() {
            UNNAMED_HEADER.to_string()
        } else {
            trimmed.to_string()
        };
        Ok(())
    }

    /// Removes a section, re-homing its files into the nearest preceding
    /// section (ultimately the default section), appended after that section's
    /// existing files with their order preserved.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] if the section does not exist or is the
    /// default section, which is not deletable.
    pub fn delete_section(&mut self, id: SectionId) -> Result<()> {
        let pos = self
            .position(id)
            .ok_or_else(|| AppError::invalid("delete: no such section"))?;
        if pos == 0 {
            return Err(AppError::invalid("the default section cannot be deleted"));
        }
        let removed = self.sections.remove(pos);
        self.sections[pos - 1].files.extend(removed.files);
        Ok(())
    }

    /// Moves a whole section (header and files together) to a new display
    /// position.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] if the section does not exist, is the
    /// default section (pinned at position zero), or `target` is zero or past
    /// the end of the section sequence.
    pub fn move_section(&mut self, id: SectionId, target: usize) -> Result<()> {
        let pos = self
            .position(id)
            .ok_or_else(|| AppError::invalid("move: no such section"))?;
        if pos == 0 {
            return Err(AppError::invalid("the default section cannot be moved"));
        }
        if target == 0 {
            return Err(AppError::invalid(
                "no section may be placed ahead of the default section",
            ));
        }
        if target >= self.sections.len() {
            return Err(AppError::invalid("move: position out of range"));
        }
        let section = self.sections.remove(pos);
        self.sections.insert(target, section);
        Ok(())
    }

    /// Relocates one file entry to `index` within the target section, possibly
    /// across sections. An index past the end of the target list appends.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] if the filename is not present in any
    /// section or the target section does not exist.
    pub fn move_file(&mut self, name: &str, target: SectionId, index: usize) -> Result<()> {
        let (spos, fidx) = self
            .locate_file(name)
            .ok_or_else(|| AppError::invalid(format!("move: no entry named {name}")))?;
        let tpos = self
            .position(target)
            .ok_or_else(|| AppError::invalid("move: no such target section"))?;
        let entry = self.sections[spos].files.remove(fidx);
        let files = &mut self.sections[tpos].files;
        files.insert(index.min(files.len()), entry);
        Ok(())
    }

    /// Drops a file entry from whichever section holds it. Returns false if no
    /// section does; a missing entry is routine during reconciliation, not an
    /// error.
    pub fn remove_file(&mut self, name: &str) -> bool {
        if let Some((spos, fidx)) = self.locate_file(name) {
            self.sections[spos].files.remove(fidx);
            true
        } else {
            false
        }
    }

    /// Appends a newly discovered file to the end of the default section's
    /// list. Returns false without mutating if the name is already placed,
    /// preserving global uniqueness.
    pub fn adopt_file(&mut self, name: &str) -> bool {
        if self.contains_file(name) {
            return false;
        }
        self.sections[0].files.push(name.to_string());
        true
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
