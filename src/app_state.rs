//! The application state machine bridging the grouping document and the TUI.
//!
//! The interface is two screens, as in the original tool: a folder-pick
//! screen and the grouped file list. The list is a flattened row model over
//! the document (header rows and file rows); every user edit goes straight
//! through the store, which persists it, and a dirty flag set by the store's
//! observer callback tells us to rebuild the rows.

use crate::document::SectionId;
use crate::error::Result;
use crate::session::SessionController;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

#[derive(Clone, Copy, PartialEq, Eq)]
/// Determines which screen renders and how input is interpreted.
pub enum View {
    /// Text input for the folder to open.
    FolderPick,
    /// Grouped file list for the open folder.
    Files,
    /// Captures a header label for add or rename.
    Input,
}

#[derive(Clone, Copy, PartialEq, Eq)]
/// What the input view's buffer is for.
pub enum InputPurpose {
    /// Label for a new header appended at the end of the document.
    AddHeader,
    /// New label for an existing header.
    RenameHeader(SectionId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One visible line of the file list.
pub enum Row {
    /// A section header.
    Header(SectionId),
    /// A file entry under its section.
    File {
        /// Section currently holding the file.
        section: SectionId,
        /// Filename relative to the folder root.
        name: String,
    },
}

/// Bridges the session and the rendered list, maintaining cursor, input
/// buffer, and status message.
pub struct AppState {
    /// The one active folder session.
    pub session: SessionController,
    /// Active screen determining input handling.
    pub view: View,
    /// Flattened header/file rows in display order.
    pub rows: Vec<Row>,
    /// Selected row in the file list.
    pub cursor: usize,
    /// Text being typed in the pick or input view.
    pub input_buffer: String,
    /// What a committed input buffer applies to.
    pub input_purpose: Option<InputPurpose>,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    dirty: Rc<Cell<bool>>,
}

impl AppState {
    /// Initialises application state on the folder-pick screen.
    #[must_use]
    pub fn new(session: SessionController) -> Self {
        Self {
            session,
            view: View::FolderPick,
            rows: Vec::new(),
            cursor: 0,
            input_buffer: String::new(),
            input_purpose: None,
            message: None,
            dirty: Rc::new(Cell::new(false)),
        }
    }

    /// Opens a folder and switches to the file list. Errors surface in the
    /// status message; a folder whose initial reconciliation save failed
    /// still opens, since its in-memory document is valid.
    pub fn open_folder(&mut self, folder: &Path) {
        match self.session.open_folder(folder) {
            Ok(()) => self.enter_files(None),
            Err(err) => {
                if self.session.store().is_some() {
                    self.enter_files(Some(err.to_string()));
                } else {
                    self.message = Some(err.to_string());
                }
            }
        }
    }

    fn enter_files(&mut self, message: Option<String>) {
        let dirty = Rc::clone(&self.dirty);
        if let Some(store) = self.session.store_mut() {
            store.subscribe(move || dirty.set(true));
        }
        self.view = View::Files;
        self.cursor = 0;
        self.input_buffer.clear();
        self.message = message;
        self.sync_rows();
    }

    /// Returns to the folder-pick screen, discarding the in-memory document.
    pub fn back_to_pick(&mut self) {
        self.session.close_folder();
        self.rows.clear();
        self.cursor = 0;
        self.input_buffer.clear();
        self.input_purpose = None;
        self.message = None;
        self.view = View::FolderPick;
    }

    /// One event-loop turn: drain the change notifier (reconciling if it
    /// fired) and rebuild rows if the document changed.
    pub fn tick(&mut self) {
        if let Err(err) = self.session.poll() {
            self.message = Some(err.to_string());
        }
        if self.dirty.get() {
            self.sync_rows();
        }
    }

    /// Rebuilds the flattened row model from the document and clamps the
    /// cursor.
    pub fn sync_rows(&mut self) {
        self.rows.clear();
        if let Some(store) = self.session.store() {
            for section in store.document().sections() {
                self.rows.push(Row::Header(section.id));
                for name in &section.files {
                    self.rows.push(Row::File {
                        section: section.id,
                        name: name.clone(),
                    });
                }
            }
        }
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
        self.dirty.set(false);
    }

    /// The row under the cursor, if any.
    #[must_use]
    pub fn selected(&self) -> Option<Row> {
        self.rows.get(self.cursor).cloned()
    }

    /// Moves the cursor one row up.
    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Moves the cursor one row down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    /// Enter on a file opens it with the OS default handler; Enter on a
    /// header starts renaming it.
    pub fn activate(&mut self) {
        match self.selected() {
            Some(Row::File { name, .. }) => {
                let result = self.session.open_entry(&name);
                self.report(result);
            }
            Some(Row::Header(_)) => self.start_rename(),
            None => {}
        }
    }

    /// Switches to the input view to label a new header.
    pub fn start_add_header(&mut self) {
        self.input_buffer.clear();
        self.input_purpose = Some(InputPurpose::AddHeader);
        self.message = None;
        self.view = View::Input;
    }

    /// Switches to the input view to rename the selected header, prefilled
    /// with its current label.
    pub fn start_rename(&mut self) {
        let Some(Row::Header(id)) = self.selected() else {
            self.message = Some("select a header to rename".to_string());
            return;
        };
        let label = self
            .session
            .store()
            .and_then(|store| store.document().section(id))
            .map(|section| section.header.clone());
        let Some(label) = label else { return };
        self.input_buffer = label;
        self.input_purpose = Some(InputPurpose::RenameHeader(id));
        self.message = None;
        self.view = View::Input;
    }

    /// Deletes the selected header, re-homing its files into the preceding
    /// section. Rejections (the default section, or a file row) surface in
    /// the status message.
    pub fn delete_selected(&mut self) {
        match self.selected() {
            Some(Row::Header(id)) => {
                let Some(store) = self.session.store_mut() else {
                    return;
                };
                let result = store.delete_header(id);
                self.report(result);
                self.sync_rows();
            }
            Some(Row::File { .. }) => {
                self.message = Some("only headers can be deleted here".to_string());
            }
            None => {}
        }
    }

    /// Commits the input buffer according to its purpose and returns to the
    /// file list.
    pub fn commit_input(&mut self) {
        let Some(purpose) = self.input_purpose.take() else {
            self.view = View::Files;
            return;
        };
        let label = self.input_buffer.trim().to_string();
        let result = match (purpose, self.session.store_mut()) {
            (_, None) => Ok(()),
            (InputPurpose::AddHeader, Some(store)) => {
                let label = if label.is_empty() {
                    None
                } else {
                    Some(label.as_str())
                };
                store.add_header(label).map(|_| ())
            }
            (InputPurpose::RenameHeader(id), Some(store)) => store.rename_header(id, &label),
        };
        self.report(result);
        self.input_buffer.clear();
        self.view = View::Files;
        self.sync_rows();
        if purpose == InputPurpose::AddHeader && !self.rows.is_empty() {
            self.cursor = self.rows.len() - 1;
        }
    }

    /// Abandons the input view without applying anything.
    pub fn cancel_input(&mut self) {
        self.input_buffer.clear();
        self.input_purpose = None;
        self.view = View::Files;
    }

    /// Moves the selected file or section one step up. A file at the top of
    /// its section crosses into the end of the preceding section; the
    /// default section itself is pinned.
    pub fn move_selected_up(&mut self) {
        match self.selected() {
            Some(Row::Header(id)) => {
                let Some(pos) = self.section_position(id) else {
                    return;
                };
                if pos >= 2 {
                    self.apply_section_move(id, pos - 1);
                }
            }
            Some(Row::File { section, name }) => {
                if let Some((target, index)) = self.file_move_up_plan(section, &name) {
                    self.apply_file_move(&name, target, index);
                }
            }
            None => {}
        }
    }

    /// Moves the selected file or section one step down. A file at the end
    /// of its section crosses into the front of the following section.
    pub fn move_selected_down(&mut self) {
        match self.selected() {
            Some(Row::Header(id)) => {
                let Some(pos) = self.section_position(id) else {
                    return;
                };
                let count = self
                    .session
                    .store()
                    .map_or(0, |store| store.document().sections().len());
                if pos + 1 < count {
                    self.apply_section_move(id, pos + 1);
                }
            }
            Some(Row::File { section, name }) => {
                if let Some((target, index)) = self.file_move_down_plan(section, &name) {
                    self.apply_file_move(&name, target, index);
                }
            }
            None => {}
        }
    }

    fn section_position(&self, id: SectionId) -> Option<usize> {
        self.session
            .store()
            .and_then(|store| store.document().position(id))
    }

    fn file_move_up_plan(&self, section: SectionId, name: &str) -> Option<(SectionId, usize)> {
        let doc = self.session.store()?.document();
        let spos = doc.position(section)?;
        let idx = doc.sections()[spos].files.iter().position(|f| f == name)?;
        if idx > 0 {
            Some((section, idx - 1))
        } else if spos > 0 {
            let target = &doc.sections()[spos - 1];
            Some((target.id, target.files.len()))
        } else {
            None
        }
    }

    fn file_move_down_plan(&self, section: SectionId, name: &str) -> Option<(SectionId, usize)> {
        let doc = self.session.store()?.document();
        let spos = doc.position(section)?;
        let files = &doc.sections()[spos].files;
        let idx = files.iter().position(|f| f == name)?;
        if idx + 1 < files.len() {
            Some((section, idx + 1))
        } else if spos + 1 < doc.sections().len() {
            Some((doc.sections()[spos + 1].id, 0))
        } else {
            None
        }
    }

    fn apply_section_move(&mut self, id: SectionId, index: usize) {
        let Some(store) = self.session.store_mut() else {
            return;
        };
        let result = store.move_section(id, index);
        self.report(result);
        self.sync_rows();
        self.focus_header(id);
    }

    fn apply_file_move(&mut self, name: &str, target: SectionId, index: usize) {
        let Some(store) = self.session.store_mut() else {
            return;
        };
        let result = store.move_item(name, target, index);
        self.report(result);
        self.sync_rows();
        self.focus_file(name);
    }

    fn focus_header(&mut self, id: SectionId) {
        if let Some(pos) = self
            .rows
            .iter()
            .position(|row| matches!(row, Row::Header(h) if *h == id))
        {
            self.cursor = pos;
        }
    }

    fn focus_file(&mut self, name: &str) {
        if let Some(pos) = self
            .rows
            .iter()
            .position(|row| matches!(row, Row::File { name: n, .. } if n == name))
        {
            self.cursor = pos;
        }
    }

    fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.message = None,
            Err(err) => self.message = Some(err.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
