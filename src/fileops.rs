//! Directory listing and OS-level file operations.

use crate::error::Result;
use crate::sidecar::SIDECAR_FILE;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Clone, Debug)]
/// Transient handle for one managed file, reconstructed from the folder root
/// and a relative name whenever needed. Never persisted on its own.
pub struct FileEntry {
    /// Filename relative to the folder root, no path separators.
    pub name: String,
    /// Folder root joined with the name.
    pub absolute_path: PathBuf,
}

impl FileEntry {
    /// Derives the absolute path for a named file under a folder root.
    #[must_use]
    pub fn new(folder: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            absolute_path: folder.join(name),
        }
    }
}

/// Names of the regular files directly inside a folder, in filesystem
/// enumeration order. Non-recursive; the sidecar file is excluded, as are
/// dotfiles unless `show_hidden` is set and entries whose names are not valid
/// UTF-8.
///
/// # Errors
///
/// Propagates directory read failures, e.g. when the watched folder has been
/// deleted out from under us.
pub fn list_files(folder: &Path, show_hidden: bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if name == SIDECAR_FILE {
            continue;
        }
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    Ok(names)
}

/// Asks the OS to open a file with its default handler. Best-effort: spawn
/// and ignore any errors, no result observed.
pub fn open_with_default(path: &Path) {
    let path_str = path.display().to_string();
    if cfg!(target_os = "windows") {
        // `start` needs a window title argument; empty string is fine. The
        // path goes through unquoted, `Command` handles argument escaping.
        let _ = Command::new("cmd")
            .args(["/C", "start", "", &path_str])
            .spawn();
    } else if cfg!(target_os = "macos") {
        let _ = Command::new("open").arg(&path_str).spawn();
    } else {
        let _ = Command::new("xdg-open").arg(&path_str).spawn();
    }
}
