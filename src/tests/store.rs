use super::GroupingStore;
use crate::document::{DEFAULT_HEADER, UNNAMED_HEADER};
use crate::error::AppError;
use crate::sidecar::SIDECAR_FILE;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn touch(folder: &Path, name: &str) {
    fs::write(folder.join(name), b"x").unwrap();
}

fn write_sidecar(folder: &Path, text: &str) {
    fs::write(folder.join(SIDECAR_FILE), text).unwrap();
}

#[test]
fn missing_sidecar_synthesizes_and_persists_a_default_grouping() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.txt");
    touch(dir.path(), "b.txt");

    let store = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();

    let doc = store.document();
    assert_eq!(doc.sections().len(), 1);
    assert_eq!(doc.sections()[0].header, DEFAULT_HEADER);
    let expected: BTreeSet<String> = ["a.txt".to_string(), "b.txt".to_string()].into();
    assert_eq!(store.known_files(), expected);

    // The fallback is durable: a reload sees the persisted sidecar.
    let text = fs::read_to_string(dir.path().join(SIDECAR_FILE)).unwrap();
    assert!(crate::sidecar::decode(&text).is_ok());
}

#[test]
fn corrupt_sidecar_falls_back_instead_of_failing() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.txt");
    write_sidecar(dir.path(), "file_groups: [not, a, mapping]\n");

    let store = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();

    assert_eq!(store.document().sections().len(), 1);
    assert_eq!(store.document().sections()[0].files, vec!["a.txt"]);
}

#[test]
fn load_drops_entries_whose_files_are_gone() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.txt");
    touch(dir.path(), "b.txt");
    write_sidecar(
        dir.path(),
        "file_groups:\n\
         \x20 top:\n\
         \x20   header: default section\n\
         \x20   files: [a.txt, gone.txt]\n\
         \x20 '1':\n\
         \x20   header: Kept\n\
         \x20   files: [b.txt]\n",
    );

    let store = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();

    assert_eq!(store.document().sections()[0].files, vec!["a.txt"]);
    assert_eq!(store.document().sections()[1].header, "Kept");
    assert_eq!(store.document().sections()[1].files, vec!["b.txt"]);
}

#[test]
fn hidden_files_are_excluded_unless_requested() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.txt");
    touch(dir.path(), ".hidden");

    let store = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();
    assert!(!store.document().contains_file(".hidden"));

    // A fresh folder synthesized with hidden files enabled includes them.
    // (For a folder with an existing sidecar, adoption of files the sidecar
    // never recorded is reconciliation's job, not load's.)
    let other = tempdir().unwrap();
    touch(other.path(), "b.txt");
    touch(other.path(), ".hidden");
    let store = GroupingStore::load(other.path().to_path_buf(), true).unwrap();
    assert!(store.document().contains_file(".hidden"));
}

#[test]
fn edits_persist_across_reloads() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.txt");
    touch(dir.path(), "b.txt");
    write_sidecar(
        dir.path(),
        "file_groups:\n\
         \x20 top:\n\
         \x20   header: default section\n\
         \x20   files: [a.txt, b.txt]\n",
    );

    let mut store = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();
    let docs = store.add_header(Some("Docs")).unwrap();
    store.move_item("b.txt", docs, 0).unwrap();

    let reloaded = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();
    let doc = reloaded.document();
    assert_eq!(doc.sections().len(), 2);
    assert_eq!(doc.sections()[0].files, vec!["a.txt"]);
    assert_eq!(doc.sections()[1].header, "Docs");
    assert_eq!(doc.sections()[1].files, vec!["b.txt"]);
}

#[test]
fn blank_rename_is_coerced_and_persisted() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.txt");

    let mut store = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();
    let id = store.add_header(None).unwrap();
    store.rename_header(id, "  ").unwrap();

    let reloaded = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();
    assert_eq!(reloaded.document().sections()[1].header, UNNAMED_HEADER);
}

#[test]
fn failed_save_surfaces_and_leaves_the_document_intact() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("sub");
    fs::create_dir(&folder).unwrap();
    touch(&folder, "a.txt");

    let mut store = GroupingStore::load(folder.clone(), false).unwrap();
    fs::remove_dir_all(&folder).unwrap();

    let err = store.add_header(Some("Docs")).unwrap_err();
    assert!(matches!(err, AppError::Write { .. }));
    // The edit itself took effect in memory, so the next save retries it.
    assert_eq!(store.document().sections().len(), 2);
    assert_eq!(store.document().sections()[1].header, "Docs");
}

#[test]
fn mutations_notify_subscribers() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "a.txt");

    let mut store = GroupingStore::load(dir.path().to_path_buf(), false).unwrap();
    let fired = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = std::rc::Rc::clone(&fired);
    store.subscribe(move || counter.set(counter.get() + 1));

    store.add_header(Some("Docs")).unwrap();
    assert_eq!(fired.get(), 1);

    // A zero-delta listing pass stays quiet.
    store.apply_listing_delta(&[], &[]);
    assert_eq!(fired.get(), 1);

    store.apply_listing_delta(&[], &["b.txt".to_string()]);
    assert_eq!(fired.get(), 2);
}
