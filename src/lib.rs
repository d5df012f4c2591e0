//! fileshelf: view a folder's files grouped under user-defined, reorderable,
//! renamable headers, persisted to a `file_groups.yaml` sidecar and
//! reconciled against the live directory as it changes underneath us.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod document;
pub mod error;
pub mod fileops;
pub mod reconcile;
pub mod session;
pub mod sidecar;
pub mod store;
pub mod ui;
pub mod watcher;
