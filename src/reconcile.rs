//! Reconciliation of the in-memory grouping against the live directory.
//!
//! The watcher gives no payload guarantee about what changed, so every pass
//! recomputes the full delta from a fresh listing. A file renamed externally
//! is observed as one removal plus one addition; its section membership is
//! lost and it reappears in the default section. That is given behavior, not
//! something to fix here.

use crate::error::Result;
use crate::store::GroupingStore;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Delta applied by one reconciliation pass.
pub struct ReconcileOutcome {
    /// Filenames dropped because they no longer exist on disk.
    pub removed: Vec<String>,
    /// Filenames newly discovered on disk, appended to the default section.
    pub added: Vec<String>,
}

impl ReconcileOutcome {
    /// Whether the pass changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Brings the store's document in line with `live`, the set of filenames
/// currently on disk.
///
/// Entries whose files vanished are removed from whichever section holds
/// them; brand-new files are appended to the end of the default section's
/// list in sorted order (no ordering signal exists for them beyond "some
/// deterministic order"). The store is saved unconditionally afterwards, even
/// on a zero-delta pass, which also normalizes any latent key-numbering
/// drift in the sidecar.
///
/// Runs on every watcher event and once synchronously right after load, which
/// covers files added or deleted while the tool was closed.
///
/// # Errors
///
/// [`crate::error::AppError::Write`] if the post-reconciliation save fails;
/// the in-memory document keeps the applied delta.
pub fn reconcile(store: &mut GroupingStore, live: &BTreeSet<String>) -> Result<ReconcileOutcome> {
    let known = store.known_files();
    let removed: Vec<String> = known.difference(live).cloned().collect();
    let added: Vec<String> = live.difference(&known).cloned().collect();
    store.apply_listing_delta(&removed, &added);
    store.save()?;
    Ok(ReconcileOutcome { removed, added })
}

#[cfg(test)]
#[path = "tests/reconcile.rs"]
mod tests;
