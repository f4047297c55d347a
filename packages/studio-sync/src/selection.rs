//! Process-wide brand selection.
//!
//! A single optional brand id, held for the lifetime of the UI session
//! and never persisted. One writer (the brand switcher), many readers
//! (every scoped resource store). Modeled as a `tokio::sync::watch`
//! broadcast value rather than an implicit global, so the lifecycle is
//! explicit and dependents can react to changes.

use std::sync::Arc;

use tokio::sync::watch;

use crate::resources::BrandId;

/// Shared handle on the active brand selection.
///
/// Cheap to clone; all clones observe the same value. Reads are
/// synchronous and always return the latest value. There is no partial
/// update: the selection is replaced or cleared, never edited.
#[derive(Clone)]
pub struct SelectionContext {
    tx: Arc<watch::Sender<Option<BrandId>>>,
}

impl SelectionContext {
    /// Create a context with no brand selected.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the active selection.
    pub fn set_selected(&self, brand: BrandId) {
        self.tx.send_replace(Some(brand));
    }

    /// Clear the selection entirely.
    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// The currently selected brand, if any.
    pub fn selected(&self) -> Option<BrandId> {
        *self.tx.borrow()
    }

    /// Subscribe to selection changes. Dependent stores use this to
    /// re-derive their effective filter and re-trigger a load.
    pub fn subscribe(&self) -> watch::Receiver<Option<BrandId>> {
        self.tx.subscribe()
    }
}

impl Default for SelectionContext {
    fn default() -> Self {
        Self::new()
    }
}
