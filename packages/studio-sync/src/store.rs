//! Generic optimistic-cache-and-reconcile engine.
//!
//! One `ResourceStore` instance per resource type gives every screen a
//! uniform, race-tolerant view of "list + create + update + delete",
//! hiding per-request latency behind immediate local feedback.
//!
//! # Cache discipline
//!
//! After any settled operation the cache is either exactly the last
//! successful fetch result, or that result with at most one optimistic
//! delta applied:
//!
//! - `load` replaces the whole cache, and only the most recently issued
//!   load may do so: completions are sequence-numbered and stale ones
//!   are discarded, success or failure alike.
//! - `create` applies its delta only once the server has assigned the
//!   id (a synthetic client-side id would collide with the real one).
//! - `remove` applies its delta before the round trip completes; users
//!   expect instant removal and delete has no meaningful pending state.
//! - Every failed mutation is followed by one corrective `load` against
//!   the store's current filter, so the cache converges to server truth
//!   within one extra round trip.
//!
//! Mutation handlers only ever touch records by id, never by position,
//! so they tolerate interleaving with loads triggered elsewhere.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::ResourceClient;
use crate::error::SyncError;
use crate::filter::ListFilter;
use crate::resource::{CreatePayload, Resource};
use crate::selection::SelectionContext;

struct StoreState<T> {
    records: Vec<T>,
    error: Option<SyncError>,
    last_filter: ListFilter,
}

/// Optimistic local cache over one resource type.
///
/// Cheap to clone; clones share the same cache. Consumers read cloned
/// snapshots via [`records`](ResourceStore::records) and push every
/// change back through the store's operations; nothing else may mutate
/// the cache.
pub struct ResourceStore<T: Resource> {
    client: Arc<dyn ResourceClient<T>>,
    selection: SelectionContext,
    load_seq: Arc<AtomicU64>,
    state: Arc<RwLock<StoreState<T>>>,
}

impl<T: Resource> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            selection: self.selection.clone(),
            load_seq: Arc::clone(&self.load_seq),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(client: Arc<dyn ResourceClient<T>>, selection: SelectionContext) -> Self {
        Self {
            client,
            selection,
            load_seq: Arc::new(AtomicU64::new(0)),
            state: Arc::new(RwLock::new(StoreState {
                records: Vec::new(),
                error: None,
                last_filter: ListFilter::default(),
            })),
        }
    }

    // ------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------

    /// Snapshot of the cached records. The caller owns the clone and
    /// cannot affect the cache through it.
    pub fn records(&self) -> Vec<T> {
        self.read_state().records.clone()
    }

    /// The record with this id, if cached.
    pub fn get(&self, id: T::Id) -> Option<T> {
        self.read_state().records.iter().find(|r| r.id() == id).cloned()
    }

    /// The most recent operation error, cleared by the next success.
    pub fn error(&self) -> Option<SyncError> {
        self.read_state().error.clone()
    }

    /// The most recently issued filter, i.e. what the user is looking at.
    pub fn last_filter(&self) -> ListFilter {
        self.read_state().last_filter.clone()
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Fetch the listing for `filter` and replace the cache with it.
    ///
    /// Never fails outward: a failed load records the error and keeps
    /// the previous cache. Safe to call concurrently with itself; each
    /// call is tagged with an issuance sequence number and a completion
    /// is discarded unless its number is still the latest issued, so an
    /// old in-flight load can never overwrite a newer one's result.
    pub async fn load(&self, filter: ListFilter) {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            // Only the latest issuance may set the filter; two loads
            // racing through here must not leave the older filter behind.
            let mut state = self.write_state();
            if seq == self.load_seq.load(Ordering::SeqCst) {
                state.last_filter = filter.clone();
            }
        }

        debug!(kind = T::KIND, seq, "issuing load");
        let result = self.client.list(&filter).await;

        let mut state = self.write_state();
        if seq != self.load_seq.load(Ordering::SeqCst) {
            debug!(kind = T::KIND, seq, "discarding stale load completion");
            return;
        }

        match result {
            Ok(records) => {
                debug!(kind = T::KIND, seq, count = records.len(), "load applied");
                state.records = records;
                state.error = None;
            }
            Err(err) => {
                warn!(kind = T::KIND, seq, error = %err, "load failed");
                state.error = Some(err);
            }
        }
    }

    /// Re-fetch with the store's current filter.
    pub async fn reload(&self) {
        let filter = self.last_filter();
        self.load(filter).await;
    }

    /// Create a record and prepend the server's version to the cache.
    ///
    /// Validates first, then resolves the brand scope: a payload
    /// without a brand id picks up the active selection, and if there
    /// is none the call fails with [`SyncError::MissingScope`] before
    /// any network traffic. The cache is untouched until the server
    /// returns the record with its assigned id.
    pub async fn create(&self, mut payload: T::Create) -> Result<T, SyncError> {
        if let Err(err) = payload.validate() {
            self.record_error(err.clone());
            return Err(err);
        }

        if payload.requires_scope() && payload.scope().is_none() {
            match self.selection.selected() {
                Some(brand) => payload.set_scope(brand),
                None => {
                    let err = SyncError::MissingScope;
                    self.record_error(err.clone());
                    return Err(err);
                }
            }
        }

        match self.client.create(&payload).await {
            Ok(record) => {
                let mut state = self.write_state();
                state.records.insert(0, record.clone());
                state.error = None;
                debug!(kind = T::KIND, id = %record.id(), "created");
                Ok(record)
            }
            Err(err) => {
                warn!(kind = T::KIND, error = %err, "create failed, reloading");
                self.record_error(err.clone());
                self.reload().await;
                Err(err)
            }
        }
    }

    /// Apply a partial update and replace the cached record in place
    /// with the server's returned version.
    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, SyncError> {
        match self.client.update(id, &patch).await {
            Ok(record) => {
                let mut state = self.write_state();
                if let Some(slot) = state.records.iter_mut().find(|r| r.id() == id) {
                    *slot = record.clone();
                }
                state.error = None;
                debug!(kind = T::KIND, id = %id, "updated");
                Ok(record)
            }
            Err(err) => {
                warn!(kind = T::KIND, id = %id, error = %err, "update failed, reloading");
                self.record_error(err.clone());
                self.reload().await;
                Err(err)
            }
        }
    }

    /// Permanently delete a record.
    ///
    /// The cache removal is applied *before* the network call settles.
    /// If the call fails the corrective reload restores the record.
    pub async fn remove(&self, id: T::Id) -> Result<(), SyncError> {
        self.write_state().records.retain(|r| r.id() != id);

        match self.client.delete(id).await {
            Ok(()) => {
                self.write_state().error = None;
                debug!(kind = T::KIND, id = %id, "removed");
                Ok(())
            }
            Err(err) => {
                warn!(kind = T::KIND, id = %id, error = %err, "delete failed, reloading");
                self.record_error(err.clone());
                self.reload().await;
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Selection wiring
    // ------------------------------------------------------------------

    /// React to brand selection changes: whenever the selection is
    /// replaced or cleared, re-derive the effective filter (current
    /// filter with the new scope) and re-trigger a load.
    ///
    /// Returns the driving task; dropping the store does not stop it,
    /// abort the handle when the owning screen unmounts.
    pub fn spawn_selection_reload(&self) -> JoinHandle<()> {
        let store = self.clone();
        let mut rx = self.selection.subscribe();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let scope = *rx.borrow_and_update();
                debug!(kind = T::KIND, selected = scope.is_some(), "selection changed, reloading");
                let filter = store.last_filter().scoped(scope);
                store.load(filter).await;
            }
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn record_error(&self, err: SyncError) {
        self.write_state().error = Some(err);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState<T>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState<T>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
