//! Testing utilities for resource stores.
//!
//! This module is only available with the `testing` feature (and inside
//! this crate's own tests):
//!
//! ```toml
//! [dev-dependencies]
//! studio-sync = { version = "0.1", features = ["testing"] }
//! ```
//!
//! [`InMemoryClient`] is a scriptable [`ResourceClient`]: tests seed
//! its record set, queue per-call results and failures, and (for
//! interleaving tests) gate individual calls on oneshot channels so
//! completion order is fully deterministic.
//!
//! Scripts (queued results, queued failures) are bound to calls in
//! *arrival* order; gates only delay the call's completion. That way a
//! failure scripted for the first of two concurrent loads hits the
//! first-issued load even when the second completes before it.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::client::ResourceClient;
use crate::error::SyncError;
use crate::filter::ListFilter;
use crate::resource::Resource;

/// Which client operation a script or gate applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientOp {
    List,
    Create,
    Update,
    Delete,
}

type Materializer<T> = dyn Fn(&<T as Resource>::Create) -> T + Send + Sync;
type Patcher<T> = dyn Fn(&T, &<T as Resource>::Patch) -> T + Send + Sync;

/// In-memory stand-in for the remote resource service.
pub struct InMemoryClient<T: Resource> {
    records: Mutex<Vec<T>>,
    materialize: Box<Materializer<T>>,
    patcher: Option<Box<Patcher<T>>>,
    calls: Mutex<Vec<ClientOp>>,
    list_results: Mutex<VecDeque<Vec<T>>>,
    failures: Mutex<HashMap<ClientOp, VecDeque<SyncError>>>,
    gates: Mutex<HashMap<ClientOp, VecDeque<oneshot::Receiver<()>>>>,
}

impl<T: Resource> InMemoryClient<T> {
    /// `materialize` plays the server's role on create: assign an id
    /// and timestamps and return the complete record.
    pub fn new(materialize: impl Fn(&T::Create) -> T + Send + Sync + 'static) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            materialize: Box::new(materialize),
            patcher: None,
            calls: Mutex::new(Vec::new()),
            list_results: Mutex::new(VecDeque::new()),
            failures: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// `patch` plays the server's role on update: apply the partial
    /// change to the stored record and return the new version.
    pub fn with_patcher(
        mut self,
        patch: impl Fn(&T, &T::Patch) -> T + Send + Sync + 'static,
    ) -> Self {
        self.patcher = Some(Box::new(patch));
        self
    }

    // ------------------------------------------------------------------
    // Scripting
    // ------------------------------------------------------------------

    /// Replace the simulated server's record set.
    pub fn set_records(&self, records: Vec<T>) {
        *self.records.lock().unwrap() = records;
    }

    /// Snapshot of the simulated server's record set.
    pub fn server_records(&self) -> Vec<T> {
        self.records.lock().unwrap().clone()
    }

    /// Queue a result for an upcoming `list` call (consumed in call
    /// arrival order). Calls without a queued result return the current
    /// record set.
    pub fn push_list_result(&self, records: Vec<T>) {
        self.list_results.lock().unwrap().push_back(records);
    }

    /// Queue a failure for an upcoming call of `op` (consumed in call
    /// arrival order).
    pub fn fail_next(&self, op: ClientOp, err: SyncError) {
        self.failures
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(err);
    }

    /// Gate the next call of `op`: it will not complete until the
    /// returned sender is fired (or dropped).
    pub fn gate(&self, op: ClientOp) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(op)
            .or_default()
            .push_back(rx);
        tx
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Every call made, in order.
    pub fn calls(&self) -> Vec<ClientOp> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, op: ClientOp) -> usize {
        self.calls.lock().unwrap().iter().filter(|&&c| c == op).count()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn record_call(&self, op: ClientOp) {
        self.calls.lock().unwrap().push(op);
    }

    fn pop_failure(&self, op: ClientOp) -> Option<SyncError> {
        self.failures
            .lock()
            .unwrap()
            .get_mut(&op)
            .and_then(|queue| queue.pop_front())
    }

    fn pop_gate(&self, op: ClientOp) -> Option<oneshot::Receiver<()>> {
        self.gates
            .lock()
            .unwrap()
            .get_mut(&op)
            .and_then(|queue| queue.pop_front())
    }

    async fn await_gate(&self, op: ClientOp) {
        if let Some(rx) = self.pop_gate(op) {
            // A dropped sender releases the gate too.
            let _ = rx.await;
        }
    }
}

#[async_trait]
impl<T: Resource> ResourceClient<T> for InMemoryClient<T> {
    async fn list(&self, _filter: &ListFilter) -> Result<Vec<T>, SyncError> {
        self.record_call(ClientOp::List);
        let failure = self.pop_failure(ClientOp::List);
        let scripted = self.list_results.lock().unwrap().pop_front();
        self.await_gate(ClientOp::List).await;

        if let Some(err) = failure {
            return Err(err);
        }
        Ok(scripted.unwrap_or_else(|| self.records.lock().unwrap().clone()))
    }

    async fn create(&self, payload: &T::Create) -> Result<T, SyncError> {
        self.record_call(ClientOp::Create);
        let failure = self.pop_failure(ClientOp::Create);
        self.await_gate(ClientOp::Create).await;

        if let Some(err) = failure {
            return Err(err);
        }
        let record = (self.materialize)(payload);
        self.records.lock().unwrap().insert(0, record.clone());
        Ok(record)
    }

    async fn update(&self, id: T::Id, patch: &T::Patch) -> Result<T, SyncError> {
        self.record_call(ClientOp::Update);
        let failure = self.pop_failure(ClientOp::Update);
        self.await_gate(ClientOp::Update).await;

        if let Some(err) = failure {
            return Err(err);
        }

        let patcher = self.patcher.as_ref().ok_or_else(|| {
            SyncError::transport("InMemoryClient has no patcher; use with_patcher()")
        })?;

        let mut records = self.records.lock().unwrap();
        let slot = records.iter_mut().find(|r| r.id() == id).ok_or_else(|| {
            SyncError::Network {
                status: Some(404),
                message: format!("{} {} not found", T::KIND, id),
            }
        })?;
        let updated = patcher(slot, patch);
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: T::Id) -> Result<(), SyncError> {
        self.record_call(ClientOp::Delete);
        let failure = self.pop_failure(ClientOp::Delete);
        self.await_gate(ClientOp::Delete).await;

        if let Some(err) = failure {
            return Err(err);
        }
        self.records.lock().unwrap().retain(|r| r.id() != id);
        Ok(())
    }
}
