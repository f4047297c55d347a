//! The network boundary a resource store talks through.

use async_trait::async_trait;

use crate::error::SyncError;
use crate::filter::ListFilter;
use crate::resource::Resource;

/// Remote CRUD operations for one resource type.
///
/// Implementations are thin transports: no caching, no retries, no
/// local state. Every failure maps to [`SyncError::Network`] carrying
/// the server-provided message when there is one; the store layers the
/// optimistic-cache and reconciliation rules on top.
///
/// The production implementation is [`RestClient`](crate::RestClient);
/// tests use the scriptable `InMemoryClient` from the `testing` module.
#[async_trait]
pub trait ResourceClient<T: Resource>: Send + Sync {
    /// Fetch all records matching the filter, newest first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<T>, SyncError>;

    /// Create a record. The server assigns id and timestamps and
    /// returns the complete record.
    async fn create(&self, payload: &T::Create) -> Result<T, SyncError>;

    /// Apply a partial update and return the server's version of the
    /// record (source of truth for `updated_at` and computed fields).
    async fn update(&self, id: T::Id, patch: &T::Patch) -> Result<T, SyncError>;

    /// Permanently delete a record.
    async fn delete(&self, id: T::Id) -> Result<(), SyncError>;
}
