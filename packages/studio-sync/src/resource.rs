//! Core traits binding resource records to the generic store.
//!
//! Every dashboard entity (ideas, inspirations, publications, ...)
//! implements [`Resource`]; its create payload implements
//! [`CreatePayload`]. The store only ever talks to records through
//! these traits, so the reconciliation rules are written once.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::Serialize;

use crate::error::SyncError;
use crate::resources::BrandId;

/// A record managed by a [`ResourceStore`](crate::ResourceStore).
///
/// Records are flat serde structs: an opaque server-assigned id,
/// server-maintained timestamps, an `is_archived` soft-delete flag, and
/// resource-specific scalar fields. Foreign keys are weak references
/// (id + lookup), never ownership.
pub trait Resource: Clone + Send + Sync + 'static {
    /// The typed id for this record kind.
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Payload for creating a record. Lacks id and timestamps; the
    /// server assigns both.
    type Create: CreatePayload + Serialize + Send + Sync + 'static;

    /// Partial-update payload. Fields are `Option`s, serde-skipped when
    /// absent, so a patch only touches what it names.
    type Patch: Serialize + Send + Sync + 'static;

    /// Plural path segment on the resource API, also used as the log
    /// field identifying the store (e.g. `"ideas"`).
    const KIND: &'static str;

    fn id(&self) -> Self::Id;

    fn is_archived(&self) -> bool;
}

/// Create payloads know how to validate themselves and how the brand
/// scope applies to them.
pub trait CreatePayload {
    /// Check required fields. Runs before any network call.
    fn validate(&self) -> Result<(), SyncError>;

    /// Whether this resource type carries a brand foreign key at all.
    /// Global resources (topics, content types, brands themselves)
    /// return false and are never rejected for a missing scope.
    fn requires_scope(&self) -> bool {
        true
    }

    /// The brand id already present on the payload, if any.
    fn scope(&self) -> Option<BrandId>;

    /// Inject the active brand id. Only called when [`scope`] returned
    /// `None` and [`requires_scope`] is true.
    ///
    /// [`scope`]: CreatePayload::scope
    /// [`requires_scope`]: CreatePayload::requires_scope
    fn set_scope(&mut self, brand: BrandId);
}

/// Validation helper: reject `None` or blank required text fields.
pub(crate) fn require_text(
    field: &'static str,
    value: &str,
) -> Result<(), SyncError> {
    if value.trim().is_empty() {
        return Err(SyncError::Validation {
            field,
            reason: "must not be empty",
        });
    }
    Ok(())
}
