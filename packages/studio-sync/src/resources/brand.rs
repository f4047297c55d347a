//! Personal brand - the scope entity other resources hang off.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::id::Id;
use crate::resource::{require_text, CreatePayload, Resource};
use crate::store::ResourceStore;

pub type BrandId = Id<Brand>;

/// A personal brand (person or property) content is produced for.
///
/// Brands are the scope entity: the currently selected brand id is
/// auto-injected into scoped resource creations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub description: Option<String>,
    /// Free-text voice/tone notes fed to the text generation prompt.
    pub tone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBrand {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BrandPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl Resource for Brand {
    type Id = BrandId;
    type Create = CreateBrand;
    type Patch = BrandPatch;

    const KIND: &'static str = "brands";

    fn id(&self) -> BrandId {
        self.id
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

impl CreatePayload for CreateBrand {
    fn validate(&self) -> Result<(), SyncError> {
        require_text("name", &self.name)
    }

    // Brands are the scope, they are not themselves scoped.
    fn requires_scope(&self) -> bool {
        false
    }

    fn scope(&self) -> Option<BrandId> {
        None
    }

    fn set_scope(&mut self, _brand: BrandId) {}
}

pub type BrandStore = ResourceStore<Brand>;
