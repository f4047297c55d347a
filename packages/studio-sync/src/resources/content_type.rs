//! Content types - global format tags (thread, carousel, short, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::id::Id;
use crate::resource::{require_text, CreatePayload, Resource};
use crate::resources::BrandId;
use crate::store::ResourceStore;

pub type ContentTypeId = Id<ContentType>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub id: ContentTypeId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateContentType {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentTypePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl Resource for ContentType {
    type Id = ContentTypeId;
    type Create = CreateContentType;
    type Patch = ContentTypePatch;

    const KIND: &'static str = "content-types";

    fn id(&self) -> ContentTypeId {
        self.id
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

impl CreatePayload for CreateContentType {
    fn validate(&self) -> Result<(), SyncError> {
        require_text("name", &self.name)
    }

    fn requires_scope(&self) -> bool {
        false
    }

    fn scope(&self) -> Option<BrandId> {
        None
    }

    fn set_scope(&mut self, _brand: BrandId) {}
}

pub type ContentTypeStore = ResourceStore<ContentType>;
