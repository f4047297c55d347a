//! Publications - drafted or scheduled posts for a brand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::id::Id;
use crate::resource::{require_text, CreatePayload, Resource};
use crate::resources::BrandId;
use crate::store::ResourceStore;

pub type PublicationId = Id<Publication>;

/// A piece of finished content, either sitting as a draft or scheduled
/// for a wall-clock time on the posting platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: PublicationId,
    pub content: String,
    pub status: PublicationStatus,
    /// Absolute instant the post should go out. `None` for drafts;
    /// the scheduling API receives this as local time + zone name.
    pub scheduled_at: Option<DateTime<Utc>>,
    pub brand_id: BrandId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Draft,
    Scheduled,
    Published,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreatePublication {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PublicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl PublicationPatch {
    pub fn status(status: PublicationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn archived() -> Self {
        Self {
            is_archived: Some(true),
            ..Self::default()
        }
    }
}

impl Resource for Publication {
    type Id = PublicationId;
    type Create = CreatePublication;
    type Patch = PublicationPatch;

    const KIND: &'static str = "publications";

    fn id(&self) -> PublicationId {
        self.id
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

impl CreatePayload for CreatePublication {
    fn validate(&self) -> Result<(), SyncError> {
        require_text("content", &self.content)
    }

    fn scope(&self) -> Option<BrandId> {
        self.brand_id
    }

    fn set_scope(&mut self, brand: BrandId) {
        self.brand_id = Some(brand);
    }
}

pub type PublicationStore = ResourceStore<Publication>;
