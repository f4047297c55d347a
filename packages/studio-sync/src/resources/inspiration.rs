//! Inspirations - external references captured for later triage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::id::Id;
use crate::resource::{require_text, CreatePayload, Resource};
use crate::resources::BrandId;
use crate::review::ReviewItem;
use crate::store::ResourceStore;

pub type InspirationId = Id<Inspiration>;

/// A captured reference (post, article, clip) a brand may want to
/// react to. Inspirations are triaged one at a time in the review
/// queue: accepting one turns it into an idea, rejecting archives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inspiration {
    pub id: InspirationId,
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub brand_id: BrandId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

impl Inspiration {
    /// Project this record onto the review queue's item shape.
    pub fn review_item(&self) -> ReviewItem<InspirationId> {
        ReviewItem {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            link: self.link.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateInspiration {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InspirationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl InspirationPatch {
    pub fn archived() -> Self {
        Self {
            is_archived: Some(true),
            ..Self::default()
        }
    }
}

impl Resource for Inspiration {
    type Id = InspirationId;
    type Create = CreateInspiration;
    type Patch = InspirationPatch;

    const KIND: &'static str = "inspirations";

    fn id(&self) -> InspirationId {
        self.id
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

impl CreatePayload for CreateInspiration {
    fn validate(&self) -> Result<(), SyncError> {
        require_text("title", &self.title)
    }

    fn scope(&self) -> Option<BrandId> {
        self.brand_id
    }

    fn set_scope(&mut self, brand: BrandId) {
        self.brand_id = Some(brand);
    }
}

pub type InspirationStore = ResourceStore<Inspiration>;
