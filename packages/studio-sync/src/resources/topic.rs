//! Topics - global subject tags shared across brands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::id::Id;
use crate::resource::{require_text, CreatePayload, Resource};
use crate::resources::BrandId;
use crate::store::ResourceStore;

pub type TopicId = Id<Topic>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTopic {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TopicPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl Resource for Topic {
    type Id = TopicId;
    type Create = CreateTopic;
    type Patch = TopicPatch;

    const KIND: &'static str = "topics";

    fn id(&self) -> TopicId {
        self.id
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

impl CreatePayload for CreateTopic {
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

pub type TopicStore = ResourceStore<Topic>;
