//! Categories - brand-scoped content groupings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::id::Id;
use crate::resource::{require_text, CreatePayload, Resource};
use crate::resources::BrandId;
use crate::store::ResourceStore;

pub type CategoryId = Id<Category>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub brand_id: BrandId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl Resource for Category {
    type Id = CategoryId;
    type Create = CreateCategory;
    type Patch = CategoryPatch;

    const KIND: &'static str = "categories";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

impl CreatePayload for CreateCategory {
    fn validate(&self) -> Result<(), SyncError> {
        require_text("name", &self.name)
    }

    fn scope(&self) -> Option<BrandId> {
        self.brand_id
    }

    fn set_scope(&mut self, brand: BrandId) {
        self.brand_id = Some(brand);
    }
}

pub type CategoryStore = ResourceStore<Category>;
