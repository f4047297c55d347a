//! Content ideas - the raw material of the editorial pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::id::Id;
use crate::resource::{require_text, CreatePayload, Resource};
use crate::resources::{BrandId, CategoryId};
use crate::store::ResourceStore;

pub type IdeaId = Id<Idea>;

/// A content idea attached to a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,
    pub title: String,
    pub description: Option<String>,
    pub status: IdeaStatus,
    pub brand_id: BrandId,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_archived: bool,
}

/// Editorial status of an idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdeaStatus {
    /// Proposed (by a person or the text generation flow), not yet
    /// triaged.
    Suggested,
    /// Accepted for production.
    Approved,
    /// Rejected during triage.
    Discarded,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateIdea {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absent payloads pick up the active brand from the selection
    /// context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IdeaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<IdeaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl IdeaPatch {
    /// Patch that only flips the status.
    pub fn status(status: IdeaStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that soft-deletes the record.
    pub fn archived() -> Self {
        Self {
            is_archived: Some(true),
            ..Self::default()
        }
    }
}

impl Resource for Idea {
    type Id = IdeaId;
    type Create = CreateIdea;
    type Patch = IdeaPatch;

    const KIND: &'static str = "ideas";

    fn id(&self) -> IdeaId {
        self.id
    }

    fn is_archived(&self) -> bool {
        self.is_archived
    }
}

impl CreatePayload for CreateIdea {
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

pub type IdeaStore = ResourceStore<Idea>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&IdeaStatus::Suggested).unwrap(),
            "\"suggested\""
        );
        assert_eq!(
            serde_json::to_string(&IdeaStatus::Discarded).unwrap(),
            "\"discarded\""
        );
    }

    #[test]
    fn test_patch_omits_unset_fields() {
        let json = serde_json::to_value(IdeaPatch::status(IdeaStatus::Approved)).unwrap();
        assert_eq!(json["status"], "approved");
        assert!(json.get("title").is_none());
        assert!(json.get("is_archived").is_none());
    }

    #[test]
    fn test_create_requires_title() {
        let payload = CreateIdea {
            title: "  ".to_string(),
            ..CreateIdea::default()
        };
        assert!(matches!(
            payload.validate(),
            Err(SyncError::Validation { field: "title", .. })
        ));
    }
}
