//! Concrete resource records managed by the dashboard.
//!
//! One module per entity, each exporting the record, its typed id, its
//! create/patch payloads, and a `*Store` alias over the generic
//! [`ResourceStore`](crate::store::ResourceStore).

mod brand;
mod category;
mod content_type;
mod idea;
mod inspiration;
mod publication;
mod topic;

pub use brand::{Brand, BrandId, BrandPatch, BrandStore, CreateBrand};
pub use category::{Category, CategoryId, CategoryPatch, CategoryStore, CreateCategory};
pub use content_type::{
    ContentType, ContentTypeId, ContentTypePatch, ContentTypeStore, CreateContentType,
};
pub use idea::{CreateIdea, Idea, IdeaId, IdeaPatch, IdeaStatus, IdeaStore};
pub use inspiration::{
    CreateInspiration, Inspiration, InspirationId, InspirationPatch, InspirationStore,
};
pub use publication::{
    CreatePublication, Publication, PublicationId, PublicationPatch, PublicationStatus,
    PublicationStore,
};
pub use topic::{CreateTopic, Topic, TopicId, TopicPatch, TopicStore};
