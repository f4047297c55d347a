//! Hands finished publications to the posting platform.

use late::{CreatePostRequest, LateClient, LateError, PlatformTarget, PostResponse};
use tracing::{debug, warn};

use crate::error::SyncError;
use crate::resources::{Publication, PublicationStatus};
use crate::scheduling::LocalScheduleTime;

/// Where posts for the active account go.
#[derive(Debug, Clone)]
pub struct PublishTarget {
    /// Fixed platform identifier (e.g. `"linkedin"`).
    pub platform: String,
    /// Platform account the posts are published under.
    pub account_id: String,
    /// IANA zone scheduled times are expressed in.
    pub timezone: String,
}

/// Build the posting request for a publication.
///
/// Drafts omit the schedule fields entirely. A publication marked
/// `Scheduled` must carry an instant; without one the request cannot be
/// encoded and this fails with [`SyncError::TimezoneConversion`] before
/// any network call.
pub fn build_post_request(
    publication: &Publication,
    target: &PublishTarget,
) -> Result<CreatePostRequest, SyncError> {
    let schedule = match (publication.status, publication.scheduled_at) {
        (PublicationStatus::Scheduled, Some(at)) => {
            Some(LocalScheduleTime::from_instant(at, &target.timezone)?)
        }
        (PublicationStatus::Scheduled, None) => {
            return Err(SyncError::TimezoneConversion {
                zone: target.timezone.clone(),
                reason: "scheduling requested without an instant".to_string(),
            });
        }
        _ => None,
    };

    Ok(CreatePostRequest {
        content: publication.content.clone(),
        platforms: vec![PlatformTarget {
            platform: target.platform.clone(),
            account_id: target.account_id.clone(),
        }],
        scheduled_for: schedule.as_ref().map(|s| s.local_time.clone()),
        timezone: schedule.map(|s| s.timezone),
    })
}

/// Sends publications to the scheduling API for one target account.
pub struct Publisher {
    client: LateClient,
    target: PublishTarget,
}

impl Publisher {
    pub fn new(client: LateClient, target: PublishTarget) -> Self {
        Self { client, target }
    }

    /// Push a publication to the platform, as a draft or scheduled
    /// depending on its status.
    pub async fn publish(&self, publication: &Publication) -> Result<PostResponse, SyncError> {
        let request = build_post_request(publication, &self.target)?;

        debug!(
            publication_id = %publication.id,
            scheduled = request.scheduled_for.is_some(),
            "publishing"
        );

        self.client.create_post(&request).await.map_err(|err| {
            warn!(publication_id = %publication.id, error = %err, "publish failed");
            match err {
                LateError::Api { status, message } => SyncError::Network {
                    status: Some(status),
                    message,
                },
                LateError::Transport(message) => SyncError::transport(message),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{BrandId, PublicationId};
    use chrono::{TimeZone, Utc};

    fn target() -> PublishTarget {
        PublishTarget {
            platform: "linkedin".to_string(),
            account_id: "acct-1".to_string(),
            timezone: "America/Chicago".to_string(),
        }
    }

    fn publication(status: PublicationStatus, scheduled_at: Option<chrono::DateTime<Utc>>) -> Publication {
        let now = Utc::now();
        Publication {
            id: PublicationId::new(),
            content: "launch day".to_string(),
            status,
            scheduled_at,
            brand_id: BrandId::new(),
            created_at: now,
            updated_at: now,
            is_archived: false,
        }
    }

    #[test]
    fn test_draft_request_has_no_schedule_fields() {
        let request =
            build_post_request(&publication(PublicationStatus::Draft, None), &target()).unwrap();
        assert!(request.scheduled_for.is_none());
        assert!(request.timezone.is_none());
        assert_eq!(request.content, "launch day");
        assert_eq!(request.platforms[0].platform, "linkedin");
    }

    #[test]
    fn test_scheduled_request_carries_local_time_and_zone() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 20, 0, 0).unwrap();
        let request = build_post_request(
            &publication(PublicationStatus::Scheduled, Some(at)),
            &target(),
        )
        .unwrap();
        assert_eq!(request.scheduled_for.as_deref(), Some("2024-01-15T14:00"));
        assert_eq!(request.timezone.as_deref(), Some("America/Chicago"));
    }

    #[test]
    fn test_scheduled_without_instant_is_rejected() {
        let err =
            build_post_request(&publication(PublicationStatus::Scheduled, None), &target())
                .unwrap_err();
        assert!(matches!(err, SyncError::TimezoneConversion { .. }));
    }

    #[test]
    fn test_bad_target_zone_is_rejected() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 20, 0, 0).unwrap();
        let mut bad = target();
        bad.timezone = "Nowhere/Nope".to_string();
        let err = build_post_request(
            &publication(PublicationStatus::Scheduled, Some(at)),
            &bad,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::TimezoneConversion { .. }));
    }
}
