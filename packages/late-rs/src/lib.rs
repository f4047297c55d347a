//! Late scheduling API client
//!
//! Thin HTTP client for the Late social post scheduling API. Posts are
//! created either as drafts or scheduled for a wall-clock time in a
//! named timezone. Late expects local time plus an IANA zone name, not
//! an absolute instant, so callers are responsible for the conversion.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://getlate.dev/api/v1";

/// Errors returned by the Late API client.
#[derive(Debug, Error)]
pub enum LateError {
    /// The request never produced a response (DNS, TLS, connect, timeout).
    #[error("request to Late failed: {0}")]
    Transport(String),

    /// Late answered with a non-success status.
    #[error("Late returned an error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct LateOptions {
    pub api_key: String,
    pub base_url: String,
}

impl LateOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// A platform/account pair a post is published to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformTarget {
    pub platform: String,
    pub account_id: String,
}

/// Request body for creating a post.
///
/// `scheduled_for` is a naive local date-time (`YYYY-MM-DDTHH:mm`)
/// interpreted against `timezone`. Both are omitted entirely for
/// drafts; Late treats their absence as "do not schedule".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,
    pub platforms: Vec<PlatformTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Subset of the Late post resource the dashboard cares about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct LateClient {
    options: LateOptions,
    http: Client,
}

impl LateClient {
    pub fn new(options: LateOptions) -> Self {
        Self {
            options,
            http: Client::new(),
        }
    }

    /// Create a post (draft or scheduled, depending on the request).
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<PostResponse, LateError> {
        let url = format!("{}/posts", self.options.base_url);

        tracing::debug!(
            url = %url,
            scheduled = request.scheduled_for.is_some(),
            "Creating Late post"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.options.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LateError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<PostResponse>()
            .await
            .map_err(|e| LateError::Transport(format!("failed to parse Late response: {}", e)))
    }

    /// Delete a post by id (used when a scheduled publication is withdrawn).
    pub async fn delete_post(&self, post_id: &str) -> Result<(), LateError> {
        let url = format!("{}/posts/{}", self.options.base_url, post_id);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.options.api_key)
            .send()
            .await
            .map_err(|e| LateError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(LateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> PlatformTarget {
        PlatformTarget {
            platform: "linkedin".to_string(),
            account_id: "acct-123".to_string(),
        }
    }

    #[test]
    fn test_draft_request_omits_schedule_fields() {
        let request = CreatePostRequest {
            content: "hello".to_string(),
            platforms: vec![target()],
            scheduled_for: None,
            timezone: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("scheduledFor").is_none());
        assert!(json.get("timezone").is_none());
        assert_eq!(json["content"], "hello");
        assert_eq!(json["platforms"][0]["accountId"], "acct-123");
    }

    #[test]
    fn test_scheduled_request_serializes_camel_case() {
        let request = CreatePostRequest {
            content: "hello".to_string(),
            platforms: vec![target()],
            scheduled_for: Some("2024-01-15T14:00".to_string()),
            timezone: Some("America/Chicago".to_string()),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["scheduledFor"], "2024-01-15T14:00");
        assert_eq!(json["timezone"], "America/Chicago");
    }

    #[test]
    fn test_post_response_accepts_mongo_style_id() {
        let parsed: PostResponse =
            serde_json::from_str(r#"{"_id": "abc123", "status": "scheduled"}"#).unwrap();
        assert_eq!(parsed.id, "abc123");
        assert_eq!(parsed.status, "scheduled");
    }

    #[test]
    fn test_api_error_display() {
        let err = LateError::Api {
            status: 422,
            message: "content required".to_string(),
        };
        assert!(err.to_string().contains("422"));
        assert!(err.to_string().contains("content required"));
    }
}
