//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::publisher::PublishTarget;

/// Runtime configuration for the dashboard's sync core.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the resource API (the remote relational service).
    pub api_base_url: String,
    /// Optional bearer token for the resource API.
    pub api_token: Option<String>,
    /// API key for the Late scheduling service.
    pub late_api_key: String,
    /// Override for the Late base URL (self-hosted / test double).
    pub late_base_url: Option<String>,
    /// Platform posts are published to.
    pub publish_platform: String,
    /// Platform account posts are published under.
    pub publish_account_id: String,
    /// IANA zone scheduled times are expressed in.
    pub publish_timezone: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            api_base_url: env::var("STUDIO_API_URL").context("STUDIO_API_URL must be set")?,
            api_token: env::var("STUDIO_API_TOKEN").ok(),
            late_api_key: env::var("LATE_API_KEY").context("LATE_API_KEY must be set")?,
            late_base_url: env::var("LATE_BASE_URL").ok(),
            publish_platform: env::var("PUBLISH_PLATFORM")
                .context("PUBLISH_PLATFORM must be set")?,
            publish_account_id: env::var("PUBLISH_ACCOUNT_ID")
                .context("PUBLISH_ACCOUNT_ID must be set")?,
            publish_timezone: env::var("PUBLISH_TIMEZONE")
                .unwrap_or_else(|_| "America/Chicago".to_string()),
        })
    }

    /// Options for constructing a [`late::LateClient`].
    pub fn late_options(&self) -> late::LateOptions {
        let options = late::LateOptions::new(self.late_api_key.clone());
        match &self.late_base_url {
            Some(base) => options.with_base_url(base.clone()),
            None => options,
        }
    }

    /// The publishing target derived from this configuration.
    pub fn publish_target(&self) -> PublishTarget {
        PublishTarget {
            platform: self.publish_platform.clone(),
            account_id: self.publish_account_id.clone(),
            timezone: self.publish_timezone.clone(),
        }
    }
}
