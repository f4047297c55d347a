//! Structured error types for the sync core.
//!
//! `SyncError` provides pattern-matchable errors instead of generic
//! `anyhow::Error`. Nothing in this library surfaces `anyhow` to its
//! callers: stores record a `SyncError` in their observable state and
//! return the same value from the failing operation, so screens can
//! both show inline feedback and render a sticky error banner.
//!
//! All variants are non-fatal. A store remains usable after any error,
//! and the next successful operation clears the recorded one.

use thiserror::Error;

/// Errors produced by resource stores, the review queue, and the
/// scheduling-time encoder.
///
/// `Clone` + `PartialEq` so the error can live in observable store
/// state and be asserted on directly in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// A remote call failed in transport or returned a non-success
    /// status. `message` carries the server-provided body when there is
    /// one.
    #[error("network request failed{}: {}", fmt_status(.status), .message)]
    Network {
        /// HTTP status, when the failure happened after a response.
        status: Option<u16>,
        /// Server-provided or transport error message.
        message: String,
    },

    /// A create needed a brand foreign key, the payload did not carry
    /// one, and no brand is currently selected. Raised before any
    /// network call is made.
    #[error("no brand selected and payload has no brand id")]
    MissingScope,

    /// A required field was absent or empty.
    #[error("validation failed: {field} {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    /// Scheduling was requested but the instant/zone pair could not be
    /// encoded (unknown zone name, or no instant supplied at all).
    #[error("timezone conversion failed for {zone:?}: {reason}")]
    TimezoneConversion { zone: String, reason: String },
}

impl SyncError {
    /// Shorthand for a transport-level network failure (no HTTP status).
    pub fn transport(message: impl Into<String>) -> Self {
        SyncError::Network {
            status: None,
            message: message.into(),
        }
    }

    /// Returns true for failures that warrant a corrective reload:
    /// the server may have been mutated (or not) and the cache can no
    /// longer be trusted.
    pub fn is_network(&self) -> bool {
        matches!(self, SyncError::Network { .. })
    }
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" ({})", code),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_display_includes_status_and_message() {
        let err = SyncError::Network {
            status: Some(502),
            message: "bad gateway".to_string(),
        };
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn test_transport_has_no_status() {
        let err = SyncError::transport("connection refused");
        match &err {
            SyncError::Network { status, message } => {
                assert!(status.is_none());
                assert_eq!(message, "connection refused");
            }
            _ => panic!("expected Network"),
        }
        assert!(!err.to_string().contains("("));
    }

    #[test]
    fn test_error_is_pattern_matchable() {
        let err = SyncError::Validation {
            field: "title",
            reason: "must not be empty",
        };
        match err {
            SyncError::Validation { field, .. } => assert_eq!(field, "title"),
            _ => panic!("expected Validation"),
        }
    }

    #[test]
    fn test_only_network_triggers_reload() {
        assert!(SyncError::transport("x").is_network());
        assert!(!SyncError::MissingScope.is_network());
        assert!(!SyncError::TimezoneConversion {
            zone: "Mars/Olympus".to_string(),
            reason: "unknown".to_string(),
        }
        .is_network());
    }
}
