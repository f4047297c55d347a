//! Wall-clock encoding for the posting platform.
//!
//! The scheduling API takes a naive local date-time plus an IANA zone
//! name instead of an absolute instant, so scheduled publications are
//! converted here: instant in, that instant's wall-clock time in the
//! target zone out. The conversion goes through the zone database
//! (`chrono-tz`), so the daylight-saving offset in effect *on that
//! date* is applied: this is a date-dependent conversion, not a fixed
//! offset.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::SyncError;

/// A scheduling timestamp as the posting platform wants it: minute
/// precision, 24-hour, no offset, interpreted against `timezone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalScheduleTime {
    /// `YYYY-MM-DDTHH:mm` wall-clock time in `timezone`.
    pub local_time: String,
    /// IANA zone identifier, passed through verbatim.
    pub timezone: String,
}

impl LocalScheduleTime {
    /// Encode `instant` as wall-clock time in `zone`.
    ///
    /// # Errors
    ///
    /// [`SyncError::TimezoneConversion`] when `zone` is not a known
    /// IANA identifier.
    pub fn from_instant(instant: DateTime<Utc>, zone: &str) -> Result<Self, SyncError> {
        let tz: Tz = zone.parse().map_err(|_| SyncError::TimezoneConversion {
            zone: zone.to_string(),
            reason: "unknown IANA timezone identifier".to_string(),
        })?;

        let local = instant.with_timezone(&tz);
        Ok(Self {
            local_time: local.format("%Y-%m-%dT%H:%M").to_string(),
            timezone: zone.to_string(),
        })
    }
}
