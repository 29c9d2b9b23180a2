//! Wall-clock timestamps in the wire format.

use crate::error::{ModelError, ModelResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A wall-clock instant as carried on the wire.
///
/// The representation is a fixed-width RFC 3339 UTC string with millisecond
/// precision and a `Z` suffix, e.g. `2024-01-01T10:00:00.000Z`. Because the
/// format is zero-padded and fixed-width, the derived lexicographic order is
/// chronological order, and that string comparison is exactly what the
/// conflict policy uses. No logical clock is layered on top; two devices
/// with skewed clocks will order their snapshots by whatever their clocks
/// claim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Stamps the current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Builds a timestamp from a `chrono` instant.
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        Self(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Parses an RFC 3339 string, normalizing it to the wire width.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidTimestamp` if the string is not RFC 3339.
    pub fn parse(value: &str) -> ModelResult<Self> {
        let instant = DateTime::parse_from_rfc3339(value)
            .map_err(|_| ModelError::InvalidTimestamp(value.to_string()))?;
        Ok(Self::from_datetime(instant.with_timezone(&Utc)))
    }

    /// Returns the wire string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}
