use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Layout used when a timestamp is rendered for humans.
pub const DISPLAY_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Wall-clock milliseconds since the UNIX epoch, recorded on every commit.
///
/// Ordering is plain numeric ordering; it breaks ties between unrelated
/// merge-base candidates.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(i64::try_from(millis).unwrap_or(i64::MAX))
    }

    /// The epoch, stamped on the root commit.
    pub const fn epoch() -> Self {
        Self(0)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Convert to a UTC `chrono` date-time.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, TypeError> {
        DateTime::from_timestamp_millis(self.0).ok_or(TypeError::TimestampOutOfRange(self.0))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Ok(dt) => write!(f, "{}", dt.format(DISPLAY_FORMAT)),
            Err(_) => write!(f, "@{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_renders_as_1970() {
        assert_eq!(
            Timestamp::epoch().to_string(),
            "Thu Jan 1 00:00:00 1970 +0000"
        );
    }

    #[test]
    fn now_is_after_epoch() {
        assert!(Timestamp::now() > Timestamp::epoch());
    }

    #[test]
    fn out_of_range_falls_back_to_millis() {
        let ts = Timestamp::from_millis(i64::MAX);
        assert_eq!(
            ts.to_datetime().unwrap_err(),
            TypeError::TimestampOutOfRange(i64::MAX)
        );
        assert_eq!(ts.to_string(), format!("@{}ms", i64::MAX));
    }

    #[test]
    fn ordering_follows_millis() {
        assert!(Timestamp::from_millis(5) < Timestamp::from_millis(6));
    }
}
