/*!
 * Millisecond-precision timestamps for SubRip timing lines.
 *
 * A `Timestamp` is an offset from the start of the track. Its canonical text
 * form is `HH:MM:SS,mmm`; hours are not wrapped at 24 and grow past two
 * digits for very long tracks.
 */

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// @const: Canonical SubRip timestamp, anchored
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):([0-5]\d):([0-5]\d),(\d{3})$").expect("timestamp pattern is valid")
});

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Error returned when a string is not a canonical `HH:MM:SS,mmm` timestamp
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid timestamp: '{0}' (expected HH:MM:SS,mmm)")]
pub struct TimestampParseError(pub String);

/// A point in time within a subtitle track, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The start of the track
    pub const ZERO: Timestamp = Timestamp(0);

    pub const fn from_millis(ms: u64) -> Self {
        Timestamp(ms)
    }

    /// Build a timestamp from its clock components.
    ///
    /// Components are not range checked; `from_hms(0, 0, 90, 0)` is 90 seconds.
    pub const fn from_hms(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Self {
        Timestamp(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`, or zero if `earlier` is later
    pub fn saturating_since(self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    pub fn hours(self) -> u64 {
        self.0 / MS_PER_HOUR
    }

    pub fn minutes(self) -> u64 {
        (self.0 % MS_PER_HOUR) / MS_PER_MINUTE
    }

    pub fn seconds(self) -> u64 {
        (self.0 % MS_PER_MINUTE) / MS_PER_SECOND
    }

    pub fn millis(self) -> u64 {
        self.0 % MS_PER_SECOND
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.millis()
        )
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = TIMESTAMP_REGEX
            .captures(s)
            .ok_or_else(|| TimestampParseError(s.to_string()))?;

        let field = |idx: usize| -> Result<u64, TimestampParseError> {
            caps[idx]
                .parse::<u64>()
                .map_err(|_| TimestampParseError(s.to_string()))
        };

        let hours = field(1)?;
        let minutes = field(2)?;
        let seconds = field(3)?;
        let millis = field(4)?;

        // Guard against absurd hour counts overflowing the millisecond total
        let total = hours
            .checked_mul(MS_PER_HOUR)
            .and_then(|h| h.checked_add(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis))
            .ok_or_else(|| TimestampParseError(s.to_string()))?;

        Ok(Timestamp(total))
    }
}

impl From<u64> for Timestamp {
    fn from(ms: u64) -> Self {
        Timestamp(ms)
    }
}
