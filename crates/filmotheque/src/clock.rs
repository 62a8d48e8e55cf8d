//! Time source injected into the store and the exporter.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{FilmothequeError, Result};

/// Something that knows the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current instant as an RFC 3339 UTC string with milliseconds,
    /// e.g. `2024-01-01T00:00:00.000Z`.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant, for tests and reproducible exports.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Parse an RFC 3339 timestamp.
    pub fn at(timestamp: &str) -> Result<Self> {
        let instant = DateTime::parse_from_rfc3339(timestamp).map_err(|e| {
            FilmothequeError::Config(format!("Invalid timestamp '{}': {}", timestamp, e))
        })?;
        Ok(Self(instant.with_timezone(&Utc)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_timestamp() {
        let clock = FixedClock::at("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(clock.timestamp(), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_fixed_clock_rejects_bad_input() {
        assert!(matches!(FixedClock::at("yesterday"), Err(FilmothequeError::Config(_))));
        assert!(FixedClock::at("").is_err());
    }

    #[test]
    fn test_fixed_clock_converts_offset_to_utc() {
        let clock = FixedClock::at("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(clock.timestamp(), "2024-01-01T00:00:00.000Z");
    }
}
