//! Engine configuration.

use chrono::{Duration, FixedOffset, Offset, TimeDelta, Utc};
use serde::Deserialize;

/// Tunables for the task lifecycle engine.
///
/// # Examples
///
/// ```
/// use alldun::task::services::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.capture_window_ticks, 30);
///
/// let eastern = EngineConfig::for_utc_offset(-5 * 3600);
/// assert_eq!(eastern.calendar_offset().local_minus_utc(), -5 * 3600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of countdown ticks a capture session lasts.
    pub capture_window_ticks: u32,
    /// Wall-clock length of one countdown tick.
    pub tick_period: std::time::Duration,
    /// Minutes after the start time before a start proof counts as late.
    pub start_grace_minutes: u32,
    /// Offset from UTC, in seconds, that defines a calendar day.
    pub calendar_utc_offset_seconds: i32,
    /// How many days ahead calendar import looks.
    pub calendar_lookahead_days: u32,
    /// Capacity of the task event channel.
    pub event_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capture_window_ticks: 30,
            tick_period: std::time::Duration::from_secs(1),
            start_grace_minutes: 60,
            calendar_utc_offset_seconds: 0,
            calendar_lookahead_days: 7,
            event_capacity: 64,
        }
    }
}

impl EngineConfig {
    /// Creates a default configuration whose calendar days follow the given
    /// UTC offset.
    #[must_use]
    pub fn for_utc_offset(offset_seconds: i32) -> Self {
        Self {
            calendar_utc_offset_seconds: offset_seconds,
            ..Self::default()
        }
    }

    /// Parses a JSON configuration document. Absent keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] raised for malformed documents.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    /// Returns the start-proof grace period.
    #[must_use]
    pub fn start_grace(&self) -> Duration {
        Duration::minutes(i64::from(self.start_grace_minutes))
    }

    /// Returns the wall-clock length of a whole capture window.
    ///
    /// Saturates at the largest representable duration.
    #[must_use]
    pub fn capture_window(&self) -> Duration {
        let ticks = i32::try_from(self.capture_window_ticks).unwrap_or(i32::MAX);
        Duration::from_std(self.tick_period)
            .ok()
            .and_then(|tick| tick.checked_mul(ticks))
            .unwrap_or(TimeDelta::MAX)
    }

    /// Returns the offset that defines a calendar day. Out-of-range offsets
    /// fall back to UTC.
    #[must_use]
    pub fn calendar_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.calendar_utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }

    /// Returns the calendar import window.
    #[must_use]
    pub fn calendar_lookahead(&self) -> Duration {
        Duration::days(i64::from(self.calendar_lookahead_days))
    }
}
