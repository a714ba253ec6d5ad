use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

pub const HOURS_IN_DAY: u32 = 24;
pub const MINUTES_IN_HOUR: u32 = 60;
pub const MINUTES_IN_DAY: u32 = HOURS_IN_DAY * MINUTES_IN_HOUR;

/// Time-of-day range in minutes since midnight.
///
/// Values are deliberately not validated: `end < start` and spans past 24:00
/// are accepted and produce reversed or off-track geometry instead of an
/// error. See [`crate::core::map_interval`] for how such ranges are anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl TimeInterval {
    #[must_use]
    pub const fn from_minutes(start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    /// Normalizes wall-clock times to minutes since midnight.
    ///
    /// Seconds and sub-second precision are dropped, matching the widget's
    /// hour-of-day plus minute ingestion.
    #[must_use]
    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            start_minutes: minutes_since_midnight(start),
            end_minutes: minutes_since_midnight(end),
        }
    }

    /// Normalizes full timestamps, keeping only the time-of-day component.
    #[must_use]
    pub fn from_wall_clock(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::from_times(start.time(), end.time())
    }

    #[must_use]
    pub const fn duration_minutes(self) -> u32 {
        self.start_minutes.abs_diff(self.end_minutes)
    }
}

fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * MINUTES_IN_HOUR + time.minute()
}

/// Positioned block rectangle in track pixel space.
///
/// Produced by the geometry mapper; `left`/`top` are already rounded to whole
/// pixels and `width`/`height` are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BlockRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BlockRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Integer pixel dimensions of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}
