use serde::{Deserialize, Serialize};

use crate::core::types::{BlockRect, HOURS_IN_DAY, MINUTES_IN_HOUR, TimeInterval};
use crate::error::{TimelineError, TimelineResult};

/// Pixel metrics of the fixed-width 24-hour track.
///
/// `block_vertical_fraction` positions the top edge of every block as a
/// fraction of the track height; the default of 0.5 keeps blocks in the
/// bottom half of the track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackMetrics {
    pub hour_width: f64,
    pub track_height: f64,
    pub block_vertical_fraction: f64,
}

impl Default for TrackMetrics {
    fn default() -> Self {
        Self {
            hour_width: 100.0,
            track_height: 200.0,
            block_vertical_fraction: 0.5,
        }
    }
}

impl TrackMetrics {
    pub fn validate(self) -> TimelineResult<Self> {
        let dimensions_valid = self.hour_width.is_finite()
            && self.hour_width > 0.0
            && self.track_height.is_finite()
            && self.track_height > 0.0;
        let fraction_valid = self.block_vertical_fraction.is_finite()
            && (0.0..1.0).contains(&self.block_vertical_fraction);

        if !dimensions_valid || !fraction_valid {
            return Err(TimelineError::InvalidTrackMetrics {
                hour_width: self.hour_width,
                track_height: self.track_height,
                block_vertical_fraction: self.block_vertical_fraction,
            });
        }

        Ok(self)
    }

    #[must_use]
    pub fn minute_width(self) -> f64 {
        self.hour_width / f64::from(MINUTES_IN_HOUR)
    }

    #[must_use]
    pub fn track_width(self) -> f64 {
        f64::from(HOURS_IN_DAY) * self.hour_width
    }

    /// Rounded top edge shared by every block on this track.
    #[must_use]
    pub fn block_top(self) -> f64 {
        (self.track_height * self.block_vertical_fraction).round()
    }
}

/// Maps a time interval onto the track as a positioned rectangle.
///
/// Both edges are rounded independently and the rectangle is anchored at the
/// smaller of the two, so a reversed interval (`end < start`) still yields a
/// positive-width block at the position of the earlier time. Intervals
/// reaching past 24:00 are not clamped; they overflow off-track, which is
/// accepted behavior rather than an error.
#[must_use]
pub fn map_interval(interval: TimeInterval, metrics: TrackMetrics) -> BlockRect {
    let minute_width = metrics.minute_width();
    let x1 = (minute_width * f64::from(interval.start_minutes)).round();
    let x2 = (minute_width * f64::from(interval.end_minutes)).round();

    let top = metrics.block_top();
    BlockRect::new(x1.min(x2), top, (x2 - x1).abs(), metrics.track_height - top)
}
