use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("an event cell template must be provided")]
    MissingCellTemplate,

    #[error("a background image must be provided")]
    MissingBackgroundImage,

    #[error("background image could not be decoded: {0}")]
    BackgroundDecode(#[from] image::ImageError),

    #[error(
        "invalid track metrics: hour_width={hour_width}, track_height={track_height}, \
         block_vertical_fraction={block_vertical_fraction}"
    )]
    InvalidTrackMetrics {
        hour_width: f64,
        track_height: f64,
        block_vertical_fraction: f64,
    },

    #[error("snapshot capture failed: {0}")]
    SnapshotCapture(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
