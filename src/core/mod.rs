pub mod crop;
pub mod track;
pub mod types;

pub use crop::{CropRect, crop_for_block};
pub use track::{TrackMetrics, map_interval};
pub use types::{BlockRect, PixelSize, TimeInterval};
