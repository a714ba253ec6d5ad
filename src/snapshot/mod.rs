mod blur;

pub use blur::{BlurBackend, GaussianBlur, PassthroughBlur};

use image::RgbaImage;

use crate::core::{CropRect, PixelSize};
use crate::error::{TimelineError, TimelineResult};

/// Host-side capture of the content rendered beneath the track.
///
/// Implementations may rasterize a widget subtree, read back a surface, or
/// return a prepared bitmap; the engine only requires that the result is
/// non-empty. Capture runs on the UI thread and is invoked at most once per
/// engine lifetime, so it must not be assumed cheap but will never run
/// per-frame.
pub trait SnapshotSource {
    fn capture(&mut self) -> TimelineResult<RgbaImage>;
}

/// Shared bitmap backing every block's background crop.
///
/// Exclusively owned by the engine; blocks only ever hold crops derived from
/// it, never the snapshot itself.
#[derive(Debug, Clone)]
pub struct BackgroundSnapshot {
    image: RgbaImage,
}

impl BackgroundSnapshot {
    pub fn new(image: RgbaImage) -> TimelineResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(TimelineError::SnapshotCapture(
                "captured snapshot has zero size".to_owned(),
            ));
        }

        Ok(Self { image })
    }

    #[must_use]
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.image.width(), self.image.height())
    }

    /// Copies the crop region out of the snapshot.
    ///
    /// The crop must lie within the snapshot bounds; regions produced by
    /// [`crate::core::crop_for_block`] against this snapshot's size always
    /// do, but the bounds are re-checked so a stale rectangle cannot read
    /// out of range.
    pub fn extract(&self, crop: CropRect) -> TimelineResult<RgbaImage> {
        let within_bounds = crop.width > 0
            && crop.height > 0
            && crop.x.checked_add(crop.width).is_some_and(|r| r <= self.image.width())
            && crop.y.checked_add(crop.height).is_some_and(|b| b <= self.image.height());

        if !within_bounds {
            return Err(TimelineError::InvalidData(format!(
                "crop {crop:?} exceeds snapshot bounds {:?}",
                self.size()
            )));
        }

        Ok(image::imageops::crop_imm(&self.image, crop.x, crop.y, crop.width, crop.height)
            .to_image())
    }
}
