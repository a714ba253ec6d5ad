use crate::core::types::{BlockRect, PixelSize};

/// Crop rectangle in snapshot pixel space, guaranteed to lie within the
/// snapshot bounds it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Maps a block to the snapshot region visible beneath it at the given
/// horizontal scroll offset.
///
/// Both horizontal edges are shifted by the scroll offset, scaled by the
/// snapshot/track width ratio and clamped to the snapshot bounds; the
/// vertical edges are scaled by the height ratio. Returns `None` when the
/// clamped region collapses to zero pixels in either dimension, so callers
/// never issue a degenerate crop request.
#[must_use]
pub fn crop_for_block(
    rect: BlockRect,
    scroll_offset: f64,
    track_width: f64,
    track_height: f64,
    snapshot: PixelSize,
) -> Option<CropRect> {
    if !snapshot.is_valid() || track_width <= 0.0 || track_height <= 0.0 {
        return None;
    }

    let snapshot_width = f64::from(snapshot.width);
    let snapshot_height = f64::from(snapshot.height);
    let x_ratio = snapshot_width / track_width;
    let y_ratio = snapshot_height / track_height;

    let left = ((rect.left + scroll_offset) * x_ratio).clamp(0.0, snapshot_width);
    let right = ((rect.right() + scroll_offset) * x_ratio).clamp(0.0, snapshot_width);
    let top = (rect.top * y_ratio).clamp(0.0, snapshot_height);
    let bottom = (rect.bottom() * y_ratio).clamp(0.0, snapshot_height);

    let x = left.floor() as u32;
    let y = top.floor() as u32;
    let width = ((right - left).floor() as u32).min(snapshot.width.saturating_sub(x));
    let height = ((bottom - top).floor() as u32).min(snapshot.height.saturating_sub(y));

    if width == 0 || height == 0 {
        return None;
    }

    Some(CropRect {
        x,
        y,
        width,
        height,
    })
}
