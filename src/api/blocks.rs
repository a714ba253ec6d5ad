use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::core::{BlockRect, TimeInterval};

/// Engine-unique block handle, never reused across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(u64);

impl BlockId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Lifecycle of one block's background.
///
/// Re-entrant: a scroll tick pushes a `BackgroundReady` block back to
/// `BackgroundPending` while its crop is recomputed. The cycle only ends
/// when the block is dropped on the next `set_events` rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockState {
    Created,
    Positioned,
    BackgroundPending,
    BackgroundReady,
}

/// One positioned event rectangle on the track.
///
/// Holds a transient crop of the shared background snapshot, never the
/// snapshot itself; the engine fills and replaces the crop on every
/// synchronization pass.
#[derive(Debug, Clone)]
pub struct EventBlock {
    id: BlockId,
    interval: TimeInterval,
    rect: BlockRect,
    state: BlockState,
    background: Option<RgbaImage>,
}

impl EventBlock {
    pub(crate) fn new(id: BlockId, interval: TimeInterval) -> Self {
        Self {
            id,
            interval,
            rect: BlockRect::default(),
            state: BlockState::Created,
            background: None,
        }
    }

    pub(crate) fn position(&mut self, rect: BlockRect) {
        self.rect = rect;
        if self.state == BlockState::Created {
            self.state = BlockState::Positioned;
        }
    }

    pub(crate) fn mark_background_pending(&mut self) {
        self.state = BlockState::BackgroundPending;
    }

    pub(crate) fn set_background(&mut self, image: RgbaImage) {
        self.background = Some(image);
        self.state = BlockState::BackgroundReady;
    }

    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[must_use]
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    #[must_use]
    pub fn rect(&self) -> BlockRect {
        self.rect
    }

    #[must_use]
    pub fn state(&self) -> BlockState {
        self.state
    }

    #[must_use]
    pub fn background(&self) -> Option<&RgbaImage> {
        self.background.as_ref()
    }
}
