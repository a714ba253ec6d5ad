use image::RgbaImage;
use tracing::{debug, warn};

use crate::core::crop_for_block;
use crate::error::TimelineResult;
use crate::snapshot::{BackgroundSnapshot, BlurBackend};

use super::{BlockId, BlockState, ScrollHost, TimelineEngine};

/// Work order for the opaque blur step.
///
/// The host may execute it off the UI thread; the carried generation lets
/// the engine drop results that complete after their block is gone.
#[derive(Debug, Clone)]
pub struct BlurJob {
    pub block_id: BlockId,
    pub generation: u64,
    pub image: RgbaImage,
    pub sigma: f32,
}

impl BlurJob {
    /// Runs the blur and packages the result for the UI-thread handoff.
    #[must_use]
    pub fn resolve(self, backend: &impl BlurBackend) -> BlurOutcome {
        let image = backend.blur(&self.image, self.sigma);
        BlurOutcome {
            block_id: self.block_id,
            generation: self.generation,
            image,
        }
    }
}

/// Completed blur handed back to the engine on the UI thread.
#[derive(Debug, Clone)]
pub struct BlurOutcome {
    pub block_id: BlockId,
    pub generation: u64,
    pub image: RgbaImage,
}

impl<H: ScrollHost> TimelineEngine<H> {
    /// Recomputes every block's background crop against the current scroll
    /// offset and emits one blur job per visible block.
    ///
    /// A degenerate crop or a failed extraction skips that block only; one
    /// bad block never aborts the pass. Only snapshot capture failure
    /// propagates.
    pub(super) fn run_background_sync_pass(&mut self) -> TimelineResult<Vec<BlurJob>> {
        let Some(host) = self.host.as_ref() else {
            return Ok(Vec::new());
        };
        let scroll_offset = host.scroll_offset();

        self.ensure_snapshot()?;
        let Some(snapshot) = self.snapshot.as_ref() else {
            return Ok(Vec::new());
        };

        let snapshot_size = snapshot.size();
        let track_width = self.track.track_width();
        let track_height = self.track.track_height;

        let mut jobs = Vec::new();
        for block in self.blocks.values() {
            if block.state() == BlockState::Created {
                // Not yet laid out; the pending layout pass will position it
                // before the next sync.
                continue;
            }

            let Some(crop) = crop_for_block(
                block.rect(),
                scroll_offset,
                track_width,
                track_height,
                snapshot_size,
            ) else {
                debug!(block = block.id().raw(), "crop collapsed after clamping; skipping");
                continue;
            };

            match snapshot.extract(crop) {
                Ok(image) => jobs.push(BlurJob {
                    block_id: block.id(),
                    generation: self.generation,
                    image,
                    sigma: self.blur_sigma,
                }),
                Err(err) => {
                    warn!(block = block.id().raw(), error = %err, "crop extraction failed; skipping block");
                }
            }
        }

        for job in &jobs {
            if let Some(block) = self.blocks.get_mut(&job.block_id) {
                block.mark_background_pending();
            }
        }

        Ok(jobs)
    }

    /// Applies a completed blur if its block is still alive.
    ///
    /// Returns `false` (and leaves all state untouched) when the result is
    /// stale: the event set was replaced, the host was detached, or the
    /// block no longer exists.
    pub fn complete_blur(&mut self, outcome: BlurOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                block = outcome.block_id.raw(),
                job_generation = outcome.generation,
                current_generation = self.generation,
                "stale blur result dropped"
            );
            return false;
        }

        let Some(block) = self.blocks.get_mut(&outcome.block_id) else {
            debug!(block = outcome.block_id.raw(), "blur result for removed block dropped");
            return false;
        };

        block.set_background(outcome.image);
        true
    }

    /// Captures the shared snapshot lazily, once per engine lifetime.
    ///
    /// Prefers the attached capture collaborator; without one the configured
    /// background image stands in for the captured content.
    fn ensure_snapshot(&mut self) -> TimelineResult<()> {
        if self.snapshot.is_some() {
            return Ok(());
        }

        let image = match self.snapshot_source.as_mut() {
            Some(source) => source.capture()?,
            None => self.background_image.clone(),
        };
        self.snapshot = Some(BackgroundSnapshot::new(image)?);
        Ok(())
    }
}
