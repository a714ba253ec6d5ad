mod background_sync;
mod blocks;
mod scheduler;

pub use background_sync::{BlurJob, BlurOutcome};
pub use blocks::{BlockId, BlockState, EventBlock};
pub use scheduler::{RedrawPass, RedrawScheduler};

use image::RgbaImage;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{TimeInterval, TrackMetrics, map_interval};
use crate::error::{TimelineError, TimelineResult};
use crate::snapshot::{BackgroundSnapshot, BlurBackend, SnapshotSource};

/// Scrollable ancestor hosting the track.
///
/// The engine pulls the current offset during synchronization passes, so the
/// host is the single source of truth for scroll position; notifications
/// arrive separately through [`TimelineEngine::notify_scroll_changed`].
pub trait ScrollHost {
    /// Current horizontal scroll offset in track pixels.
    fn scroll_offset(&self) -> f64;

    /// Asks the host to schedule a repaint, which should eventually call
    /// [`TimelineEngine::run_pending_passes`].
    fn request_redraw(&mut self);

    /// Invoked at most once per engine, before the first block build.
    /// Hosts wire their scroll-changed signal to
    /// [`TimelineEngine::notify_scroll_changed`] here.
    fn begin_scroll_notifications(&mut self) {}
}

/// Opaque reference to the host's per-block layout template.
///
/// The engine never interprets the identifier; it only enforces that one was
/// supplied before any block can be built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTemplate(String);

impl CellTemplate {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Construction-time configuration, typically delivered through the host's
/// styling mechanism.
///
/// The cell template and background image are required; building an engine
/// without them fails fast rather than yielding a partially-initialized
/// widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    pub track: TrackMetrics,
    pub blur_sigma: f32,
    pub cell_template: Option<CellTemplate>,
    #[serde(skip)]
    pub background_image: Option<RgbaImage>,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            track: TrackMetrics::default(),
            blur_sigma: 8.0,
            cell_template: None,
            background_image: None,
        }
    }

    #[must_use]
    pub fn with_track(mut self, track: TrackMetrics) -> Self {
        self.track = track;
        self
    }

    #[must_use]
    pub fn with_blur_sigma(mut self, blur_sigma: f32) -> Self {
        self.blur_sigma = blur_sigma;
        self
    }

    #[must_use]
    pub fn with_cell_template(mut self, template: CellTemplate) -> Self {
        self.cell_template = Some(template);
        self
    }

    #[must_use]
    pub fn with_background_image(mut self, image: RgbaImage) -> Self {
        self.background_image = Some(image);
        self
    }

    /// Decodes an encoded image resource into the background slot.
    ///
    /// Decode failures propagate; a broken resource is a configuration
    /// error, never silently replaced by a default.
    pub fn with_background_bytes(mut self, bytes: &[u8]) -> TimelineResult<Self> {
        let decoded = image::load_from_memory(bytes)?;
        self.background_image = Some(decoded.to_rgba8());
        Ok(self)
    }

    /// Parses the serializable part of the configuration from JSON.
    ///
    /// The background image is not part of the JSON surface and must be
    /// attached afterwards via the builder methods.
    pub fn from_json(json: &str) -> TimelineResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| TimelineError::InvalidData(format!("config parse error: {err}")))
    }
}

/// Controller for one day track: owns the block registry, the shared
/// background snapshot and the deferred-pass scheduler.
///
/// All methods are meant to run on the host's UI thread; the only
/// cross-thread handoff is a completed [`BlurJob`] re-entering through
/// [`TimelineEngine::complete_blur`].
pub struct TimelineEngine<H: ScrollHost> {
    track: TrackMetrics,
    blur_sigma: f32,
    cell_template: CellTemplate,
    background_image: RgbaImage,
    host: Option<H>,
    snapshot_source: Option<Box<dyn SnapshotSource>>,
    snapshot: Option<BackgroundSnapshot>,
    blocks: IndexMap<BlockId, EventBlock>,
    scheduler: RedrawScheduler,
    generation: u64,
    next_block_id: u64,
    scroll_listener_registered: bool,
}

impl<H: ScrollHost> TimelineEngine<H> {
    pub fn new(config: TimelineEngineConfig) -> TimelineResult<Self> {
        let track = config.track.validate()?;
        let cell_template = config
            .cell_template
            .ok_or(TimelineError::MissingCellTemplate)?;
        let background_image = config
            .background_image
            .ok_or(TimelineError::MissingBackgroundImage)?;

        if background_image.width() == 0 || background_image.height() == 0 {
            return Err(TimelineError::MissingBackgroundImage);
        }

        Ok(Self {
            track,
            blur_sigma: config.blur_sigma,
            cell_template,
            background_image,
            host: None,
            snapshot_source: None,
            snapshot: None,
            blocks: IndexMap::new(),
            scheduler: RedrawScheduler::default(),
            generation: 0,
            next_block_id: 0,
            scroll_listener_registered: false,
        })
    }

    /// Binds the scrollable ancestor. Must precede any effective
    /// [`TimelineEngine::set_events`] call.
    pub fn attach_host(&mut self, host: H) {
        self.host = Some(host);
    }

    /// Unbinds the scrollable ancestor, dropping all blocks.
    ///
    /// The cached snapshot survives detachment; it is only released when the
    /// engine itself is dropped.
    pub fn detach_host(&mut self) -> Option<H> {
        self.blocks.clear();
        self.generation += 1;
        self.scroll_listener_registered = false;
        self.host.take()
    }

    /// Installs the capture collaborator used for the lazy snapshot.
    /// Without one, the snapshot falls back to the configured background
    /// image.
    pub fn set_snapshot_source(&mut self, source: Box<dyn SnapshotSource>) {
        self.snapshot_source = Some(source);
    }

    /// Replaces the block set with one block per interval, in order.
    ///
    /// Without an attached scroll host this is a silent no-op and the
    /// intervals are dropped, mirroring the widget contract; existing blocks
    /// are left untouched in that case. Duplicated intervals produce
    /// distinct blocks.
    pub fn set_events(&mut self, intervals: &[TimeInterval]) {
        let Some(host) = self.host.as_mut() else {
            debug!(
                count = intervals.len(),
                "set_events without a scroll host is a no-op; intervals dropped"
            );
            return;
        };

        self.blocks.clear();
        self.generation += 1;
        for interval in intervals.iter().copied() {
            let id = BlockId::new(self.next_block_id);
            self.next_block_id += 1;
            self.blocks.insert(id, EventBlock::new(id, interval));
        }

        // Register for scroll notifications only once per engine, no matter
        // how many times the events are replaced.
        if !self.scroll_listener_registered {
            host.begin_scroll_notifications();
            self.scroll_listener_registered = true;
        }

        self.scheduler.request_layout();
        self.scheduler.request_background_sync();
        host.request_redraw();
    }

    /// Scroll-change signal entry point.
    pub fn notify_scroll_changed(&mut self) {
        let Some(host) = self.host.as_mut() else {
            return;
        };

        self.scheduler.request_background_sync();
        host.request_redraw();
    }

    /// Drains the deferred passes in order: layout, then background sync.
    ///
    /// Returns the blur jobs emitted by the sync pass; the host runs them
    /// (inline or off-thread) and hands each result back through
    /// [`TimelineEngine::complete_blur`].
    pub fn run_pending_passes(&mut self) -> TimelineResult<Vec<BlurJob>> {
        let mut jobs = Vec::new();
        for pass in self.scheduler.drain() {
            match pass {
                RedrawPass::Layout => self.run_layout_pass(),
                RedrawPass::BackgroundSync => jobs.extend(self.run_background_sync_pass()?),
            }
        }
        Ok(jobs)
    }

    /// Runs the pending passes and completes every blur job inline.
    /// Convenience for synchronous hosts and tests.
    pub fn run_passes_with(&mut self, backend: &impl BlurBackend) -> TimelineResult<()> {
        for job in self.run_pending_passes()? {
            let outcome = job.resolve(backend);
            let _ = self.complete_blur(outcome);
        }
        Ok(())
    }

    fn run_layout_pass(&mut self) {
        let track = self.track;
        for block in self.blocks.values_mut() {
            let interval = block.interval();
            block.position(map_interval(interval, track));
        }
    }

    #[must_use]
    pub fn blocks(&self) -> impl Iterator<Item = &EventBlock> {
        self.blocks.values()
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn track(&self) -> TrackMetrics {
        self.track
    }

    #[must_use]
    pub fn cell_template(&self) -> &CellTemplate {
        &self.cell_template
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn scroll_offset(&self) -> Option<f64> {
        self.host.as_ref().map(ScrollHost::scroll_offset)
    }

    #[must_use]
    pub fn snapshot_captured(&self) -> bool {
        self.snapshot.is_some()
    }

    #[must_use]
    pub fn has_pending_passes(&self) -> bool {
        self.scheduler.has_pending()
    }

    #[must_use]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    #[must_use]
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }
}
