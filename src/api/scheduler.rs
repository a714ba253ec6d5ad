use smallvec::SmallVec;

/// Deferred work executed on the next UI tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawPass {
    Layout,
    BackgroundSync,
}

/// Coalescing queue of deferred redraw passes.
///
/// Repeated requests collapse into one pending pass, and a drain always
/// yields layout before background sync so blocks are positioned before
/// their first crop is computed.
#[derive(Debug, Default, Clone, Copy)]
pub struct RedrawScheduler {
    layout_pending: bool,
    background_sync_pending: bool,
}

impl RedrawScheduler {
    pub fn request_layout(&mut self) {
        self.layout_pending = true;
    }

    pub fn request_background_sync(&mut self) {
        self.background_sync_pending = true;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.layout_pending || self.background_sync_pending
    }

    pub fn drain(&mut self) -> SmallVec<[RedrawPass; 2]> {
        let mut passes = SmallVec::new();
        if self.layout_pending {
            passes.push(RedrawPass::Layout);
        }
        if self.background_sync_pending {
            passes.push(RedrawPass::BackgroundSync);
        }
        self.layout_pending = false;
        self.background_sync_pending = false;
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::{RedrawPass, RedrawScheduler};

    #[test]
    fn layout_drains_before_background_sync() {
        let mut scheduler = RedrawScheduler::default();
        scheduler.request_background_sync();
        scheduler.request_layout();

        let passes = scheduler.drain();
        assert_eq!(
            passes.as_slice(),
            [RedrawPass::Layout, RedrawPass::BackgroundSync]
        );
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn repeated_requests_coalesce() {
        let mut scheduler = RedrawScheduler::default();
        scheduler.request_background_sync();
        scheduler.request_background_sync();

        assert_eq!(scheduler.drain().as_slice(), [RedrawPass::BackgroundSync]);
        assert!(scheduler.drain().is_empty());
    }
}
