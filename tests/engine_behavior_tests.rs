use image::RgbaImage;
use timeslot_rs::TimelineEngine;
use timeslot_rs::api::{BlockState, CellTemplate, ScrollHost, TimelineEngineConfig};
use timeslot_rs::core::{TimeInterval, TrackMetrics};
use timeslot_rs::snapshot::PassthroughBlur;

#[derive(Debug, Default)]
struct MockHost {
    offset: f64,
    redraw_requests: usize,
    scroll_subscriptions: usize,
}

impl ScrollHost for MockHost {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    fn begin_scroll_notifications(&mut self) {
        self.scroll_subscriptions += 1;
    }
}

fn engine() -> TimelineEngine<MockHost> {
    let config = TimelineEngineConfig::new()
        .with_track(TrackMetrics {
            hour_width: 100.0,
            track_height: 400.0,
            block_vertical_fraction: 0.5,
        })
        .with_cell_template(CellTemplate::new("event-cell"))
        .with_background_image(RgbaImage::new(1200, 200));
    TimelineEngine::new(config).expect("valid config")
}

fn intervals(ranges: &[(u32, u32)]) -> Vec<TimeInterval> {
    ranges
        .iter()
        .map(|&(start, end)| TimeInterval::from_minutes(start * 60, end * 60))
        .collect()
}

#[test]
fn set_events_without_host_is_a_silent_no_op() {
    let mut engine = engine();
    engine.set_events(&intervals(&[(2, 4), (6, 10)]));

    assert_eq!(engine.block_count(), 0);
    assert!(!engine.has_pending_passes());
}

#[test]
fn set_events_builds_one_block_per_interval_in_order() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());
    engine.set_events(&intervals(&[(2, 4), (6, 10), (12, 15), (18, 21)]));
    engine.run_passes_with(&PassthroughBlur).expect("passes");

    assert_eq!(engine.block_count(), 4);
    let lefts: Vec<f64> = engine.blocks().map(|block| block.rect().left).collect();
    assert_eq!(lefts, [200.0, 600.0, 1200.0, 1800.0]);
}

#[test]
fn duplicate_intervals_produce_distinct_blocks() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());
    engine.set_events(&intervals(&[(2, 4), (2, 4)]));

    assert_eq!(engine.block_count(), 2);
    let ids: Vec<_> = engine.blocks().map(|block| block.id()).collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn second_set_events_replaces_rather_than_appends() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());

    engine.set_events(&intervals(&[(2, 4), (6, 10), (12, 15)]));
    assert_eq!(engine.block_count(), 3);

    engine.set_events(&intervals(&[(8, 9)]));
    assert_eq!(engine.block_count(), 1);
}

#[test]
fn empty_event_list_clears_all_blocks() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());

    engine.set_events(&intervals(&[(2, 4), (6, 10)]));
    engine.set_events(&[]);

    assert_eq!(engine.block_count(), 0);
}

#[test]
fn scroll_notifications_are_registered_once_per_engine() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());

    engine.set_events(&intervals(&[(2, 4)]));
    engine.set_events(&intervals(&[(6, 10)]));
    engine.set_events(&[]);

    let host = engine.host().expect("attached host");
    assert_eq!(host.scroll_subscriptions, 1);
    assert!(host.redraw_requests >= 3);
}

#[test]
fn scroll_change_schedules_a_sync_pass_and_a_redraw() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());
    engine.set_events(&intervals(&[(2, 4)]));
    engine.run_passes_with(&PassthroughBlur).expect("passes");
    assert!(!engine.has_pending_passes());

    let redraws_before = engine.host().expect("host").redraw_requests;
    engine.notify_scroll_changed();

    assert!(engine.has_pending_passes());
    assert_eq!(engine.host().expect("host").redraw_requests, redraws_before + 1);
}

#[test]
fn blocks_walk_the_background_state_machine() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());
    engine.set_events(&intervals(&[(2, 4)]));

    let states: Vec<_> = engine.blocks().map(|block| block.state()).collect();
    assert_eq!(states, [BlockState::Created]);

    let jobs = engine.run_pending_passes().expect("passes");
    assert_eq!(jobs.len(), 1);
    let states: Vec<_> = engine.blocks().map(|block| block.state()).collect();
    assert_eq!(states, [BlockState::BackgroundPending]);

    let applied = engine.complete_blur(jobs[0].clone().resolve(&PassthroughBlur));
    assert!(applied);
    let states: Vec<_> = engine.blocks().map(|block| block.state()).collect();
    assert_eq!(states, [BlockState::BackgroundReady]);
}

#[test]
fn ready_blocks_return_to_pending_on_the_next_scroll_tick() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());
    engine.set_events(&intervals(&[(2, 4)]));
    engine.run_passes_with(&PassthroughBlur).expect("passes");

    engine.notify_scroll_changed();
    let jobs = engine.run_pending_passes().expect("passes");

    assert_eq!(jobs.len(), 1);
    let states: Vec<_> = engine.blocks().map(|block| block.state()).collect();
    assert_eq!(states, [BlockState::BackgroundPending]);
}

#[test]
fn detaching_the_host_tears_down_all_blocks() {
    let mut engine = engine();
    engine.attach_host(MockHost::default());
    engine.set_events(&intervals(&[(2, 4), (6, 10)]));

    let host = engine.detach_host();
    assert!(host.is_some());
    assert_eq!(engine.block_count(), 0);

    // Detached again, set_events is back to the silent no-op.
    engine.set_events(&intervals(&[(2, 4)]));
    assert_eq!(engine.block_count(), 0);
}
