use approx::assert_relative_eq;
use proptest::prelude::*;
use timeslot_rs::core::{BlockRect, PixelSize, TimeInterval, TrackMetrics, crop_for_block,
    map_interval};

fn metrics(hour_width: f64) -> TrackMetrics {
    TrackMetrics {
        hour_width,
        track_height: 400.0,
        block_vertical_fraction: 0.5,
    }
}

proptest! {
    #[test]
    fn mapper_matches_the_minute_width_formulas(
        start in 0u32..=1440,
        end in 0u32..=1440,
        hour_width in 1.0f64..500.0
    ) {
        let rect = map_interval(TimeInterval::from_minutes(start, end), metrics(hour_width));

        let minute_width = hour_width / 60.0;
        let x1 = (minute_width * f64::from(start)).round();
        let x2 = (minute_width * f64::from(end)).round();

        assert_relative_eq!(rect.left, x1.min(x2));
        assert_relative_eq!(rect.width, (x2 - x1).abs());
        prop_assert!(rect.left >= 0.0);
        prop_assert!(rect.width >= 0.0);
    }

    #[test]
    fn reversed_intervals_map_to_the_same_rectangle(
        start in 0u32..=1440,
        end in 0u32..=1440,
        hour_width in 1.0f64..500.0
    ) {
        let forward = map_interval(TimeInterval::from_minutes(start, end), metrics(hour_width));
        let reversed = map_interval(TimeInterval::from_minutes(end, start), metrics(hour_width));

        prop_assert_eq!(forward, reversed);
    }

    #[test]
    fn wider_hours_never_shrink_a_block(
        start in 0u32..=1440,
        len in 0u32..=720,
        hour_width in 1.0f64..250.0,
        growth in 1.0f64..4.0
    ) {
        let interval = TimeInterval::from_minutes(start, start + len);
        let narrow = map_interval(interval, metrics(hour_width));
        let wide = map_interval(interval, metrics(hour_width * growth));

        prop_assert!(wide.left >= narrow.left);
        prop_assert!(wide.width >= narrow.width);
    }

    #[test]
    fn crops_always_stay_inside_the_snapshot(
        left in -3000.0f64..6000.0,
        width in 0.0f64..2000.0,
        scroll in -5000.0f64..5000.0,
        snap_width in 1u32..4000,
        snap_height in 1u32..1000
    ) {
        let rect = BlockRect::new(left, 200.0, width, 200.0);
        let snapshot = PixelSize::new(snap_width, snap_height);

        if let Some(crop) = crop_for_block(rect, scroll, 2400.0, 400.0, snapshot) {
            prop_assert!(crop.width > 0 && crop.height > 0);
            prop_assert!(crop.x + crop.width <= snapshot.width);
            prop_assert!(crop.y + crop.height <= snapshot.height);
        }
    }
}
