use forecast_viz::core::{Viewport, bucket_histogram, project_bucket_bars};
use proptest::prelude::*;

proptest! {
    #[test]
    fn bucket_counts_sum_to_input_length(
        errors in proptest::collection::vec(0.0f64..1_000.0, 0..128),
        bucket_count in 1usize..24
    ) {
        let buckets = bucket_histogram(&errors, bucket_count);

        prop_assert_eq!(buckets.len(), bucket_count);
        prop_assert_eq!(buckets.iter().sum::<usize>(), errors.len());
        if !errors.is_empty() && errors.iter().any(|e| *e > 0.0) {
            // The largest error always lands in the last bucket.
            prop_assert!(buckets[bucket_count - 1] >= 1);
        }
    }

    #[test]
    fn bucket_bars_stay_inside_the_plot(
        counts in proptest::collection::vec(0usize..50, 1..16),
        gap in 0.0f64..40.0
    ) {
        let viewport = Viewport::new(520, 280).with_padding(28);
        let bars = project_bucket_bars(&counts, viewport, gap);

        prop_assert_eq!(bars.len(), counts.len());
        for bar in &bars {
            prop_assert!(bar.x_left >= -1e-9);
            prop_assert!(bar.x_left <= bar.x_right + 1e-9);
            prop_assert!(bar.x_right <= viewport.plot_width() + 1e-9);
            prop_assert!(bar.y_top >= -1e-9);
            prop_assert!(bar.y_top <= bar.y_bottom + 1e-9);
        }
    }
}
