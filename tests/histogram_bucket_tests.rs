use approx::assert_abs_diff_eq;
use forecast_viz::core::{
    DEFAULT_BUCKET_COUNT, Viewport, absolute_errors, bucket_histogram, project_bucket_bars,
};

#[test]
fn absolute_errors_cover_the_common_prefix() {
    let errors = absolute_errors(&[120.0, 130.0, 125.0, 140.0], &[118.0, 127.0, 123.0]);
    assert_eq!(errors, vec![2.0, 3.0, 2.0]);
}

#[test]
fn forecast_errors_fill_expected_buckets() {
    let errors = absolute_errors(&[120.0, 130.0, 125.0, 140.0], &[118.0, 127.0, 123.0, 138.0]);
    let buckets = bucket_histogram(&errors, DEFAULT_BUCKET_COUNT);

    // max error 3: 2/3 * 6 = 4, and 3/3 * 6 = 6 clamps into bucket 5.
    assert_eq!(buckets.as_slice(), &[0, 0, 0, 0, 3, 1]);
}

#[test]
fn all_zero_errors_normalize_by_one() {
    let buckets = bucket_histogram(&[0.0, 0.0, 0.0], 6);
    assert_eq!(buckets.as_slice(), &[3, 0, 0, 0, 0, 0]);
}

#[test]
fn empty_errors_and_zero_buckets_are_defined() {
    assert_eq!(bucket_histogram(&[], 4).as_slice(), &[0, 0, 0, 0]);
    assert!(bucket_histogram(&[1.0, 2.0], 0).is_empty());
}

#[test]
fn non_finite_errors_land_in_the_first_bucket() {
    let buckets = bucket_histogram(&[f64::NAN, 1.0, 2.0], 2);
    assert_eq!(buckets.as_slice(), &[1, 2]);
}

#[test]
fn bucket_bars_scale_to_the_tallest_bucket() {
    let viewport = Viewport::new(600, 120);
    let bars = project_bucket_bars(&[1, 0, 2], viewport, 8.0);

    assert_eq!(bars.len(), 3);
    assert_abs_diff_eq!(bars[0].x_left, 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[0].x_right, 196.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[0].height(), 60.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[1].height(), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[2].y_top, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bars[2].y_bottom, 120.0, epsilon = 1e-9);
    assert_eq!(bars[2].count, 2);
}

#[test]
fn bucket_bars_for_all_zero_counts_are_flat() {
    let bars = project_bucket_bars(&[0, 0], Viewport::new(100, 100), 4.0);
    assert!(bars.iter().all(|bar| bar.height() == 0.0));
    assert!(project_bucket_bars(&[], Viewport::new(100, 100), 4.0).is_empty());
}
