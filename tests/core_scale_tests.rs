use approx::assert_abs_diff_eq;
use forecast_viz::ChartError;
use forecast_viz::core::primitives::decimals_to_series;
use forecast_viz::core::{DataPoint, ValueRange, Viewport};
use rust_decimal::Decimal;

#[test]
fn value_range_normalize_round_trip_within_tolerance() {
    let range = ValueRange::new(10.0, 110.0).expect("valid range");

    let original = 42.5;
    let unit = range.normalize(original);
    assert_abs_diff_eq!(unit, 0.325, epsilon = 1e-12);
    assert_abs_diff_eq!(range.denormalize(unit), original, epsilon = 1e-9);

    // Outside values are not clamped.
    assert_abs_diff_eq!(range.normalize(210.0), 2.0, epsilon = 1e-12);
}

#[test]
fn degenerate_range_maps_to_center() {
    let range = ValueRange::point(5.0);
    assert!(range.is_degenerate());
    assert_abs_diff_eq!(range.normalize(5.0), 0.5);
    assert_abs_diff_eq!(range.normalize(-100.0), 0.5);
}

#[test]
fn invalid_ranges_are_rejected() {
    assert!(ValueRange::new(2.0, 1.0).is_err());
    assert!(ValueRange::new(f64::NAN, 1.0).is_err());
    assert!(ValueRange::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn spanning_ignores_non_finite_samples() {
    let a = [3.0, f64::NAN, 9.0];
    let b = [f64::NEG_INFINITY, -1.0];
    let range = ValueRange::spanning([a.as_slice(), b.as_slice()]).expect("finite samples");
    assert_abs_diff_eq!(range.min(), -1.0);
    assert_abs_diff_eq!(range.max(), 9.0);

    assert!(ValueRange::from_values(&[f64::NAN]).is_none());
    assert!(ValueRange::from_values(&[]).is_none());
}

#[test]
fn viewport_padding_shrinks_the_plot() {
    let viewport = Viewport::metric_card();
    assert!(viewport.is_valid());
    assert_abs_diff_eq!(viewport.plot_width(), 464.0);
    assert_abs_diff_eq!(viewport.plot_height(), 224.0);
}

#[test]
fn invalid_viewport_is_rejected() {
    assert!(Viewport::new(0, 0).validate().is_err());

    let err = Viewport::new(60, 40).with_padding(20).validate().expect_err("padding");
    assert!(matches!(
        err,
        ChartError::InvalidViewport {
            width: 60,
            height: 40,
            padding: 20
        }
    ));
    assert_abs_diff_eq!(Viewport::new(60, 40).with_padding(20).plot_height(), 0.0);
}

#[test]
fn decimal_readings_convert_to_series() {
    let readings = [Decimal::new(12_345, 2), Decimal::new(-5, 1)];
    let series = decimals_to_series(&readings).expect("convert");
    assert_abs_diff_eq!(series[0], 123.45, epsilon = 1e-9);
    assert_abs_diff_eq!(series[1], -0.5, epsilon = 1e-9);

    let point = DataPoint::from_decimal(Decimal::new(1, 1), Decimal::ONE).expect("point");
    assert_abs_diff_eq!(point.x, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(point.y, 1.0, epsilon = 1e-12);
    assert_eq!(DataPoint::from((0.5, 0.25)), DataPoint::new(0.5, 0.25));
}
