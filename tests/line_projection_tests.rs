use approx::assert_abs_diff_eq;
use forecast_viz::core::{
    DataPoint, PathCommand, ValueRange, Viewport, project_line, project_line_with_range,
    project_unit_points, to_svg_path_data,
};

fn points(commands: &[PathCommand]) -> Vec<(f64, f64)> {
    commands.iter().filter_map(|command| command.point()).collect()
}

#[test]
fn line_projection_returns_empty_for_empty_series() {
    let commands = project_line(&[], Viewport::new(800, 600));
    assert!(commands.is_empty());
}

#[test]
fn single_sample_is_one_move_at_vertical_center() {
    let viewport = Viewport::new(520, 280).with_padding(28);
    let commands = project_line(&[42.0], viewport);

    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0], PathCommand::MoveTo { x: 0.0, y: 112.0 });
}

#[test]
fn line_projection_is_deterministic() {
    let viewport = Viewport::new(1000, 500);
    let commands = project_line(&[0.0, 5.0, 10.0], viewport);

    assert_eq!(commands.len(), 3);
    assert!(commands[0].is_move());
    assert!(commands[1].is_line());
    assert!(commands[2].is_line());

    let mapped = points(&commands);
    assert_abs_diff_eq!(mapped[0].0, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[0].1, 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[1].0, 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[1].1, 250.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[2].0, 1000.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[2].1, 0.0, epsilon = 1e-9);
}

#[test]
fn padding_shrinks_the_plot_area() {
    let viewport = Viewport::metric_card();
    assert_abs_diff_eq!(viewport.plot_width(), 464.0);
    assert_abs_diff_eq!(viewport.plot_height(), 224.0);

    let mapped = points(&project_line(&[0.68, 0.25], viewport));
    assert_abs_diff_eq!(mapped[0].0, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[0].1, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[1].0, 464.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[1].1, 224.0, epsilon = 1e-9);
}

#[test]
fn constant_series_is_a_flat_centered_line() {
    let viewport = Viewport::new(400, 200);
    let mapped = points(&project_line(&[7.0, 7.0, 7.0, 7.0], viewport));

    assert_eq!(mapped.len(), 4);
    for (_, y) in &mapped {
        assert_abs_diff_eq!(*y, 100.0, epsilon = 1e-9);
    }
}

#[test]
fn external_range_is_not_clamped() {
    let viewport = Viewport::new(100, 100);
    let range = ValueRange::new(0.0, 10.0).expect("range");
    let mapped = points(&project_line_with_range(&[-5.0, 20.0], range, viewport));

    assert_abs_diff_eq!(mapped[0].1, 150.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[1].1, -100.0, epsilon = 1e-9);
}

#[test]
fn series_without_finite_samples_still_emits_one_command_per_sample() {
    let commands = project_line(&[f64::NAN, f64::INFINITY], Viewport::new(100, 100));
    assert_eq!(commands.len(), 2);
}

#[test]
fn unit_points_map_straight_to_the_plot_area() {
    let viewport = Viewport::metric_card();
    let pr = [
        DataPoint::new(0.0, 0.1),
        DataPoint::new(0.5, 0.55),
        DataPoint::new(1.0, 0.9),
    ];

    let mapped = points(&project_unit_points(&pr, viewport));
    assert_abs_diff_eq!(mapped[0].0, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[0].1, 201.6, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[1].0, 232.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[1].1, 100.8, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[2].0, 464.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mapped[2].1, 22.4, epsilon = 1e-9);
}

#[test]
fn svg_path_data_uses_move_then_line_commands() {
    let commands = project_line(&[0.0, 10.0], Viewport::new(100, 50));
    assert_eq!(to_svg_path_data(&commands), "M0,50 L100,0");
    assert_eq!(to_svg_path_data(&[]), "");
}

#[test]
fn value_range_rejects_inverted_or_non_finite_bounds() {
    assert!(ValueRange::new(2.0, 1.0).is_err());
    assert!(ValueRange::new(f64::NAN, 1.0).is_err());

    let range = ValueRange::new(3.0, 3.0).expect("degenerate range is allowed");
    assert!(range.is_degenerate());
    assert_abs_diff_eq!(range.normalize(100.0), 0.5);
}

#[test]
fn viewport_validation_rejects_padding_that_swallows_the_plot() {
    assert!(Viewport::new(520, 280).with_padding(28).validate().is_ok());
    assert!(Viewport::new(0, 280).validate().is_err());

    let err = Viewport::new(50, 50)
        .with_padding(25)
        .validate()
        .expect_err("padding leaves no plot area");
    assert!(format!("{err}").contains("padding=25"));
}
