use forecast_viz::core::{MultiSeries, Viewport, project_line, project_multi_series};
use proptest::prelude::*;

proptest! {
    #[test]
    fn projected_commands_match_points_and_stay_in_plot(
        values in proptest::collection::vec(-10_000.0f64..10_000.0, 2..64),
        width in 50u32..2_000,
        height in 50u32..2_000,
        padding in 0u32..24
    ) {
        let viewport = Viewport::new(width, height).with_padding(padding);
        let commands = project_line(&values, viewport);

        prop_assert_eq!(commands.len(), values.len());
        prop_assert!(commands[0].is_move());
        for command in &commands[1..] {
            prop_assert!(command.is_line());
        }

        for command in &commands {
            let (x, y) = command.point().expect("line commands carry a point");
            prop_assert!(x.is_finite() && y.is_finite());
            prop_assert!(x >= -1e-9 && x <= f64::from(width) + 1e-9);
            prop_assert!(y >= -1e-9 && y <= f64::from(height) + 1e-9);
            prop_assert!(x <= viewport.plot_width() + 1e-9);
            prop_assert!(y <= viewport.plot_height() + 1e-9);
        }
    }

    #[test]
    fn constant_series_projects_to_identical_y(
        value in -1_000.0f64..1_000.0,
        len in 1usize..48
    ) {
        let viewport = Viewport::new(640, 360);
        let commands = project_line(&vec![value; len], viewport);
        prop_assert_eq!(commands.len(), len);

        let center = viewport.plot_height() * 0.5;
        for command in &commands {
            let (_, y) = command.point().expect("point");
            prop_assert!((y - center).abs() <= 1e-9);
        }
    }

    #[test]
    fn shared_range_keeps_equal_values_at_equal_heights(
        actual in proptest::collection::vec(0.0f64..500.0, 2..32),
        offset in -50.0f64..50.0
    ) {
        let forecast: Vec<f64> = actual.iter().map(|v| v + offset).collect();
        let series = MultiSeries::shared(vec![actual.clone(), actual.clone(), forecast]);
        let paths = project_multi_series(&series, Viewport::forecast_card());

        prop_assert_eq!(paths.len(), 3);
        for (left, right) in paths[0].iter().zip(&paths[1]) {
            prop_assert_eq!(left, right);
        }
        prop_assert_eq!(paths[2].len(), actual.len());
    }

    #[test]
    fn series_drawn_together_share_x_at_each_index(
        first in proptest::collection::vec(-100.0f64..100.0, 1..40),
        second in proptest::collection::vec(-100.0f64..100.0, 1..40),
        independent in any::<bool>()
    ) {
        let sets = vec![first, second];
        let series = if independent {
            MultiSeries::Independent(sets)
        } else {
            MultiSeries::shared(sets)
        };
        let paths = project_multi_series(&series, Viewport::forecast_card());

        for (left, right) in paths[0].iter().zip(&paths[1]) {
            let (left_x, _) = left.point().expect("point");
            let (right_x, _) = right.point().expect("point");
            prop_assert!((left_x - right_x).abs() <= 1e-9);
        }
    }
}
