use approx::assert_abs_diff_eq;
use forecast_viz::core::project_intensity_grid;

#[test]
fn confusion_matrix_yields_percentages_and_intensities() {
    let matrix = vec![vec![40.0, 5.0], vec![3.0, 52.0]];
    let grid = project_intensity_grid(&matrix, &["Normal", "Anomaly"]).expect("grid");

    assert_eq!(grid.size(), 2);
    assert_abs_diff_eq!(grid.total, 100.0);
    assert_abs_diff_eq!(grid.max, 52.0);

    let percentages: Vec<f64> = grid
        .rows
        .iter()
        .flatten()
        .map(|cell| cell.percentage())
        .collect();
    for (actual, expected) in percentages.iter().zip([40.0, 5.0, 3.0, 52.0]) {
        assert_abs_diff_eq!(*actual, expected, epsilon = 1e-9);
    }

    let strongest = grid.cell(1, 1).expect("cell");
    assert_abs_diff_eq!(strongest.intensity, 1.0);
    for cell in grid.rows.iter().flatten() {
        assert!(cell.intensity <= strongest.intensity);
    }
    assert_abs_diff_eq!(grid.cell(0, 0).expect("cell").intensity, 40.0 / 52.0);
}

#[test]
fn zero_matrix_has_zero_ratios() {
    let grid = project_intensity_grid(&[vec![0.0, 0.0], vec![0.0, 0.0]], &["a", "b"])
        .expect("grid");
    for cell in grid.rows.iter().flatten() {
        assert_abs_diff_eq!(cell.intensity, 0.0);
        assert_abs_diff_eq!(cell.share, 0.0);
    }
}

#[test]
fn empty_matrix_is_an_empty_grid() {
    let labels: [&str; 0] = [];
    let grid = project_intensity_grid(&[], &labels).expect("grid");
    assert_eq!(grid.size(), 0);
    assert!(grid.cell(0, 0).is_none());
}

#[test]
fn structural_mismatches_are_rejected() {
    let err = project_intensity_grid(&[vec![1.0, 2.0], vec![3.0]], &["a", "b"])
        .expect_err("ragged row");
    assert!(format!("{err}").contains("row 1"));

    let err = project_intensity_grid(&[vec![1.0]], &["a", "b"]).expect_err("label count");
    assert!(format!("{err}").contains("expects 1 labels"));
}

#[test]
fn labels_are_kept_in_order() {
    let labels = vec!["Normal".to_owned(), "Anomaly".to_owned()];
    let matrix = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    let grid = project_intensity_grid(&matrix, labels.as_slice()).expect("grid");
    assert_eq!(grid.labels, labels);
}

#[test]
fn non_finite_cells_do_not_poison_the_ratios() {
    let matrix = vec![vec![40.0, f64::NAN], vec![f64::INFINITY, 60.0]];
    let grid = project_intensity_grid(&matrix, &["a", "b"]).expect("grid");

    assert_abs_diff_eq!(grid.max, 60.0);
    assert_abs_diff_eq!(grid.total, 100.0);
    assert_abs_diff_eq!(grid.cell(1, 1).expect("cell").intensity, 1.0);
    assert_abs_diff_eq!(grid.cell(0, 0).expect("cell").percentage(), 40.0, epsilon = 1e-9);
    for (row, column) in [(0, 1), (1, 0)] {
        let cell = grid.cell(row, column).expect("cell");
        assert_abs_diff_eq!(cell.intensity, 0.0);
        assert_abs_diff_eq!(cell.share, 0.0);
    }
}
