use crate::core::{PathCommand, Viewport};

/// Closes a projected line against the plot bottom to form a fill polygon.
///
/// The polygon starts on the baseline under the first point, follows the
/// line, drops to the baseline under the last point and ends with an
/// explicit `Close`. Lines with fewer than two points have no area.
#[must_use]
pub fn project_area(line: &[PathCommand], viewport: Viewport) -> Vec<PathCommand> {
    let points: Vec<(f64, f64)> = line.iter().filter_map(|command| command.point()).collect();
    if points.len() < 2 {
        return Vec::new();
    }

    let baseline_y = viewport.plot_height();
    let first_x = points[0].0;
    let last_x = points[points.len() - 1].0;

    let mut polygon = Vec::with_capacity(points.len() + 3);
    polygon.push(PathCommand::MoveTo {
        x: first_x,
        y: baseline_y,
    });
    polygon.extend(points.iter().map(|&(x, y)| PathCommand::LineTo { x, y }));
    polygon.push(PathCommand::LineTo {
        x: last_x,
        y: baseline_y,
    });
    polygon.push(PathCommand::Close);
    polygon
}
