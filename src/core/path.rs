use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One draw command of a projected path, in plot-local pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Close,
}

impl PathCommand {
    #[must_use]
    pub fn point(self) -> Option<(f64, f64)> {
        match self {
            Self::MoveTo { x, y } | Self::LineTo { x, y } => Some((x, y)),
            Self::Close => None,
        }
    }

    #[must_use]
    pub fn is_move(self) -> bool {
        matches!(self, Self::MoveTo { .. })
    }

    #[must_use]
    pub fn is_line(self) -> bool {
        matches!(self, Self::LineTo { .. })
    }
}

/// Builds the `move, line, line, ...` sequence for already mapped points.
pub(crate) fn polyline<I>(points: I) -> Vec<PathCommand>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    points
        .into_iter()
        .enumerate()
        .map(|(index, (x, y))| {
            if index == 0 {
                PathCommand::MoveTo { x, y }
            } else {
                PathCommand::LineTo { x, y }
            }
        })
        .collect()
}

/// Serializes commands as SVG path data, e.g. `M0,126 L232,0`.
#[must_use]
pub fn to_svg_path_data(commands: &[PathCommand]) -> String {
    let mut out = String::with_capacity(commands.len() * 12);
    for (index, command) in commands.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = match command {
            PathCommand::MoveTo { x, y } => write!(out, "M{x},{y}"),
            PathCommand::LineTo { x, y } => write!(out, "L{x},{y}"),
            PathCommand::Close => write!(out, "Z"),
        };
    }
    out
}
