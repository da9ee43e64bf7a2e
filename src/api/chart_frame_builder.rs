use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AxisLayout, DataPoint, IntensityGrid, MultiSeries, Viewport, absolute_errors,
    bucket_histogram, project_area, project_bucket_bars, project_multi_series, unit_axis_ticks,
    value_axis_ticks,
};
use crate::render::{
    Color, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, Stroke, TextHAlign,
    TextPrimitive,
};

const CARD_CORNER_RADIUS: f64 = 10.0;
const TICK_LENGTH: f64 = 6.0;
const TICK_FONT_SIZE: f64 = 10.0;
const CELL_FONT_SIZE: f64 = 12.0;

/// Paint used by every chart card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub primary: Color,
    pub secondary: Color,
    pub card_fill: Color,
    pub card_border: Color,
    pub axis_line: Color,
    pub tick: Color,
    pub label: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            primary: Color::rgb8(0, 123, 255),
            secondary: Color::rgb8(16, 185, 129),
            card_fill: Color::WHITE,
            card_border: Color::rgba8(2, 6, 23, 0.06),
            axis_line: Color::rgb8(229, 231, 235),
            tick: Color::rgb8(148, 163, 184),
            label: Color::rgb8(100, 116, 139),
        }
    }
}

/// Prefixes of the confusion-matrix header cells, rendered as `"{prefix}: {label}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixHeaders {
    /// Column headers, one per predicted class.
    pub predicted: &'static str,
    /// Row headers, one per true class.
    pub actual: &'static str,
}

impl MatrixHeaders {
    pub const ENGLISH: Self = Self {
        predicted: "Pred",
        actual: "True",
    };
    pub const FRENCH: Self = Self {
        predicted: "Préd",
        actual: "Vrai",
    };
}

impl Default for MatrixHeaders {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// Composes projected series, axes and card chrome into render frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrameBuilder {
    viewport: Viewport,
    theme: ChartTheme,
    matrix_headers: MatrixHeaders,
}

impl ChartFrameBuilder {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            theme: ChartTheme::default(),
            matrix_headers: MatrixHeaders::default(),
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_matrix_headers(mut self, headers: MatrixHeaders) -> Self {
        self.matrix_headers = headers;
        self
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    /// Actual vs forecast lines sharing one autoscaled y-axis.
    #[must_use]
    pub fn forecast_vs_actual(self, actual: &[f64], forecast: &[f64]) -> RenderFrame {
        let series = MultiSeries::shared(vec![actual.to_vec(), forecast.to_vec()]);
        let paths = project_multi_series(&series, self.viewport);
        let axis = match series.resolved_shared_range() {
            Some(range) => value_axis_ticks(range, self.viewport),
            None => unit_axis_ticks(self.viewport),
        };
        debug!(
            actual_len = actual.len(),
            forecast_len = forecast.len(),
            "build forecast vs actual frame"
        );

        let mut frame = self.card();
        let mut paths = paths.into_iter();
        if let Some(actual_path) = paths.next() {
            let fill = project_area(&actual_path, self.viewport);
            if !fill.is_empty() {
                frame = frame.with_path(PathPrimitive::filled(
                    fill,
                    self.theme.primary.with_alpha(0.08),
                ));
            }
            frame = frame.with_path(PathPrimitive::stroked(
                actual_path,
                Stroke::solid(self.theme.primary, 3.0),
            ));
        }
        if let Some(forecast_path) = paths.next() {
            frame = frame.with_path(PathPrimitive::stroked(
                forecast_path,
                Stroke::dashed(self.theme.secondary, 2.0, 6.0, 4.0),
            ));
        }
        self.with_axis(frame, &axis)
    }

    /// Loss and accuracy curves, each autoscaled to its own range.
    #[must_use]
    pub fn training_curves(self, loss: &[f64], accuracy: &[f64]) -> RenderFrame {
        let series = MultiSeries::Independent(vec![loss.to_vec(), accuracy.to_vec()]);
        let strokes = [
            Stroke::solid(self.theme.secondary, 3.0),
            Stroke::solid(self.theme.primary, 3.0),
        ];

        let frame = project_multi_series(&series, self.viewport)
            .into_iter()
            .zip(strokes)
            .fold(self.card(), |frame, (commands, stroke)| {
                frame.with_path(PathPrimitive::stroked(commands, stroke))
            });
        self.with_axis(frame, &unit_axis_ticks(self.viewport))
    }

    /// Precision/recall curve from unit-square points.
    #[must_use]
    pub fn precision_recall(self, points: &[DataPoint]) -> RenderFrame {
        let series = MultiSeries::UnitSquare(vec![points.to_vec()]);
        let frame = project_multi_series(&series, self.viewport)
            .into_iter()
            .fold(self.card(), |frame, commands| {
                frame.with_path(PathPrimitive::stroked(
                    commands,
                    Stroke::solid(self.theme.primary, 3.0),
                ))
            });
        self.with_axis(frame, &unit_axis_ticks(self.viewport))
    }

    /// ROC curve from unit-square points, with the chance diagonal.
    #[must_use]
    pub fn roc(self, points: &[DataPoint]) -> RenderFrame {
        let plot_width = self.viewport.plot_width();
        let plot_height = self.viewport.plot_height();
        self.precision_recall(points).with_line(LinePrimitive::new(
            0.0,
            plot_height,
            plot_width,
            0.0,
            Stroke::dashed(self.theme.axis_line, 1.0, 4.0, 4.0),
        ))
    }

    /// Error distribution bars with a count label under each bucket.
    #[must_use]
    pub fn error_histogram(
        self,
        actual: &[f64],
        forecast: &[f64],
        bucket_count: usize,
    ) -> RenderFrame {
        let counts = bucket_histogram(&absolute_errors(actual, forecast), bucket_count);
        let bars = project_bucket_bars(&counts, self.viewport, 8.0);
        let plot_height = self.viewport.plot_height();

        bars.iter().fold(self.card(), |frame, bar| {
            frame
                .with_rect(
                    RectPrimitive::new(
                        bar.x_left,
                        bar.y_top,
                        bar.x_right - bar.x_left,
                        bar.height(),
                        self.theme.primary,
                    )
                    .with_corner_radius(6.0),
                )
                .with_text(TextPrimitive::new(
                    bar.count.to_string(),
                    (bar.x_left + bar.x_right) * 0.5,
                    plot_height + 16.0,
                    CELL_FONT_SIZE,
                    self.theme.label,
                    TextHAlign::Center,
                ))
        })
    }

    /// Confusion matrix: one header row and column, then one tinted cell per
    /// matrix entry with its count and percentage.
    #[must_use]
    pub fn confusion_matrix(self, grid: &IntensityGrid) -> RenderFrame {
        let size = grid.size();
        let slots = (size + 1) as f64;
        let cell_width = self.viewport.plot_width() / slots;
        let cell_height = self.viewport.plot_height() / slots;
        let mut frame = self.card();

        for (index, label) in grid.labels.iter().enumerate() {
            let offset = (index + 1) as f64;
            frame = frame
                .with_text(TextPrimitive::new(
                    format!("{}: {label}", self.matrix_headers.predicted),
                    (offset + 0.5) * cell_width,
                    cell_height * 0.5,
                    CELL_FONT_SIZE,
                    self.theme.label,
                    TextHAlign::Center,
                ))
                .with_text(TextPrimitive::new(
                    format!("{}: {label}", self.matrix_headers.actual),
                    cell_width * 0.5,
                    (offset + 0.5) * cell_height,
                    CELL_FONT_SIZE,
                    self.theme.label,
                    TextHAlign::Center,
                ));
        }

        for (row_index, row) in grid.rows.iter().enumerate() {
            for (column_index, cell) in row.iter().enumerate() {
                let x = (column_index + 1) as f64 * cell_width;
                let y = (row_index + 1) as f64 * cell_height;
                let tint = self.theme.primary.with_alpha(0.08 + cell.intensity * 0.28);
                frame = frame
                    .with_rect(
                        RectPrimitive::new(x, y, cell_width, cell_height, tint)
                            .with_corner_radius(6.0),
                    )
                    .with_text(TextPrimitive::new(
                        format!("{}", cell.value),
                        x + cell_width * 0.5,
                        y + cell_height * 0.45,
                        CELL_FONT_SIZE,
                        self.theme.label,
                        TextHAlign::Center,
                    ))
                    .with_text(TextPrimitive::new(
                        format!("{:.1}%", cell.percentage()),
                        x + cell_width * 0.5,
                        y + cell_height * 0.75,
                        TICK_FONT_SIZE,
                        self.theme.label,
                        TextHAlign::Center,
                    ));
            }
        }
        frame
    }

    fn card(self) -> RenderFrame {
        RenderFrame::new(self.viewport).with_rect(
            RectPrimitive::new(
                0.0,
                0.0,
                self.viewport.plot_width(),
                self.viewport.plot_height(),
                self.theme.card_fill,
            )
            .with_corner_radius(CARD_CORNER_RADIUS)
            .with_border(Stroke::solid(self.theme.card_border, 1.0)),
        )
    }

    fn with_axis(self, mut frame: RenderFrame, axis: &AxisLayout) -> RenderFrame {
        let plot_width = self.viewport.plot_width();
        let plot_height = self.viewport.plot_height();
        let axis_stroke = Stroke::solid(self.theme.axis_line, 1.0);
        let tick_stroke = Stroke::solid(self.theme.tick, 1.0);

        frame = frame
            .with_line(LinePrimitive::new(
                0.0,
                plot_height,
                plot_width,
                plot_height,
                axis_stroke,
            ))
            .with_line(LinePrimitive::new(0.0, 0.0, 0.0, plot_height, axis_stroke));

        for tick in &axis.x {
            frame = frame
                .with_line(LinePrimitive::new(
                    tick.position,
                    plot_height,
                    tick.position,
                    plot_height - TICK_LENGTH,
                    tick_stroke,
                ))
                .with_text(TextPrimitive::new(
                    tick.label.clone(),
                    tick.position,
                    plot_height + 16.0,
                    TICK_FONT_SIZE,
                    self.theme.label,
                    TextHAlign::Center,
                ));
        }
        for tick in &axis.y {
            frame = frame
                .with_line(LinePrimitive::new(
                    0.0,
                    tick.position,
                    TICK_LENGTH,
                    tick.position,
                    tick_stroke,
                ))
                .with_text(TextPrimitive::new(
                    tick.label.clone(),
                    -10.0,
                    tick.position + 3.0,
                    TICK_FONT_SIZE,
                    self.theme.label,
                    TextHAlign::Right,
                ));
        }
        frame
    }
}
