pub mod area_series;
pub mod axis;
pub mod histogram_series;
pub mod intensity_grid;
pub mod line_series;
pub mod multi_series;
pub mod path;
pub mod primitives;
pub mod scale;
pub mod types;

pub use area_series::project_area;
pub use axis::{
    AxisLayout, AxisTick, AxisTicks, format_tick_label, unit_axis_ticks, value_axis_ticks,
};
pub use histogram_series::{
    BucketCounts, DEFAULT_BUCKET_COUNT, HistogramBar, absolute_errors, bucket_histogram,
    project_bucket_bars,
};
pub use intensity_grid::{IntensityCell, IntensityGrid, project_intensity_grid};
pub use line_series::{project_line, project_line_with_range, project_unit_points};
pub use multi_series::{MultiSeries, project_multi_series};
pub use path::{PathCommand, to_svg_path_data};
pub use scale::ValueRange;
pub use types::{DataPoint, Viewport};
