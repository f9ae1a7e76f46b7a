mod axis_footprint;
mod axis_label_format;
mod axis_ticks;
mod bar_chart;
mod chart_config;
mod events;
mod json_contract;
mod layout;
mod line_chart;

pub use axis_footprint::{
    AxisMeasurer, EstimatedAxisMeasurer, MAX_MEASUREMENT_PASSES, MeasurableChart,
    estimate_label_text_width_px, settle_layout,
};
pub use axis_label_format::{
    DatePattern, TickFormat, adaptive_date_pattern, tick_format, tick_format_for_query,
};
pub use axis_ticks::{
    AXIS_MAX_TICKS, AXIS_MIN_TICKS, AXIS_X_TARGET_SPACING_PX, AXIS_Y_TARGET_SPACING_PX, AxisTick,
    axis_tick_target_count, scale_ticks, tick_labels, value_axis_ticks,
};
pub use bar_chart::{BarChartFrame, BarVerticalChart};
pub use chart_config::{ChartConfig, LayoutTuning, LegendConfig, LegendReserve, LegendSide};
pub use events::{ChartEvent, ChartEventListener};
pub use json_contract::{CHART_CONFIG_JSON_SCHEMA_V1, ChartConfigJsonContractV1};
pub use layout::{FootprintTracker, LayoutInput, resolve_view_dimensions};
pub use line_chart::{LineChart, LineChartFrame, POINT_ACTIVATION_RADIUS_PX, SeriesPath};
