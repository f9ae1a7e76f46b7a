pub mod band_scale;
pub mod bar_series;
pub mod curve;
pub mod domain;
pub mod line_series;
pub mod primitives;
pub mod record;
pub mod scale;
pub mod scale_factory;
pub mod ticks;
pub mod time_scale;
pub mod types;

pub use band_scale::{BAND_INNER_PADDING, BandScale};
pub use bar_series::{BarGeometry, project_bars};
pub use curve::{Curve, PathCommand, curve_commands, path_descriptor, serialize_path};
pub use domain::{
    Domain, categorical_domain, categorical_domain_union, coerce_key, key_domain,
    numeric_key_domain, series_name_domain, temporal_key_domain, value_domain,
    value_domain_union,
};
pub use line_series::{PathGeometry, ProjectedPoint, build_line_path, ordered_records, project_points};
pub use primitives::parse_time_label;
pub use record::{
    FieldType, GroupBy, Label, NamedSeries, QueryDimension, QueryMetadata, ResultRecord, Series,
};
pub use scale::LinearScale;
pub use scale_factory::{Scale, ScaleKind, ScaleType, make_scale};
pub use ticks::{TickValues, linear_ticks, nice_interval, tick_step};
pub use time_scale::TimeScale;
pub use types::{AxisFootprint, AxisKind, Margins, ViewDimensions, ViewSize};
