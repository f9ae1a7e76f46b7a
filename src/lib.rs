//! chart-layout: domain, scale, layout and path geometry for vertical bar
//! and line charts.
//!
//! The crate computes what a renderer needs (plot rectangle, scales, bar
//! rectangles and SVG path descriptors) and leaves drawing to the host.
//! Axis footprints flow back in through an explicit measure/apply exchange.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{BarVerticalChart, ChartConfig, ChartEvent, ChartEventListener, LineChart};
pub use error::{ChartError, ChartResult};
