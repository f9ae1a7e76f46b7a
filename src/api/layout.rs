use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{AxisFootprint, AxisKind, Margins, ViewDimensions, ViewSize};
use crate::error::{ChartError, ChartResult};

use super::{ChartConfig, LayoutTuning, LegendConfig, LegendReserve, LegendSide};

/// Everything the layout pass reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutInput {
    pub view: ViewSize,
    pub margins: Margins,
    pub show_x_axis: bool,
    pub show_y_axis: bool,
    pub show_x_axis_label: bool,
    pub show_y_axis_label: bool,
    pub legend: Option<LegendConfig>,
    pub x_axis_height: f64,
    pub y_axis_width: f64,
    pub tuning: LayoutTuning,
}

impl LayoutInput {
    /// Layout input with no axes, titles, legend or footprints.
    #[must_use]
    pub fn bare(view: ViewSize, margins: Margins) -> Self {
        Self {
            view,
            margins,
            show_x_axis: false,
            show_y_axis: false,
            show_x_axis_label: false,
            show_y_axis_label: false,
            legend: None,
            x_axis_height: 0.0,
            y_axis_width: 0.0,
            tuning: LayoutTuning::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ChartConfig, footprints: FootprintTracker) -> Self {
        Self {
            view: config.view,
            margins: config.margins,
            show_x_axis: config.show_x_axis,
            show_y_axis: config.show_y_axis,
            show_x_axis_label: config.show_x_axis_label,
            show_y_axis_label: config.show_y_axis_label,
            legend: config.legend,
            x_axis_height: footprints.x_axis_height(),
            y_axis_width: footprints.y_axis_width(),
            tuning: config.layout_tuning,
        }
    }
}

/// Resolves the plot rectangle from the view, margins and axis footprints.
///
/// Width and height are clamped at zero, so an undersized view produces a
/// zero-area plot instead of an error. The result is a pure function of the
/// input.
#[must_use]
pub fn resolve_view_dimensions(input: &LayoutInput) -> ViewDimensions {
    let margins = input.margins;
    let tuning = input.tuning;
    let mut width = input.view.width - margins.horizontal();
    let mut height = input.view.height - margins.vertical();
    let mut x_offset = margins.left;

    if let Some(legend) = input.legend {
        match legend.side {
            LegendSide::Right => width -= legend_reserve_px(legend.reserve, input.view.width),
            LegendSide::Below => height -= legend_reserve_px(legend.reserve, input.view.height),
        }
    }

    if input.show_x_axis {
        height -= input.x_axis_height + tuning.x_axis_tick_gap_px;
        if input.show_x_axis_label {
            height -= tuning.axis_label_offset_px;
        }
    }

    if input.show_y_axis {
        let reserved = input.y_axis_width + tuning.y_axis_tick_gap_px;
        width -= reserved;
        x_offset += reserved;
        if input.show_y_axis_label {
            width -= tuning.axis_label_offset_px;
            x_offset += tuning.axis_label_offset_px;
        }
    }

    ViewDimensions {
        width: width.max(0.0),
        height: height.max(0.0),
        x_offset,
        y_offset: margins.top,
    }
}

fn legend_reserve_px(reserve: LegendReserve, extent: f64) -> f64 {
    match reserve {
        LegendReserve::GridColumns(columns) => extent * f64::from(columns.min(12)) / 12.0,
        LegendReserve::Pixels(px) => px,
    }
}

/// Latest measured axis footprints feeding the layout pass.
///
/// Starts at zero. A measurement identical to the stored one is not a change,
/// which is what lets the estimate/measure/finalize exchange settle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FootprintTracker {
    x_axis_height: f64,
    y_axis_width: f64,
}

impl FootprintTracker {
    #[must_use]
    pub fn x_axis_height(self) -> f64 {
        self.x_axis_height
    }

    #[must_use]
    pub fn y_axis_width(self) -> f64 {
        self.y_axis_width
    }

    /// Stores the measurement for `axis`; returns whether the layout must be recomputed.
    pub fn apply(&mut self, axis: AxisKind, footprint: AxisFootprint) -> ChartResult<bool> {
        let (slot, measured) = match axis {
            AxisKind::X => (&mut self.x_axis_height, footprint.height),
            AxisKind::Y => (&mut self.y_axis_width, footprint.width),
        };
        if !measured.is_finite() || measured < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{axis:?} axis footprint must be finite and >= 0"
            )));
        }

        let changed = should_relayout_for_footprint(measured, *slot);
        trace!(?axis, measured, previous = *slot, changed, "axis footprint measured");
        *slot = measured;
        Ok(changed)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn should_relayout_for_footprint(measured: f64, previous: f64) -> bool {
    measured != previous
}
