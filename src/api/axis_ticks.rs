use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, Scale};
use crate::error::ChartResult;

use super::axis_label_format::{TickFormat, adaptive_date_pattern};

pub const AXIS_X_TARGET_SPACING_PX: f64 = 72.0;
pub const AXIS_Y_TARGET_SPACING_PX: f64 = 40.0;
pub const AXIS_MIN_TICKS: usize = 2;
pub const AXIS_MAX_TICKS: usize = 12;

/// One labelled tick, positioned along its axis in plot-local pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub label: String,
    pub position: f64,
}

#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Ticks of a key axis.
///
/// Band axes label every category at its band centre. Interval axes pick a
/// tick count from the pixel span.
pub fn scale_ticks(
    scale: &Scale,
    axis_span_px: f64,
    target_spacing_px: f64,
    format: Option<TickFormat>,
) -> ChartResult<Vec<AxisTick>> {
    let count = axis_tick_target_count(
        axis_span_px,
        target_spacing_px,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    );

    match scale {
        Scale::Band(band) => Ok(band
            .domain()
            .iter()
            .enumerate()
            .map(|(index, label)| AxisTick {
                label: format.map_or_else(|| label.clone(), |format| format.format_text(label)),
                position: band.position_at(index) + band.bandwidth() * 0.5,
            })
            .collect()),
        Scale::Linear(linear) => linear_axis_ticks(*linear, count, format),
        Scale::Temporal(time) => {
            let (start, end) = time.domain();
            let format = format.unwrap_or(TickFormat::Date(adaptive_date_pattern(end - start)));
            time.ticks(count)
                .into_iter()
                .map(|tick| {
                    Ok(AxisTick {
                        label: format.format_time(tick),
                        position: time.apply_time(tick)?,
                    })
                })
                .collect()
        }
    }
}

/// Ticks of the value axis, sized from the plot height.
pub fn value_axis_ticks(y_scale: LinearScale, axis_span_px: f64) -> ChartResult<Vec<AxisTick>> {
    let count = axis_tick_target_count(
        axis_span_px,
        AXIS_Y_TARGET_SPACING_PX,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    );
    linear_axis_ticks(y_scale, count, None)
}

fn linear_axis_ticks(
    scale: LinearScale,
    count: usize,
    format: Option<TickFormat>,
) -> ChartResult<Vec<AxisTick>> {
    let format = match format {
        Some(TickFormat::Date(_)) | None => TickFormat::Decimal { max_precision: 2 },
        Some(other) => other,
    };
    scale
        .ticks(count)
        .into_iter()
        .map(|value| {
            Ok(AxisTick {
                label: format.format_number(value),
                position: scale.apply(value)?,
            })
        })
        .collect()
}

/// Label text of every tick, in axis order.
#[must_use]
pub fn tick_labels(ticks: &[AxisTick]) -> Vec<String> {
    ticks.iter().map(|tick| tick.label.clone()).collect()
}
