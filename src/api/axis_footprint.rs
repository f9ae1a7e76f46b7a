use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AxisFootprint, AxisKind};
use crate::error::ChartResult;

/// Upper bound on measure/apply rounds run by [`settle_layout`].
pub const MAX_MEASUREMENT_PASSES: usize = 2;

/// Measures the pixel footprint of an axis from its formatted tick labels.
///
/// Hosts with a real text layout engine implement this against it; the
/// footprint of the x-axis is its height, the footprint of the y-axis its width.
pub trait AxisMeasurer {
    fn measure(&self, axis: AxisKind, labels: &[String], axis_span_px: f64) -> AxisFootprint;
}

/// Deterministic, backend-independent footprint estimate.
///
/// X-axis labels that do not fit their slot are assumed to be drawn rotated
/// by 45 degrees, which grows the footprint height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatedAxisMeasurer {
    pub font_size_px: f64,
    pub tick_length_px: f64,
    pub label_padding_px: f64,
}

impl Default for EstimatedAxisMeasurer {
    fn default() -> Self {
        Self {
            font_size_px: 11.0,
            tick_length_px: 5.0,
            label_padding_px: 4.0,
        }
    }
}

impl AxisMeasurer for EstimatedAxisMeasurer {
    fn measure(&self, axis: AxisKind, labels: &[String], axis_span_px: f64) -> AxisFootprint {
        if labels.is_empty() {
            return AxisFootprint::ZERO;
        }

        let widest = labels
            .iter()
            .map(|label| estimate_label_text_width_px(label, self.font_size_px))
            .fold(0.0_f64, f64::max);
        let chrome = self.tick_length_px + self.label_padding_px;

        match axis {
            AxisKind::Y => AxisFootprint::with_width((widest + chrome + 2.0).ceil()),
            AxisKind::X => {
                let slot = axis_span_px.max(0.0) / labels.len() as f64;
                let text_height = if widest > slot {
                    (widest + self.font_size_px) * std::f64::consts::FRAC_1_SQRT_2
                } else {
                    self.font_size_px
                };
                AxisFootprint::new(axis_span_px.max(0.0), (text_height + chrome + 2.0).ceil())
            }
        }
    }
}

/// Rough label width from per-glyph advance ratios.
#[must_use]
pub fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' | ':' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            'A'..='Z' => 0.68,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// A chart that can take part in the measure/apply exchange.
pub trait MeasurableChart {
    /// Formatted tick labels currently drawn on `axis`; empty when the axis is hidden.
    fn axis_labels(&self, axis: AxisKind) -> Vec<String>;

    /// Pixel length of `axis` in the current frame.
    fn axis_span_px(&self, axis: AxisKind) -> f64;

    fn on_axis_footprint_measured(
        &mut self,
        axis: AxisKind,
        footprint: AxisFootprint,
    ) -> ChartResult<bool>;
}

/// Runs estimate, measure and finalize until no footprint changes.
///
/// The y-axis is measured before the x-axis of each round because its width
/// narrows the plot the x labels must fit into. Returns the number of rounds
/// performed, never more than [`MAX_MEASUREMENT_PASSES`].
pub fn settle_layout<C, M>(chart: &mut C, measurer: &M) -> ChartResult<usize>
where
    C: MeasurableChart + ?Sized,
    M: AxisMeasurer + ?Sized,
{
    let mut passes = 0;
    while passes < MAX_MEASUREMENT_PASSES {
        passes += 1;
        let mut changed = false;
        for axis in [AxisKind::Y, AxisKind::X] {
            let labels = chart.axis_labels(axis);
            let footprint = measurer.measure(axis, &labels, chart.axis_span_px(axis));
            changed |= chart.on_axis_footprint_measured(axis, footprint)?;
        }
        if !changed {
            break;
        }
    }
    debug!(passes, "axis footprints settled");
    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_width_never_drops_below_one_glyph() {
        assert_eq!(estimate_label_text_width_px("", 11.0), 11.0);
        assert!(estimate_label_text_width_px("1,234.5", 11.0) > 11.0);
    }

    #[test]
    fn crowded_x_labels_grow_the_footprint() {
        let measurer = EstimatedAxisMeasurer::default();
        let labels: Vec<String> = (0..10).map(|i| format!("Category {i}")).collect();
        let roomy = measurer.measure(AxisKind::X, &labels, 2_000.0);
        let crowded = measurer.measure(AxisKind::X, &labels, 200.0);
        assert!(crowded.height > roomy.height);
    }
}
