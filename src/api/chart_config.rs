use serde::{Deserialize, Serialize};

use crate::core::{Curve, Margins, ScaleType, ViewSize};
use crate::error::{ChartError, ChartResult};

/// Side of the plot the legend occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendSide {
    #[default]
    Right,
    Below,
}

/// Space the legend takes away from the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendReserve {
    /// Columns of a twelve-column grid spanning the view.
    GridColumns(u8),
    /// Fixed number of pixels.
    Pixels(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    #[serde(default)]
    pub side: LegendSide,
    #[serde(default = "default_legend_reserve")]
    pub reserve: LegendReserve,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            side: LegendSide::default(),
            reserve: default_legend_reserve(),
        }
    }
}

/// Spacing constants of the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutTuning {
    /// Gap between the x-axis footprint and the plot.
    pub x_axis_tick_gap_px: f64,
    /// Gap between the y-axis footprint and the plot.
    pub y_axis_tick_gap_px: f64,
    /// Room for an axis title: text height plus spacing.
    pub axis_label_offset_px: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            x_axis_tick_gap_px: 0.0,
            y_axis_tick_gap_px: 0.0,
            axis_label_offset_px: 30.0,
        }
    }
}

impl LayoutTuning {
    fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("x_axis_tick_gap_px", self.x_axis_tick_gap_px),
            ("y_axis_tick_gap_px", self.y_axis_tick_gap_px),
            ("axis_label_offset_px", self.axis_label_offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout tuning `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Host-facing chart configuration.
///
/// Serializable so hosts can persist chart setup; absent fields fall back to
/// the defaults of `ChartConfig::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub view: ViewSize,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_true")]
    pub show_x_axis: bool,
    #[serde(default = "default_true")]
    pub show_y_axis: bool,
    #[serde(default)]
    pub show_x_axis_label: bool,
    #[serde(default)]
    pub show_y_axis_label: bool,
    #[serde(default)]
    pub x_axis_label: Option<String>,
    #[serde(default)]
    pub y_axis_label: Option<String>,
    #[serde(default)]
    pub legend: Option<LegendConfig>,
    #[serde(default)]
    pub layout_tuning: LayoutTuning,
    #[serde(default)]
    pub scale_type: ScaleType,
    #[serde(default)]
    pub curve: Curve,
    #[serde(default)]
    pub round_bands: bool,
}

impl ChartConfig {
    /// Config with both axes shown, no legend and the default margins.
    #[must_use]
    pub fn new(view: ViewSize) -> Self {
        Self {
            view,
            margins: Margins::default(),
            show_x_axis: true,
            show_y_axis: true,
            show_x_axis_label: false,
            show_y_axis_label: false,
            x_axis_label: None,
            y_axis_label: None,
            legend: None,
            layout_tuning: LayoutTuning::default(),
            scale_type: ScaleType::default(),
            curve: Curve::default(),
            round_bands: false,
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, show_x_axis: bool, show_y_axis: bool) -> Self {
        self.show_x_axis = show_x_axis;
        self.show_y_axis = show_y_axis;
        self
    }

    /// Shows an axis title; `None` hides it.
    #[must_use]
    pub fn with_x_axis_label(mut self, label: Option<String>) -> Self {
        self.show_x_axis_label = label.is_some();
        self.x_axis_label = label;
        self
    }

    #[must_use]
    pub fn with_y_axis_label(mut self, label: Option<String>) -> Self {
        self.show_y_axis_label = label.is_some();
        self.y_axis_label = label;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: Option<LegendConfig>) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_layout_tuning(mut self, tuning: LayoutTuning) -> Self {
        self.layout_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }

    #[must_use]
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    #[must_use]
    pub fn with_round_bands(mut self, round_bands: bool) -> Self {
        self.round_bands = round_bands;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.view.validate()?;
        self.margins.validate()?;
        self.layout_tuning.validate()?;
        if let Some(legend) = self.legend {
            match legend.reserve {
                LegendReserve::GridColumns(columns) if columns > 12 => {
                    return Err(ChartError::InvalidData(
                        "legend grid columns must be <= 12".to_owned(),
                    ));
                }
                LegendReserve::Pixels(px) if !px.is_finite() || px < 0.0 => {
                    return Err(ChartError::InvalidData(
                        "legend reserve must be finite and >= 0".to_owned(),
                    ));
                }
                LegendReserve::GridColumns(_) | LegendReserve::Pixels(_) => {}
            }
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_legend_reserve() -> LegendReserve {
    LegendReserve::GridColumns(2)
}
