use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Outer size of the chart view in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidViewSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Insets reserved around the plot area, in pixels.
///
/// Field order follows the CSS convention: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Builds margins from a `[top, right, bottom, left]` array.
    #[must_use]
    pub const fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }

    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::from_array([10.0, 20.0, 10.0, 20.0])
    }
}

/// Which axis a footprint measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Y,
}

/// Pixel size occupied by an axis' rendered ticks and labels.
///
/// Only `height` matters for the x-axis and only `width` for the y-axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisFootprint {
    pub width: f64,
    pub height: f64,
}

impl AxisFootprint {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn with_height(height: f64) -> Self {
        Self { width: 0.0, height }
    }

    #[must_use]
    pub const fn with_width(width: f64) -> Self {
        Self { width, height: 0.0 }
    }
}

/// Resolved plot-area rectangle and its offset inside the full view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewDimensions {
    pub width: f64,
    pub height: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl ViewDimensions {
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// SVG transform that moves the plot group into place.
    #[must_use]
    pub fn transform(self) -> String {
        format!("translate({}, {})", self.x_offset, self.y_offset)
    }

    /// Returns `true` when a plot-local point lies inside the rectangle.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x <= self.width && y <= self.height
    }
}
