use serde::{Deserialize, Serialize};

use crate::core::ticks::{TickValues, linear_ticks, nice_interval};
use crate::error::{ChartError, ChartResult};

/// Affine map from a numeric domain onto a pixel range.
///
/// The range may be inverted (`range_start > range_end`) for y-axes, where
/// pixel rows grow downward while values grow upward. A zero-span domain maps
/// every value to the range midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        if !(domain.1 - domain.0).is_finite() || !(range.1 - range.0).is_finite() {
            return Err(ChartError::InvalidData(format!(
                "scale span overflows: domain [{}, {}], range [{}, {}]",
                domain.0, domain.1, range.0, range.1
            )));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    /// Scale for a horizontal axis of the given plot width.
    pub fn horizontal(domain: (f64, f64), width: f64) -> ChartResult<Self> {
        Self::new(domain, (0.0, width))
    }

    /// Scale for a vertical axis: domain minimum at the bottom edge.
    pub fn vertical(domain: (f64, f64), height: f64) -> ChartResult<Self> {
        Self::new(domain, (height, 0.0))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    #[must_use]
    fn range_midpoint(self) -> f64 {
        (self.range_start + self.range_end) * 0.5
    }

    pub fn apply(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        if self.is_degenerate() {
            return Ok(self.range_midpoint());
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        let pixel = self.range_start + normalized * (self.range_end - self.range_start);
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "value {value} maps outside the representable pixel range"
            )));
        }
        Ok(pixel)
    }

    /// Maps a pixel back into the domain.
    ///
    /// A degenerate domain inverts to its single value; a zero-length range
    /// inverts to the domain start.
    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let range_span = self.range_end - self.range_start;
        if self.is_degenerate() || range_span == 0.0 {
            return Ok(self.domain_start);
        }

        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Returns a copy whose domain is widened to round tick boundaries.
    ///
    /// The domain is left as is when widening would overflow.
    #[must_use]
    pub fn nice(self, tick_count: usize) -> Self {
        let (domain_start, domain_end) = nice_interval(self.domain_start, self.domain_end, tick_count);
        if !(domain_end - domain_start).is_finite() {
            return self;
        }
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    #[must_use]
    pub fn ticks(self, tick_count: usize) -> TickValues {
        linear_ticks(self.domain_start, self.domain_end, tick_count)
    }
}
