use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Share of every slot left empty between neighbouring bands.
pub const BAND_INNER_PADDING: f64 = 0.2;

/// Categorical scale reserving one equal slot per distinct label.
///
/// Each slot is `step` wide. The band occupies `step * (1 - 0.2)` of it and
/// the gap is split evenly on both sides, so bands plus gaps tile the range
/// exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    pub fn new(domain: IndexSet<String>, range: (f64, f64)) -> ChartResult<Self> {
        Self::build(domain, range, false)
    }

    /// Band scale with whole-pixel slots; the leftover is centred in the range.
    pub fn rounded(domain: IndexSet<String>, range: (f64, f64)) -> ChartResult<Self> {
        Self::build(domain, range, true)
    }

    fn build(domain: IndexSet<String>, range: (f64, f64), round: bool) -> ChartResult<Self> {
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ChartError::InvalidData(
                "band range must be finite".to_owned(),
            ));
        }

        let (range_start, range_end) = range;
        let span = range_end - range_start;
        let count = domain.len();
        let (step, offset) = if count == 0 {
            (0.0, 0.0)
        } else {
            let exact = span / count as f64;
            if round {
                let step = exact.floor();
                (step, ((span - step * count as f64) * 0.5).round())
            } else {
                (exact, 0.0)
            }
        };

        Ok(Self {
            domain,
            range_start,
            range_end,
            step,
            bandwidth: step * (1.0 - BAND_INNER_PADDING),
            offset,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &IndexSet<String> {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Slot width reserved per label.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Drawn width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Gap left on each side of a band inside its slot.
    #[must_use]
    pub fn padding_offset(&self) -> f64 {
        self.step * BAND_INNER_PADDING * 0.5
    }

    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.domain.get_index_of(label)
    }

    /// Leading edge of the band for `label`.
    pub fn position(&self, label: &str) -> ChartResult<f64> {
        let index = self
            .index_of(label)
            .ok_or_else(|| ChartError::UnknownCategory(label.to_owned()))?;
        Ok(self.position_at(index))
    }

    #[must_use]
    pub fn position_at(&self, index: usize) -> f64 {
        self.range_start + self.offset + index as f64 * self.step + self.padding_offset()
    }

    /// Centre of the band for `label`.
    pub fn center(&self, label: &str) -> ChartResult<f64> {
        Ok(self.position(label)? + self.bandwidth * 0.5)
    }

    /// Label whose slot contains the pixel, if any.
    #[must_use]
    pub fn label_at(&self, pixel: f64) -> Option<&str> {
        if self.step <= 0.0 || !pixel.is_finite() {
            return None;
        }
        let local = pixel - self.range_start - self.offset;
        if local < 0.0 {
            return None;
        }
        let index = (local / self.step).floor() as usize;
        self.domain.get_index(index).map(String::as_str)
    }
}
