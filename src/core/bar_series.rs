use serde::{Deserialize, Serialize};

use crate::core::band_scale::BandScale;
use crate::core::record::{ResultRecord, Series};
use crate::core::scale::LinearScale;
use crate::error::ChartResult;

/// Vertical bar rectangle in plot-local pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub record: ResultRecord,
}

impl BarGeometry {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Projects records into bars standing on (or hanging from) the zero line.
///
/// Positive values extend upward from `y(0)`, negative values downward.
pub fn project_bars(
    series: &Series,
    x_scale: &BandScale,
    y_scale: LinearScale,
) -> ChartResult<Vec<BarGeometry>> {
    let zero_y = y_scale.apply(0.0)?;
    let width = x_scale.bandwidth();

    let mut projected = Vec::with_capacity(series.len());
    for record in series.iter() {
        let x = x_scale.position(&record.name.category_key())?;
        let value_y = y_scale.apply(record.value)?;
        projected.push(BarGeometry {
            x,
            y: value_y.min(zero_y),
            width,
            height: (value_y - zero_y).abs(),
            record: record.clone(),
        });
    }

    Ok(projected)
}
