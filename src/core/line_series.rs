use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::curve::{Curve, path_descriptor};
use crate::core::domain::coerce_key;
use crate::core::record::{ResultRecord, Series};
use crate::core::scale::LinearScale;
use crate::core::scale_factory::{Scale, ScaleType};
use crate::error::ChartResult;

/// One record projected into plot-local pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub record: ResultRecord,
}

/// Ordered screen points of one series and the path descriptor joining them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathGeometry {
    pub points: Vec<ProjectedPoint>,
    pub path: String,
}

impl PathGeometry {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|point| (point.x, point.y)).collect()
    }

    /// Closest projected point to a plot-local position, by euclidean distance.
    #[must_use]
    pub fn nearest(&self, x: f64, y: f64) -> Option<&ProjectedPoint> {
        self.points
            .iter()
            .min_by_key(|point| OrderedFloat((point.x - x).powi(2) + (point.y - y).powi(2)))
    }
}

/// Records paired with their coerced key, in drawing order.
///
/// Interval scale types sort ascending by key; categorical input keeps its
/// order. Ties keep input order.
pub fn ordered_records(
    series: &Series,
    scale_type: ScaleType,
) -> ChartResult<Vec<(Option<f64>, &ResultRecord)>> {
    let mut keyed = series
        .iter()
        .enumerate()
        .map(|(index, record)| Ok((coerce_key(&record.name, index, scale_type)?, record)))
        .collect::<ChartResult<Vec<_>>>()?;

    if scale_type.sorts_keys() {
        keyed.sort_by_key(|(key, _)| OrderedFloat(key.unwrap_or(f64::NEG_INFINITY)));
    }
    Ok(keyed)
}

/// Maps every record of the series to pixel coordinates.
///
/// Band x scales centre the point inside its band. The y coordinate is always
/// a linear lookup of the record value.
pub fn project_points(
    series: &Series,
    x_scale: &Scale,
    y_scale: LinearScale,
    scale_type: ScaleType,
) -> ChartResult<Vec<ProjectedPoint>> {
    let ordered = ordered_records(series, scale_type)?;
    let mut projected = Vec::with_capacity(ordered.len());
    for (index, (key, record)) in ordered.into_iter().enumerate() {
        let x = match (x_scale, key) {
            (Scale::Band(band), _) => band.center(&record.name.category_key())?,
            (scale, Some(key)) => scale.apply_value(key)?,
            (scale, None) => scale
                .apply(&record.name)
                .map_err(|err| err.at_record(index))?,
        };
        let y = y_scale.apply(record.value)?;
        projected.push(ProjectedPoint {
            x,
            y,
            record: record.clone(),
        });
    }
    Ok(projected)
}

/// Projects the series and joins the points with `curve`.
///
/// An empty series produces an empty path descriptor.
pub fn build_line_path(
    series: &Series,
    x_scale: &Scale,
    y_scale: LinearScale,
    scale_type: ScaleType,
    curve: Curve,
) -> ChartResult<PathGeometry> {
    let points = project_points(series, x_scale, y_scale, scale_type)?;
    let coordinates: Vec<(f64, f64)> = points.iter().map(|point| (point.x, point.y)).collect();
    Ok(PathGeometry {
        path: path_descriptor(&coordinates, curve),
        points,
    })
}
