use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::record::{Label, NamedSeries, Series};
use crate::core::scale_factory::ScaleType;
use crate::error::{ChartError, ChartResult};

/// Input values a scale maps from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Domain {
    /// Distinct labels in first-seen order.
    Categorical(IndexSet<String>),
    /// Numeric interval.
    Numeric { min: f64, max: f64 },
    /// Interval of epoch milliseconds.
    Temporal { min: f64, max: f64 },
}

impl Domain {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Categorical(labels) => labels.is_empty(),
            Self::Numeric { .. } | Self::Temporal { .. } => false,
        }
    }

    /// Returns `(min, max)` for interval domains.
    #[must_use]
    pub fn interval(&self) -> Option<(f64, f64)> {
        match self {
            Self::Categorical(_) => None,
            Self::Numeric { min, max } | Self::Temporal { min, max } => Some((*min, *max)),
        }
    }

    #[must_use]
    pub fn categories(&self) -> Option<&IndexSet<String>> {
        match self {
            Self::Categorical(labels) => Some(labels),
            Self::Numeric { .. } | Self::Temporal { .. } => None,
        }
    }
}

/// Distinct record names in first-seen order.
#[must_use]
pub fn categorical_domain(series: &Series) -> IndexSet<String> {
    categorical_domain_union([series])
}

/// Union of record names across several series, keeping first-seen order.
#[must_use]
pub fn categorical_domain_union<'a>(
    series: impl IntoIterator<Item = &'a Series>,
) -> IndexSet<String> {
    let mut labels = IndexSet::new();
    for series in series {
        for record in series.iter() {
            labels.insert(record.name.category_key());
        }
    }
    labels
}

/// Value interval that always contains zero.
///
/// `[min(0, min(values)), max(0, max(values))]`; an empty series yields `[0, 0]`.
#[must_use]
pub fn value_domain(series: &Series) -> (f64, f64) {
    value_domain_union([series])
}

#[must_use]
pub fn value_domain_union<'a>(series: impl IntoIterator<Item = &'a Series>) -> (f64, f64) {
    series
        .into_iter()
        .flat_map(Series::iter)
        .fold((0.0_f64, 0.0_f64), |(min, max), record| {
            (min.min(record.value), max.max(record.value))
        })
}

/// Coerces one record key for an interval scale.
///
/// Categorical scales have no numeric key and return `None`.
pub fn coerce_key(label: &Label, index: usize, scale_type: ScaleType) -> ChartResult<Option<f64>> {
    let (parsed, expected) = match scale_type {
        ScaleType::Ordinal => return Ok(None),
        ScaleType::Linear => (label.to_number(), "a number"),
        ScaleType::Time => (label.to_timestamp_millis(), "a calendar date"),
    };
    parsed
        .map(Some)
        .ok_or_else(|| ChartError::UnparsableLabel {
            index,
            label: label.to_string(),
            expected,
        })
}

/// Numeric interval spanned by record keys read as numbers.
pub fn numeric_key_domain(series: &Series) -> ChartResult<Domain> {
    interval_key_domain([series], ScaleType::Linear)
}

/// Timestamp interval spanned by record keys read as calendar dates.
pub fn temporal_key_domain(series: &Series) -> ChartResult<Domain> {
    interval_key_domain([series], ScaleType::Time)
}

/// Key-axis domain for the given scale type, merged across series.
pub fn key_domain<'a>(
    series: impl IntoIterator<Item = &'a Series>,
    scale_type: ScaleType,
) -> ChartResult<Domain> {
    match scale_type {
        ScaleType::Ordinal => Ok(Domain::Categorical(categorical_domain_union(series))),
        ScaleType::Linear | ScaleType::Time => interval_key_domain(series, scale_type),
    }
}

/// Series names for legend and color mapping, in first-seen order.
#[must_use]
pub fn series_name_domain(series: &[NamedSeries]) -> IndexSet<String> {
    series.iter().map(|named| named.name.clone()).collect()
}

fn interval_key_domain<'a>(
    series: impl IntoIterator<Item = &'a Series>,
    scale_type: ScaleType,
) -> ChartResult<Domain> {
    let mut bounds: Option<(f64, f64)> = None;
    for series in series {
        for (index, record) in series.iter().enumerate() {
            let Some(key) = coerce_key(&record.name, index, scale_type)? else {
                continue;
            };
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(key), max.max(key)),
                None => (key, key),
            });
        }
    }

    let (min, max) = bounds.unwrap_or((0.0, 0.0));
    Ok(match scale_type {
        ScaleType::Time => Domain::Temporal { min, max },
        ScaleType::Linear | ScaleType::Ordinal => Domain::Numeric { min, max },
    })
}
