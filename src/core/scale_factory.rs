use serde::{Deserialize, Serialize};

use crate::core::band_scale::BandScale;
use crate::core::domain::Domain;
use crate::core::record::Label;
use crate::core::scale::LinearScale;
use crate::core::time_scale::TimeScale;
use crate::error::{ChartError, ChartResult};

/// Scale tag carried by a line series.
///
/// Controls both the x mapping and the ordering applied before path building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Time,
    Linear,
    #[default]
    Ordinal,
}

impl ScaleType {
    /// Reads a host tag; anything other than `time` or `linear` is categorical.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "time" => Self::Time,
            "linear" => Self::Linear,
            _ => Self::Ordinal,
        }
    }

    #[must_use]
    pub fn scale_kind(self) -> ScaleKind {
        match self {
            Self::Time => ScaleKind::Temporal,
            Self::Linear => ScaleKind::Linear,
            Self::Ordinal => ScaleKind::Band,
        }
    }

    /// Interval scales require keys sorted ascending before drawing a path.
    #[must_use]
    pub fn sorts_keys(self) -> bool {
        matches!(self, Self::Time | Self::Linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleKind {
    Band,
    Linear,
    Temporal,
}

/// One coordinate mapping, whatever its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scale {
    Band(BandScale),
    Linear(LinearScale),
    Temporal(TimeScale),
}

impl Scale {
    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Band(_) => ScaleKind::Band,
            Self::Linear(_) => ScaleKind::Linear,
            Self::Temporal(_) => ScaleKind::Temporal,
        }
    }

    /// Maps a record key to a pixel coordinate.
    ///
    /// Band scales return the leading edge of the band.
    pub fn apply(&self, label: &Label) -> ChartResult<f64> {
        match self {
            Self::Band(band) => band.position(&label.category_key()),
            Self::Linear(linear) => {
                let value = label.to_number().ok_or_else(|| ChartError::UnreadableLabel {
                    label: label.to_string(),
                    expected: "a number",
                })?;
                linear.apply(value)
            }
            Self::Temporal(time) => time.apply_label(label),
        }
    }

    /// Maps a raw number; only interval scales accept one.
    pub fn apply_value(&self, value: f64) -> ChartResult<f64> {
        match self {
            Self::Linear(linear) => linear.apply(value),
            Self::Temporal(time) => time.apply_millis(value),
            Self::Band(_) => Err(ChartError::InvalidData(
                "band scales map labels, not numbers".to_owned(),
            )),
        }
    }

    /// Drawn band width; zero for interval scales.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Band(band) => band.bandwidth(),
            Self::Linear(_) | Self::Temporal(_) => 0.0,
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Band(band) => band.range(),
            Self::Linear(linear) => linear.range(),
            Self::Temporal(time) => time.range(),
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(band) => Some(band),
            Self::Linear(_) | Self::Temporal(_) => None,
        }
    }

    #[must_use]
    pub fn as_linear(&self) -> Option<LinearScale> {
        match self {
            Self::Linear(linear) => Some(*linear),
            Self::Band(_) | Self::Temporal(_) => None,
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<TimeScale> {
        match self {
            Self::Temporal(time) => Some(*time),
            Self::Band(_) | Self::Linear(_) => None,
        }
    }
}

/// Builds the scale of `kind` mapping `domain` onto `range`.
pub fn make_scale(kind: ScaleKind, domain: &Domain, range: (f64, f64)) -> ChartResult<Scale> {
    match (kind, domain) {
        (ScaleKind::Band, Domain::Categorical(labels)) => {
            Ok(Scale::Band(BandScale::new(labels.clone(), range)?))
        }
        (ScaleKind::Linear, Domain::Numeric { min, max } | Domain::Temporal { min, max }) => {
            Ok(Scale::Linear(LinearScale::new((*min, *max), range)?))
        }
        (ScaleKind::Temporal, Domain::Numeric { min, max } | Domain::Temporal { min, max }) => {
            Ok(Scale::Temporal(TimeScale::new((*min, *max), range)?))
        }
        (ScaleKind::Band, Domain::Numeric { .. } | Domain::Temporal { .. }) => Err(
            ChartError::InvalidData("band scales need a categorical domain".to_owned()),
        ),
        (ScaleKind::Linear | ScaleKind::Temporal, Domain::Categorical(_)) => Err(
            ChartError::InvalidData("interval scales need an interval domain".to_owned()),
        ),
    }
}
