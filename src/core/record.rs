use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, decimal_to_f64, parse_time_label};
use crate::error::{ChartError, ChartResult};

/// Key of a result record.
///
/// The same label is read differently depending on the axis scale: as a
/// category, as a number, or as a calendar timestamp.
///
/// Deserialized strings always stay [`Label::Text`] with their source
/// spelling; a time scale parses them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawLabel")]
pub enum Label {
    Number(f64),
    Time(DateTime<Utc>),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Number(f64),
    Text(String),
}

impl From<RawLabel> for Label {
    fn from(raw: RawLabel) -> Self {
        match raw {
            RawLabel::Number(value) => Self::Number(value),
            RawLabel::Text(text) => Self::Text(text),
        }
    }
}

impl Label {
    /// Key used by categorical domains and band lookups.
    #[must_use]
    pub fn category_key(&self) -> String {
        self.to_string()
    }

    /// Reads the label as a finite number.
    ///
    /// Timestamps become epoch milliseconds.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Time(time) => datetime_to_unix_millis(*time),
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Reads the label as a calendar timestamp.
    ///
    /// Numbers are taken as epoch milliseconds.
    #[must_use]
    pub fn to_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Time(time) => Some(*time),
            Self::Text(text) => parse_time_label(text),
            Self::Number(value) => {
                if !value.is_finite() {
                    return None;
                }
                DateTime::<Utc>::from_timestamp_millis(value.round() as i64)
            }
        }
    }

    #[must_use]
    pub fn to_timestamp_millis(&self) -> Option<f64> {
        self.to_time().map(datetime_to_unix_millis)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Time(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Label {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<DateTime<Utc>> for Label {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

/// One row of a query result: a key and its measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub name: Label,
    pub value: f64,
}

impl ResultRecord {
    #[must_use]
    pub fn new(name: impl Into<Label>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn from_decimal(name: impl Into<Label>, value: Decimal) -> ChartResult<Self> {
        Ok(Self {
            name: name.into(),
            value: decimal_to_f64(value, "value")?,
        })
    }
}

/// Column type of the query dimension that produced the record keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
}

/// Date bucketing applied by the query that produced the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
    Minute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDimension {
    pub field_type: FieldType,
    #[serde(default)]
    pub group_by: Option<GroupBy>,
}

/// Optional description of the query behind a result set.
///
/// Only tick-label formatting reads it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryMetadata {
    #[serde(default)]
    pub dimensions: Vec<QueryDimension>,
}

impl QueryMetadata {
    #[must_use]
    pub fn primary_dimension(&self) -> Option<&QueryDimension> {
        self.dimensions.first()
    }
}

/// Ordered result records sharing one key space.
///
/// Construction rejects non-finite values so a bad record can never leak into
/// the shared min/max computation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct Series {
    records: Vec<ResultRecord>,
    #[serde(default)]
    query: Option<QueryMetadata>,
}

#[derive(Deserialize)]
struct RawSeries {
    records: Vec<ResultRecord>,
    #[serde(default)]
    query: Option<QueryMetadata>,
}

impl TryFrom<RawSeries> for Series {
    type Error = ChartError;

    fn try_from(raw: RawSeries) -> ChartResult<Self> {
        let series = Self::new(raw.records)?;
        Ok(match raw.query {
            Some(query) => series.with_query(query),
            None => series,
        })
    }
}

impl Series {
    pub fn new(records: Vec<ResultRecord>) -> ChartResult<Self> {
        if let Some(index) = records.iter().position(|record| !record.value.is_finite()) {
            return Err(ChartError::NonFiniteValue { index });
        }
        Ok(Self {
            records,
            query: None,
        })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryMetadata) -> Self {
        self.query = Some(query);
        self
    }

    #[must_use]
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    #[must_use]
    pub fn query(&self) -> Option<&QueryMetadata> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter()
    }
}

/// Named series drawn as one line of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub series: Series,
}

impl NamedSeries {
    #[must_use]
    pub fn new(name: impl Into<String>, series: Series) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}
