use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::parse_time_label;
use crate::core::{FieldType, GroupBy, QueryMetadata};

/// Calendar rendering applied to date tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePattern {
    Year,
    Quarter,
    Month,
    Day,
    Hour,
    Minute,
}

impl DatePattern {
    fn format(self, time: DateTime<Utc>) -> String {
        match self {
            Self::Year => time.format("%Y").to_string(),
            Self::Quarter => format!("Q{} {}", time.month0() / 3 + 1, time.year()),
            Self::Month => time.format("%b %Y").to_string(),
            Self::Day => time.format("%Y-%m-%d").to_string(),
            Self::Hour => time.format("%Y-%m-%d %H:00").to_string(),
            Self::Minute => time.format("%H:%M").to_string(),
        }
    }
}

/// Tick-label formatter selected from the query that produced the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickFormat {
    #[default]
    Plain,
    Decimal { max_precision: u8 },
    Date(DatePattern),
    Boolean,
}

/// Formatter for a dimension of the given field type and date bucketing.
#[must_use]
pub fn tick_format(field_type: FieldType, group_by: Option<GroupBy>) -> TickFormat {
    match field_type {
        FieldType::Text => TickFormat::Plain,
        FieldType::Number => TickFormat::Decimal { max_precision: 2 },
        FieldType::Boolean => TickFormat::Boolean,
        FieldType::Date => TickFormat::Date(match group_by {
            Some(GroupBy::Year) => DatePattern::Year,
            Some(GroupBy::Quarter) => DatePattern::Quarter,
            Some(GroupBy::Month) => DatePattern::Month,
            Some(GroupBy::Week | GroupBy::Day) | None => DatePattern::Day,
            Some(GroupBy::Hour) => DatePattern::Hour,
            Some(GroupBy::Minute) => DatePattern::Minute,
        }),
    }
}

/// Formatter for the first query dimension, when the query names one.
#[must_use]
pub fn tick_format_for_query(query: Option<&QueryMetadata>) -> Option<TickFormat> {
    query
        .and_then(QueryMetadata::primary_dimension)
        .map(|dimension| tick_format(dimension.field_type, dimension.group_by))
}

impl TickFormat {
    /// Formats a categorical tick; text the formatter cannot read passes through.
    #[must_use]
    pub fn format_text(self, text: &str) -> String {
        match self {
            Self::Plain => text.to_owned(),
            Self::Decimal { .. } => match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => self.format_number(value),
                _ => text.to_owned(),
            },
            Self::Date(pattern) => {
                parse_time_label(text).map_or_else(|| text.to_owned(), |time| pattern.format(time))
            }
            Self::Boolean => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => "Yes".to_owned(),
                "false" | "0" => "No".to_owned(),
                _ => text.to_owned(),
            },
        }
    }

    #[must_use]
    pub fn format_number(self, value: f64) -> String {
        let precision = match self {
            Self::Decimal { max_precision } => usize::from(max_precision),
            Self::Plain | Self::Date(_) | Self::Boolean => 6,
        };
        format_axis_decimal(value, precision)
    }

    #[must_use]
    pub fn format_time(self, time: DateTime<Utc>) -> String {
        match self {
            Self::Date(pattern) => pattern.format(time),
            Self::Plain | Self::Decimal { .. } | Self::Boolean => DatePattern::Day.format(time),
        }
    }
}

/// Picks a date pattern fine enough for ticks over the given span.
#[must_use]
pub fn adaptive_date_pattern(visible_span_ms: f64) -> DatePattern {
    const HOUR_MS: f64 = 3_600_000.0;
    const DAY_MS: f64 = 24.0 * HOUR_MS;
    let span = visible_span_ms.abs();
    if span <= 6.0 * HOUR_MS {
        DatePattern::Minute
    } else if span <= 3.0 * DAY_MS {
        DatePattern::Hour
    } else if span <= 120.0 * DAY_MS {
        DatePattern::Day
    } else if span <= 3.0 * 365.0 * DAY_MS {
        DatePattern::Month
    } else {
        DatePattern::Year
    }
}

/// Fixed-precision decimal with trailing zeros trimmed.
pub(super) fn format_axis_decimal(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let text = format!("{value:.precision$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" { "0".to_owned() } else { text.to_owned() }
}
