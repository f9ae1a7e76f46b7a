use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::core::record::Label;
use crate::core::scale::LinearScale;
use crate::core::ticks::tick_step;
use crate::error::{ChartError, ChartResult};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
const WEEK_MS: i64 = 7 * DAY_MS;
// 1970-01-01 was a Thursday; weekly ticks land on Mondays.
const MONDAY_OFFSET_MS: i64 = 4 * DAY_MS;
const APPROX_MONTH_MS: i64 = 30 * DAY_MS;
const APPROX_YEAR_MS: i64 = 365 * DAY_MS;

/// Calendar interval used to space temporal ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInterval {
    Fixed { millis: i64, offset: i64 },
    Months(u32),
    Years(i32),
}

impl TickInterval {
    fn approx_millis(self) -> i64 {
        match self {
            Self::Fixed { millis, .. } => millis,
            Self::Months(months) => i64::from(months) * APPROX_MONTH_MS,
            Self::Years(years) => i64::from(years) * APPROX_YEAR_MS,
        }
    }
}

const TICK_INTERVALS: [TickInterval; 18] = [
    TickInterval::Fixed { millis: SECOND_MS, offset: 0 },
    TickInterval::Fixed { millis: 5 * SECOND_MS, offset: 0 },
    TickInterval::Fixed { millis: 15 * SECOND_MS, offset: 0 },
    TickInterval::Fixed { millis: 30 * SECOND_MS, offset: 0 },
    TickInterval::Fixed { millis: MINUTE_MS, offset: 0 },
    TickInterval::Fixed { millis: 5 * MINUTE_MS, offset: 0 },
    TickInterval::Fixed { millis: 15 * MINUTE_MS, offset: 0 },
    TickInterval::Fixed { millis: 30 * MINUTE_MS, offset: 0 },
    TickInterval::Fixed { millis: HOUR_MS, offset: 0 },
    TickInterval::Fixed { millis: 3 * HOUR_MS, offset: 0 },
    TickInterval::Fixed { millis: 6 * HOUR_MS, offset: 0 },
    TickInterval::Fixed { millis: 12 * HOUR_MS, offset: 0 },
    TickInterval::Fixed { millis: DAY_MS, offset: 0 },
    TickInterval::Fixed { millis: 2 * DAY_MS, offset: 0 },
    TickInterval::Fixed { millis: WEEK_MS, offset: MONDAY_OFFSET_MS },
    TickInterval::Months(1),
    TickInterval::Months(3),
    TickInterval::Years(1),
];

/// Linear mapping over calendar timestamps (epoch milliseconds, UTC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    /// Builds a scale over a millisecond domain.
    pub fn new(domain_millis: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            linear: LinearScale::new(domain_millis, range)?,
        })
    }

    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        range: (f64, f64),
    ) -> ChartResult<Self> {
        Self::new(
            (datetime_to_unix_millis(start), datetime_to_unix_millis(end)),
            range,
        )
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn apply_millis(self, millis: f64) -> ChartResult<f64> {
        self.linear.apply(millis)
    }

    pub fn apply_time(self, time: DateTime<Utc>) -> ChartResult<f64> {
        self.linear.apply(datetime_to_unix_millis(time))
    }

    /// Parses the label as a date and maps it.
    ///
    /// An unparsable label is an error, never a silent zero.
    pub fn apply_label(self, label: &Label) -> ChartResult<f64> {
        let millis = label
            .to_timestamp_millis()
            .ok_or_else(|| ChartError::UnreadableLabel {
                label: label.to_string(),
                expected: "a calendar date",
            })?;
        self.apply_millis(millis)
    }

    pub fn invert(self, pixel: f64) -> ChartResult<DateTime<Utc>> {
        let millis = self.linear.invert(pixel)?;
        unix_millis_to_datetime(millis).ok_or_else(|| {
            ChartError::InvalidData("inverted time is outside the calendar range".to_owned())
        })
    }

    /// Calendar-aligned tick timestamps inside the domain, ascending.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<DateTime<Utc>> {
        let (a, b) = self.domain();
        let (lo, hi) = (a.min(b), a.max(b));
        if tick_count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return unix_millis_to_datetime(lo).into_iter().collect();
        }

        let target = (hi - lo) / tick_count as f64;
        let interval = select_interval(lo, hi, tick_count, target);
        let (lo, hi) = (lo.ceil() as i64, hi.floor() as i64);
        match interval {
            TickInterval::Fixed { millis, offset } => fixed_ticks(lo, hi, millis, offset),
            TickInterval::Months(months) => calendar_ticks(lo, hi, Step::Months(months)),
            TickInterval::Years(years) => calendar_ticks(lo, hi, Step::Years(years)),
        }
    }
}

fn select_interval(lo: f64, hi: f64, tick_count: usize, target: f64) -> TickInterval {
    let last = TICK_INTERVALS[TICK_INTERVALS.len() - 1];
    if target > last.approx_millis() as f64 {
        let years_span = (hi - lo) / APPROX_YEAR_MS as f64;
        let years = tick_step(0.0, years_span, tick_count).unwrap_or(1.0).max(1.0);
        return TickInterval::Years(years.round() as i32);
    }

    TICK_INTERVALS
        .iter()
        .copied()
        .min_by(|left, right| {
            let left = (left.approx_millis() as f64 - target).abs();
            let right = (right.approx_millis() as f64 - target).abs();
            left.total_cmp(&right)
        })
        .unwrap_or(last)
}

fn fixed_ticks(lo: i64, hi: i64, millis: i64, offset: i64) -> Vec<DateTime<Utc>> {
    let first = (lo - offset).div_euclid(millis) * millis + offset;
    let first = if first < lo { first + millis } else { first };
    let mut ticks = Vec::new();
    let mut current = first;
    while current <= hi {
        if let Some(time) = DateTime::<Utc>::from_timestamp_millis(current) {
            ticks.push(time);
        }
        current += millis;
    }
    ticks
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Months(u32),
    Years(i32),
}

fn calendar_ticks(lo: i64, hi: i64, step: Step) -> Vec<DateTime<Utc>> {
    let (Some(start), Some(_)) = (
        DateTime::<Utc>::from_timestamp_millis(lo),
        DateTime::<Utc>::from_timestamp_millis(hi),
    ) else {
        return Vec::new();
    };

    let anchor = match step {
        Step::Months(months) => {
            let month0 = (start.month0() / months) * months;
            NaiveDate::from_ymd_opt(start.year(), month0 + 1, 1)
        }
        Step::Years(years) => {
            NaiveDate::from_ymd_opt(start.year().div_euclid(years) * years, 1, 1)
        }
    };
    let Some(mut current) = anchor else {
        return Vec::new();
    };

    let mut ticks = Vec::new();
    loop {
        let Some(time) = current.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()) else {
            break;
        };
        let millis = time.timestamp_millis();
        if millis > hi {
            break;
        }
        if millis >= lo {
            ticks.push(time);
        }
        let next = match step {
            Step::Months(months) => current.checked_add_months(Months::new(months)),
            Step::Years(years) => current.with_year(current.year() + years),
        };
        match next {
            Some(next) => current = next,
            None => break,
        }
    }
    ticks
}
