use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One observation or prediction at a gauge.
///
/// `value_min`/`value_max` carry banded marks (areas, value-range rectangles).
/// A draw call uses either the scalar `value` or the range fields, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: String,
    pub date_time: NaiveDateTime,
    pub value: f64,
    #[serde(default)]
    pub value_min: Option<f64>,
    #[serde(default)]
    pub value_max: Option<f64>,
    #[serde(default)]
    pub class: Option<String>,
}

impl Point {
    #[must_use]
    pub fn new(id: impl Into<String>, date_time: NaiveDateTime, value: f64) -> Self {
        Self {
            id: id.into(),
            date_time,
            value,
            value_min: None,
            value_max: None,
            class: None,
        }
    }

    /// Creates a range-only point. `value` is set to the band midpoint.
    #[must_use]
    pub fn range(
        id: impl Into<String>,
        date_time: NaiveDateTime,
        value_min: f64,
        value_max: f64,
    ) -> Self {
        Self::new(id, date_time, (value_min + value_max) / 2.0).with_range(value_min, value_max)
    }

    #[must_use]
    pub fn with_range(mut self, value_min: f64, value_max: f64) -> Self {
        self.value_min = Some(value_min);
        self.value_max = Some(value_max);
        self
    }

    #[must_use]
    pub fn with_value_min(mut self, value_min: f64) -> Self {
        self.value_min = Some(value_min);
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    #[must_use]
    pub fn field(&self, field: PointField) -> Option<f64> {
        match field {
            PointField::Value => Some(self.value),
            PointField::ValueMin => self.value_min,
            PointField::ValueMax => self.value_max,
        }
        .filter(|value| value.is_finite())
    }

    /// Returns `(value_min, value_max)` when both are present and finite.
    #[must_use]
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        Some((
            self.field(PointField::ValueMin)?,
            self.field(PointField::ValueMax)?,
        ))
    }

    #[must_use]
    pub fn epoch_millis(&self) -> f64 {
        epoch_millis(self.date_time)
    }
}

/// Numeric fields a mark kind may read from a [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointField {
    Value,
    ValueMin,
    ValueMax,
}

/// Closed `[min, max]` value extent used to calibrate value scales and ticks.
///
/// Degenerate domains (`min == max`) and domains spanning zero are valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    min: f64,
    max: f64,
}

impl ValueDomain {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "value domain bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(ChartError::InvalidData(format!(
                "value domain min ({min}) must be <= max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Extent of the finite values in `values`, or `None` when there are none.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        (min <= max).then_some(Self { min, max })
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.min == self.max
    }

    /// Strict interior test used by log-tick filtering.
    #[must_use]
    pub fn contains_open(self, value: f64) -> bool {
        value > self.min && value < self.max
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[must_use]
pub fn epoch_millis(date_time: NaiveDateTime) -> f64 {
    date_time.and_utc().timestamp_millis() as f64
}

#[must_use]
pub fn from_epoch_millis(millis: f64) -> NaiveDateTime {
    let clamped = if millis.is_finite() {
        millis.round() as i64
    } else {
        0
    };
    DateTime::<Utc>::from_timestamp_millis(clamped)
        .map(|date_time| date_time.naive_utc())
        .unwrap_or_default()
}

/// Shifts `date_time` by whole calendar days.
///
/// Fractional offsets are floored first, so `-2.5` moves back three days and
/// `2.5` moves forward two.
#[must_use]
pub fn offset_days(date_time: NaiveDateTime, days: f64) -> NaiveDateTime {
    if !days.is_finite() {
        return date_time;
    }
    TimeDelta::try_days(days.floor() as i64)
        .and_then(|delta| date_time.checked_add_signed(delta))
        .unwrap_or(date_time)
}

/// Midnight of `date`, the instant used for daily CSV rows.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
