use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::types::{epoch_millis, from_epoch_millis};

/// Default domain used when no time extent is known: one millisecond after epoch.
const DEFAULT_DOMAIN_MILLIS: (f64, f64) = (0.0, 1.0);

/// Horizontal scale mapping calendar instants onto `[0, range_size]`.
///
/// Instants are timezone-naive and compared through their epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
    has_domain: bool,
}

impl TimeScale {
    #[must_use]
    pub fn new(domain: Option<(NaiveDateTime, NaiveDateTime)>, range_size: f64) -> Self {
        let domain_millis = domain.map(|(start, end)| (epoch_millis(start), epoch_millis(end)));
        Self::from_millis(domain_millis, range_size)
    }

    #[must_use]
    pub fn from_millis(domain: Option<(f64, f64)>, range_size: f64) -> Self {
        let has_domain = domain.is_some();
        Self {
            linear: LinearScale::new(
                domain.unwrap_or(DEFAULT_DOMAIN_MILLIS),
                (0.0, range_size),
            ),
            has_domain,
        }
    }

    /// Whether an explicit domain was supplied.
    #[must_use]
    pub fn has_domain(self) -> bool {
        self.has_domain
    }

    #[must_use]
    pub fn domain(self) -> (NaiveDateTime, NaiveDateTime) {
        let (start, end) = self.linear.domain();
        (from_epoch_millis(start), from_epoch_millis(end))
    }

    #[must_use]
    pub fn domain_millis(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn map(self, date_time: NaiveDateTime) -> f64 {
        self.linear.map(epoch_millis(date_time))
    }

    #[must_use]
    pub fn map_millis(self, millis: f64) -> f64 {
        self.linear.map(millis)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> NaiveDateTime {
        from_epoch_millis(self.linear.invert(pixel))
    }
}

/// Builds a horizontal time scale over `[0, range_size]`.
#[must_use]
pub fn build_time_scale(
    domain: Option<(NaiveDateTime, NaiveDateTime)>,
    range_size: f64,
) -> TimeScale {
    TimeScale::new(domain, range_size)
}

#[cfg(test)]
mod tests {
    use super::build_time_scale;
    use crate::core::types::start_of_day;
    use chrono::NaiveDate;

    #[test]
    fn maps_domain_endpoints_onto_range() {
        let start = start_of_day(NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"));
        let end = start_of_day(NaiveDate::from_ymd_opt(2024, 1, 11).expect("date"));
        let mid = start_of_day(NaiveDate::from_ymd_opt(2024, 1, 6).expect("date"));
        let scale = build_time_scale(Some((start, end)), 500.0);

        assert_eq!(scale.map(start), 0.0);
        assert_eq!(scale.map(end), 500.0);
        assert!((scale.map(mid) - 250.0).abs() <= 1e-9);
        assert_eq!(scale.invert(250.0), mid);
    }

    #[test]
    fn missing_domain_uses_default_identity() {
        let scale = build_time_scale(None, 10.0);
        assert!(!scale.has_domain());
        assert_eq!(scale.domain_millis(), (0.0, 1.0));
        assert_eq!(scale.map_millis(1.0), 10.0);
    }
}
