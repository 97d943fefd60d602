use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::core::types::ValueDomain;

/// Share of the domain span added on each side of the value domain.
pub const DATA_PADDING_RATIO: f64 = 0.2;

/// Domain assumed by an uncalibrated scale.
const UNCALIBRATED_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Symlog transform constant.
const SYMLOG_CONSTANT: f64 = 1.0;

/// User-facing value axis kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    /// Rendered through a symmetric-log transform, continuous through zero.
    Log,
}

impl ScaleKind {
    #[must_use]
    pub fn uses_symlog(self) -> bool {
        matches!(self, Self::Log)
    }
}

/// Transform applied between domain and range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueTransform {
    Linear,
    Symlog,
}

impl ValueTransform {
    #[must_use]
    pub fn forward(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Symlog => value.signum() * (value.abs() / SYMLOG_CONSTANT).ln_1p(),
        }
    }

    #[must_use]
    pub fn inverse(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Symlog => value.signum() * value.abs().exp_m1() * SYMLOG_CONSTANT,
        }
    }
}

/// Vertical value scale, linear or symmetric-log.
///
/// A scale built without a domain keeps only its range and reports
/// `is_calibrated() == false`; it still maps through `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    transform: ValueTransform,
    domain: Option<(f64, f64)>,
    range: (f64, f64),
}

impl ValueScale {
    #[must_use]
    pub fn new(transform: ValueTransform, domain: Option<(f64, f64)>, range: (f64, f64)) -> Self {
        Self {
            transform,
            domain,
            range,
        }
    }

    #[must_use]
    pub fn transform(self) -> ValueTransform {
        self.transform
    }

    #[must_use]
    pub fn domain(self) -> Option<(f64, f64)> {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn is_calibrated(self) -> bool {
        self.domain.is_some()
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        self.transformed_linear().map(self.transform.forward(value))
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let transformed = self.transformed_linear().invert(pixel);
        self.transform.inverse(transformed)
    }

    /// Pixel extent covered by the range, top first.
    #[must_use]
    pub fn pixel_extent(self) -> (f64, f64) {
        (self.range.0.min(self.range.1), self.range.0.max(self.range.1))
    }

    fn transformed_linear(self) -> LinearScale {
        let (start, end) = self.domain.unwrap_or(UNCALIBRATED_DOMAIN);
        LinearScale::new(
            (self.transform.forward(start), self.transform.forward(end)),
            self.range,
        )
    }
}

/// Pads a raw value domain for display.
///
/// - `[0, 0]` becomes `[-0.5, 0.5]`.
/// - `[a, a]` is padded by `a / 2` on each side.
/// - Otherwise each side is padded by [`DATA_PADDING_RATIO`] of the span.
/// - On log scales a positive domain may use a tighter lower bound derived
///   from the order of magnitude of its minimum.
/// - Non-negative domains never extend below zero.
#[must_use]
pub fn pad_value_domain(domain: ValueDomain, use_log_scale: bool) -> (f64, f64) {
    let (min, max) = domain.bounds();
    let domain_is_positive = min >= 0.0 && max > 0.0;

    let mut extended = if min == 0.0 && max == 0.0 {
        (-0.5, 0.5)
    } else {
        let padding = if min == max {
            min / 2.0
        } else {
            DATA_PADDING_RATIO * (max - min)
        };
        (min - padding, max + padding)
    };

    if use_log_scale && domain_is_positive {
        let abs_log10 = min.log10().abs();
        let log_domain_low = min * abs_log10 / (abs_log10 + 1.0);
        if !log_domain_low.is_nan() && extended.0 < log_domain_low {
            extended.0 = log_domain_low;
        }
    }

    if domain_is_positive {
        extended.0 = extended.0.max(0.0);
    }
    extended
}

/// Builds the vertical value scale for a time-series chart.
///
/// The range is `[range_size, 0]` so values increase upward, or
/// `[0, range_size]` when `reverse_range` is set. Without a domain the scale
/// is left uncalibrated.
#[must_use]
pub fn build_value_scale(
    domain: Option<ValueDomain>,
    range_size: f64,
    use_log_scale: bool,
    reverse_range: bool,
) -> ValueScale {
    let transform = if use_log_scale {
        ValueTransform::Symlog
    } else {
        ValueTransform::Linear
    };
    let range = if reverse_range {
        (0.0, range_size)
    } else {
        (range_size, 0.0)
    };
    let padded = domain.map(|domain| pad_value_domain(domain, use_log_scale));
    ValueScale::new(transform, padded, range)
}
