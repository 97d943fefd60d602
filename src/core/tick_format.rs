use serde::{Deserialize, Serialize};

/// Maximum fixed-point precision a tick label may request.
const MAX_DECIMAL_DIGITS: usize = 20;

/// Value-axis label format chosen from the generated tick values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickFormat {
    /// Thousands-grouped integer, e.g. `12,500`.
    Integer,
    /// Thousands-grouped fixed point with `digits` decimals, e.g. `1,234.50`.
    Decimal { digits: usize },
}

impl TickFormat {
    #[must_use]
    pub fn decimal(digits: usize) -> Self {
        Self::Decimal {
            digits: digits.min(MAX_DECIMAL_DIGITS),
        }
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let fixed = match self {
            Self::Integer => format!("{:.0}", value),
            Self::Decimal { digits } => format!("{:.*}", digits, value),
        };
        group_thousands(&fixed)
    }

    /// Rendered label width in characters.
    #[must_use]
    pub fn label_len(self, value: f64) -> usize {
        self.format(value).chars().count()
    }
}

/// Inserts `,` separators into the integer part of a plain decimal string.
///
/// A value that rounded to zero drops its minus sign (`-0.00` → `0.00`).
fn group_thousands(fixed: &str) -> String {
    let (negative, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, fixed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    let is_zero = unsigned.chars().all(|c| c == '0' || c == '.');

    let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    if negative && !is_zero {
        grouped.push('-');
    }
    let leading = integer.len() % 3;
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (index + 3 - leading) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
