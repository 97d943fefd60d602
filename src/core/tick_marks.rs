use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::tick_format::TickFormat;
use crate::core::ticks::linear_ticks;
use crate::core::types::ValueDomain;

pub const WATER_DATA_DEFAULT_TICK_COUNT: usize = 5;
pub const MAX_WATER_DATA_TICK_COUNT: usize = 12;

/// Entries kept by [`TickCache`] before it starts over.
const TICK_CACHE_CAPACITY: usize = 256;

/// Value-axis ticks derived from a domain and scale kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSet {
    pub tick_values: Vec<f64>,
    pub tick_format: TickFormat,
    pub max_tick_label_length: usize,
}

impl TickSet {
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        self.tick_format.format(value)
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.tick_values
            .iter()
            .map(|value| self.tick_format.format(*value))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tick_values.is_empty()
    }
}

/// Extra ticks between `nearest_to_zero` and `domain_start` by repeated
/// halving. Works on magnitudes; callers negate results for negative sides.
fn additional_log_ticks(nearest_to_zero: f64, domain_start: f64) -> SmallVec<[f64; 12]> {
    let mut result = SmallVec::new();
    let mut next = nearest_to_zero;
    while next > 2.0 && next > domain_start {
        next = (next / 2.0).ceil();
        result.push(next);
    }
    result
}

/// Rounds outward to a display-friendly value for log axes.
///
/// Above 100 the tick snaps up to its leading power of ten, above 20 to a
/// multiple of 10, above 2 to a multiple of 2. Smaller ticks are unchanged.
#[must_use]
pub fn round_log_tick(tick: f64) -> f64 {
    let magnitude = tick.abs();
    let factor = if magnitude > 100.0 {
        10f64.powf(magnitude.log10().floor())
    } else if magnitude > 20.0 {
        10.0
    } else if magnitude > 2.0 {
        2.0
    } else {
        return tick;
    };
    (tick / factor).ceil() * factor
}

fn densify_log_ticks(domain: ValueDomain, baseline: Vec<f64>) -> Vec<f64> {
    let (min, max) = domain.bounds();
    let mut merged = baseline;

    if min > 0.0 {
        if let Some(&smallest) = merged.first() {
            merged.extend(additional_log_ticks(smallest, min));
        }
    } else if max < 0.0 {
        if let Some(&closest) = merged.last() {
            merged.extend(
                additional_log_ticks(closest.abs(), max.abs())
                    .into_iter()
                    .map(|value| -value),
            );
        }
    } else {
        let positive = merged.iter().copied().find(|value| *value > 0.0);
        let negative = merged.iter().copied().rev().find(|value| *value < 0.0);
        let mut extra: SmallVec<[f64; 24]> = SmallVec::new();
        if let Some(positive) = positive {
            extra.extend(additional_log_ticks(positive, 0.0));
        }
        if let Some(negative) = negative {
            extra.extend(
                additional_log_ticks(-negative, 0.0)
                    .into_iter()
                    .map(|value| -value),
            );
        }
        merged.extend(extra);
    }

    merged.sort_by(f64::total_cmp);
    while merged.len() > MAX_WATER_DATA_TICK_COUNT {
        merged = merged
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| (index % 2 == 1).then_some(value))
            .collect();
    }

    let mut rounded: Vec<f64> = merged.iter().copied().map(round_log_tick).collect();
    rounded.dedup();
    rounded.retain(|value| domain.contains_open(*value));
    if rounded.len() > 1 {
        return rounded;
    }

    merged.retain(|value| domain.contains_open(*value));
    merged
}

fn select_tick_format(tick_values: &[f64]) -> TickFormat {
    if tick_values.iter().all(|value| value.fract() == 0.0) {
        return TickFormat::Integer;
    }
    if tick_values.len() < 2 {
        return TickFormat::decimal(2);
    }

    let first = tick_values[0];
    let last = tick_values[tick_values.len() - 1];
    let spacing = (last - first) / tick_values.len() as f64;
    let digits = spacing.log10().abs().ceil();
    if digits.is_finite() {
        TickFormat::decimal(digits as usize)
    } else {
        TickFormat::decimal(2)
    }
}

/// Generates value-axis ticks for a water-data chart.
///
/// Linear axes use about five nice ticks. Symlog axes add halving ticks
/// toward zero, cap the total at [`MAX_WATER_DATA_TICK_COUNT`] and round for
/// display. With `reverse_range` the values come back descending.
#[must_use]
pub fn get_water_data_ticks(domain: ValueDomain, use_symlog: bool, reverse_range: bool) -> TickSet {
    let mut tick_values = linear_ticks(domain.min(), domain.max(), WATER_DATA_DEFAULT_TICK_COUNT);
    if use_symlog {
        tick_values = densify_log_ticks(domain, tick_values);
    }

    let tick_format = select_tick_format(&tick_values);
    let max_tick_label_length = tick_values
        .iter()
        .map(|value| tick_format.label_len(*value))
        .max()
        .unwrap_or(0);

    if reverse_range {
        tick_values.reverse();
    }
    TickSet {
        tick_values,
        tick_format,
        max_tick_label_length,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TickCacheKey {
    min: OrderedFloat<f64>,
    max: OrderedFloat<f64>,
    use_symlog: bool,
    reverse_range: bool,
}

/// Runtime metrics exposed by [`TickCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Memoizes [`get_water_data_ticks`] by domain and scale flags.
#[derive(Debug, Default)]
pub struct TickCache {
    entries: HashMap<TickCacheKey, TickSet>,
    hits: u64,
    misses: u64,
}

impl TickCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute(
        &mut self,
        domain: ValueDomain,
        use_symlog: bool,
        reverse_range: bool,
    ) -> &TickSet {
        let key = TickCacheKey {
            min: OrderedFloat(domain.min()),
            max: OrderedFloat(domain.max()),
            use_symlog,
            reverse_range,
        };
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            if self.entries.len() >= TICK_CACHE_CAPACITY {
                self.entries.clear();
            }
            debug!(
                min = domain.min(),
                max = domain.max(),
                use_symlog,
                reverse_range,
                "tick cache miss"
            );
        }
        self.entries
            .entry(key)
            .or_insert_with(|| get_water_data_ticks(domain, use_symlog, reverse_range))
    }

    #[must_use]
    pub fn stats(&self) -> TickCacheStats {
        TickCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
