//! "Nice" linear tick generation.
//!
//! Steps are 1, 2, 5 or 10 times a power of ten. Exactness matters for label
//! formatting, so negative powers are computed through the inverse increment
//! (`i / 10^k` instead of `i * 10^-k`), which keeps `0.2` from becoming
//! `0.20000000000000004`.

const E10: f64 = 7.071_067_811_865_475_5; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq)]
struct TickSpec {
    first_index: f64,
    last_index: f64,
    /// Positive: multiply indices by it. Negative: divide indices by its magnitude.
    increment: f64,
}

/// Rounds half-way cases toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> TickSpec {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut first_index, mut last_index, increment);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        first_index = round_half_up(start * inverse);
        last_index = round_half_up(stop * inverse);
        if first_index / inverse < start {
            first_index += 1.0;
        }
        if last_index / inverse > stop {
            last_index -= 1.0;
        }
        increment = -inverse;
    } else {
        let step = 10f64.powf(power) * factor;
        first_index = round_half_up(start / step);
        last_index = round_half_up(stop / step);
        if first_index * step < start {
            first_index += 1.0;
        }
        if last_index * step > stop {
            last_index -= 1.0;
        }
        increment = step;
    }

    if last_index < first_index && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    TickSpec {
        first_index,
        last_index,
        increment,
    }
}

/// Returns the step a nice tick sequence over `[start, stop]` would use.
///
/// Positive results are the step itself; negative results `-k` mean a step of `1/k`.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let (low, high) = if start <= stop { (start, stop) } else { (stop, start) };
    tick_spec(low, high, count as f64).increment
}

/// Generates roughly `count` nice ticks spanning `[start, stop]`.
///
/// Ticks are ordered like the inputs, so `start > stop` yields descending
/// values. `start == stop` yields `[start]`.
#[must_use]
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let spec = if reverse {
        tick_spec(stop, start, count as f64)
    } else {
        tick_spec(start, stop, count as f64)
    };
    if !spec.increment.is_finite()
        || spec.increment == 0.0
        || !(spec.last_index >= spec.first_index)
    {
        return Vec::new();
    }

    let n = (spec.last_index - spec.first_index) as usize + 1;
    let value_at = |index: f64| {
        if spec.increment < 0.0 {
            index / -spec.increment
        } else {
            index * spec.increment
        }
    };

    (0..n)
        .map(|offset| {
            let offset = offset as f64;
            if reverse {
                value_at(spec.last_index - offset)
            } else {
                value_at(spec.first_index + offset)
            }
        })
        .collect()
}
