//! # Rating Aggregator
//!
//! Folds a set of rating values into the averages the API reports.
//!
//! Two precisions are in use and both are kept as they are:
//! - per professor across all modules: one decimal place,
//! - per professor within one module: a whole number.
//!
//! Rounding is half-to-even (banker's rounding) on the exact binary value of
//! the mean computed as a double. So `[4, 5]` averages to
//! `4.5` and to `4` at whole-number precision, and a mean such as `4.35`
//! (stored as slightly less than 4.35) rounds down to `4.3`.

use common::model::average::Average;

/// Arithmetic mean, or `None` for an empty set.
pub fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().sum();
    Some(sum as f64 / values.len() as f64)
}

/// Average over every rating a professor received, to one decimal place.
pub fn professor_average(values: &[i64]) -> Average<f64> {
    mean(values).map(|m| round_half_even(m, 1)).into()
}

/// Average of a professor within one module, to the nearest whole number.
pub fn pair_average(values: &[i64]) -> Average<i64> {
    mean(values)
        .map(|m| round_half_even(m, 0) as i64)
        .into()
}

/// Rounds `value` to `places` decimal places, ties to even.
///
/// The decision is made on the exact value the double represents, not on
/// its shortest decimal rendering: the double is split into an integer
/// mantissa and a power-of-two exponent and the scaled value is compared
/// against the halfway point in integer arithmetic.
pub fn round_half_even(value: f64, places: u32) -> f64 {
    debug_assert!(places <= 15);
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    let bits = value.to_bits();
    let biased_exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1_u64 << 52) - 1);
    // value == mantissa * 2^exponent exactly
    let (mantissa, exponent) = if biased_exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1_u64 << 52), biased_exponent - 1075)
    };
    if exponent >= 0 {
        // Already an integer.
        return value;
    }

    let shift = exponent.unsigned_abs();
    if shift >= 127 {
        return 0.0_f64.copysign(value);
    }
    let scale = 10_u128.pow(places);
    let scaled = u128::from(mantissa) * scale;
    let quotient = scaled >> shift;
    let remainder = scaled & ((1_u128 << shift) - 1);
    let half = 1_u128 << (shift - 1);
    let rounded = if remainder > half || (remainder == half && quotient & 1 == 1) {
        quotient + 1
    } else {
        quotient
    };

    (rounded as f64 / scale as f64).copysign(value)
}
