//! Number parsing with the leniency of the editing front end.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serializer;

/// Longest numeric prefix, as accepted by a lenient `parseFloat`.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
});

/// A complete decimal number and nothing else.
static NUMERIC_FULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").unwrap());

/// Parse the leading number of `input`, ignoring leading whitespace and any
/// trailing text. Returns NaN when no number starts the string.
pub fn parse_float(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let Some(m) = NUMERIC_PREFIX.find(trimmed) else {
        return f64::NAN;
    };

    let text = m.as_str();
    match text.trim_start_matches(['+', '-']) {
        "Infinity" if text.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => text.parse().unwrap_or(f64::NAN),
    }
}

/// Whether the trimmed input is a plain decimal number.
pub fn is_numeric(input: &str) -> bool {
    NUMERIC_FULL.is_match(input.trim())
}

/// Write a number as a JSON integer when it is integral, so `"10"` compiles
/// to `10` rather than `10.0`. Non-finite values become `null`.
pub(crate) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;

    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
