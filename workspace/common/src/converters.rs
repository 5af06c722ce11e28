//! Small conversions used when turning computed values into display text.

/// Formats with two decimals; non-finite values are printed as-is
/// (`nan`, `inf`, `-inf`).
pub fn format_two_decimals(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Keeps finite values only. JSON has no representation for NaN or infinity.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
