//! Money arithmetic helpers using rust_decimal for precision
//!
//! Prices cross the wire as `f64` (or numeric strings normalized to
//! `f64`), but every aggregate is computed in `Decimal` and rounded to
//! 2 places, half-up, before converting back.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal; non-finite input becomes zero
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal back to f64, rounded to 2 places
pub(crate) fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Format a monetary value as a 2-decimal string ("1.50")
pub(crate) fn format_amount(value: f64) -> String {
    let mut amount = to_decimal(value)
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(DECIMAL_PLACES);
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_addition_avoids_float_drift() {
        // 0.1 + 0.2 != 0.3 in f64, but does in Decimal
        let sum = to_decimal(0.1) + to_decimal(0.2);
        assert_eq!(to_f64(sum), 0.3);
    }

    #[test]
    fn non_finite_input_coerces_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn amount_formatting_is_two_decimal() {
        assert_eq!(format_amount(1.5), "1.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(12.0), "12.00");
        assert_eq!(format_amount(-0.5), "-0.50");
    }
}
