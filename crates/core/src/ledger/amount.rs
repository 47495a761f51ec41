//! Parsing of user-supplied amounts and conversion to storage units.
//!
//! Amounts are decimals with at most two fractional digits. Storage keeps
//! them as integer minor units (cents), which every SQL backend handles
//! exactly.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::error::LedgerError;

/// Number of fractional digits an amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest amount or balance representable in storage.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(u32::MAX, 0x7FFF_FFFF, 0, false, AMOUNT_SCALE);

/// Parses an amount typed into a form.
///
/// Accepts plain decimal notation (`100`, `40.5`, `-3`) and scientific
/// notation (`1e2`). Anything else, including `NaN`, `inf`, digit group
/// separators (`1_000`), more than two fractional digits or a magnitude
/// beyond [`MAX_AMOUNT`], is `LedgerError::InvalidAmount`. The sign is not
/// checked here.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LedgerError::InvalidAmount);
    }
    // `Decimal::from_str` skips underscores
    if !raw
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
    {
        return Err(LedgerError::InvalidAmount);
    }

    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| LedgerError::InvalidAmount)?
        .normalize();

    if amount.scale() > AMOUNT_SCALE || amount.abs() > MAX_AMOUNT {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(amount)
}

/// Converts an amount to integer minor units.
///
/// # Errors
///
/// Returns `LedgerError::InvalidAmount` if the amount has sub-cent precision
/// or does not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<i64, LedgerError> {
    let scaled = amount * Decimal::ONE_HUNDRED;
    if scaled.fract() != Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    scaled.to_i64().ok_or(LedgerError::InvalidAmount)
}

/// Converts integer minor units back to an amount.
#[must_use]
pub fn from_minor_units(units: i64) -> Decimal {
    Decimal::new(units, AMOUNT_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("100", dec!(100))]
    #[case("40.50", dec!(40.5))]
    #[case("  7 ", dec!(7))]
    #[case("-3", dec!(-3))]
    #[case("0", dec!(0))]
    #[case("0.01", dec!(0.01))]
    #[case("1e2", dec!(100))]
    fn test_parse_valid(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_amount(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("NaN")]
    #[case("inf")]
    #[case("12,5")]
    #[case("1.2.3")]
    #[case("1_000")]
    #[case("_5")]
    #[case("0.001")]
    #[case("99999999999999999999")]
    fn test_parse_invalid(#[case] raw: &str) {
        assert!(matches!(parse_amount(raw), Err(LedgerError::InvalidAmount)));
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(to_minor_units(dec!(100)).unwrap(), 10_000);
        assert_eq!(to_minor_units(dec!(40.5)).unwrap(), 4_050);
        assert_eq!(to_minor_units(dec!(0)).unwrap(), 0);
        assert_eq!(from_minor_units(6_000), dec!(60));
        assert_eq!(from_minor_units(1), dec!(0.01));
        assert!(to_minor_units(dec!(0.005)).is_err());
    }

    #[test]
    fn test_max_amount_fits_storage() {
        assert_eq!(to_minor_units(MAX_AMOUNT).unwrap(), i64::MAX);
        assert_eq!(from_minor_units(i64::MAX), MAX_AMOUNT);
    }
}
