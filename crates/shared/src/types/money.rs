//! Monetary amount normalization.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount entering the system goes through [`normalize`] so there is
//! exactly one place that knows how raw payload values become canonical
//! two-decimal monetary amounts.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places for stored monetary amounts.
pub const MONEY_SCALE: u32 = 2;

/// A monetary value as it arrives from a caller payload.
///
/// Accepts a JSON number, a numeric string, or null. Anything that cannot
/// be interpreted as a number normalizes to zero rather than failing: the
/// bug class this prevents is heterogeneous amount representations leaking
/// into arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum RawAmount {
    /// A well-formed decimal value (JSON number or numeric string).
    Number(Decimal),
    /// A string that did not parse as a number.
    Text(String),
    /// Absent or explicit null.
    #[default]
    Missing,
}

impl RawAmount {
    /// Converts this raw value into a canonical monetary amount.
    ///
    /// Returns zero for null, missing, or unparsable input. Well-formed
    /// values are rounded to cents with banker's rounding.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        let value = match self {
            Self::Number(d) => *d,
            Self::Text(s) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
            Self::Missing => Decimal::ZERO,
        };
        round_money(value)
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

/// Normalizes an optional raw amount, treating `None` as zero.
#[must_use]
pub fn normalize(value: Option<&RawAmount>) -> Decimal {
    value.map_or(Decimal::ZERO, RawAmount::to_decimal)
}

/// Rounds a decimal to the monetary scale using banker's rounding.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normalize_missing_is_zero() {
        assert_eq!(normalize(None), Decimal::ZERO);
        assert_eq!(normalize(Some(&RawAmount::Missing)), Decimal::ZERO);
    }

    #[test]
    fn test_normalize_number_passthrough() {
        let raw = RawAmount::Number(dec!(100.00));
        assert_eq!(raw.to_decimal(), dec!(100.00));
    }

    #[test]
    fn test_normalize_numeric_string() {
        let raw: RawAmount = serde_json::from_value(serde_json::json!("250.50")).unwrap();
        assert_eq!(raw.to_decimal(), dec!(250.50));
    }

    #[test]
    fn test_normalize_garbage_string_is_zero() {
        let raw: RawAmount = serde_json::from_value(serde_json::json!("not a number")).unwrap();
        assert_eq!(raw.to_decimal(), Decimal::ZERO);
    }

    #[test]
    fn test_normalize_json_null_is_zero() {
        let raw: RawAmount = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert_eq!(raw.to_decimal(), Decimal::ZERO);
    }

    #[test]
    fn test_normalize_json_number() {
        let raw: RawAmount = serde_json::from_value(serde_json::json!(30)).unwrap();
        assert_eq!(raw.to_decimal(), dec!(30));
    }

    #[test]
    fn test_normalize_rounds_to_cents() {
        assert_eq!(RawAmount::Number(dec!(10.999)).to_decimal(), dec!(11.00));
        assert_eq!(RawAmount::Number(dec!(10.994)).to_decimal(), dec!(10.99));
    }

    #[test]
    fn test_round_money_bankers() {
        // Midpoint rounds to the even cent
        assert_eq!(round_money(dec!(100.555)), dec!(100.56));
        assert_eq!(round_money(dec!(100.565)), dec!(100.56));
        assert_eq!(round_money(dec!(2.5)), dec!(2.5));
    }

    #[test]
    fn test_normalize_whitespace_string() {
        let raw = RawAmount::Text("  42.10  ".to_string());
        assert_eq!(raw.to_decimal(), dec!(42.10));
    }

    #[test]
    fn test_normalize_negative() {
        assert_eq!(RawAmount::Number(dec!(-5.25)).to_decimal(), dec!(-5.25));
    }
}
