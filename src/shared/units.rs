//! Pure conversion between decimal bitcoin amounts and integer satoshis.
//!
//! Request bodies and query filters carry minor units; people type decimals.
//! All math uses `rust_decimal::Decimal`. No async, no network calls.

use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Minor units in one whole coin (1 BTC = 10^8 satoshis).
pub const SATOSHIS_PER_BITCOIN: i64 = 100_000_000;

/// Errors that can occur during unit conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    Overflow { value: String },
    InvalidDecimal { input: String, reason: String },
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::Overflow { value } => {
                write!(f, "Amount {} does not fit in satoshis", value)
            }
            UnitError::InvalidDecimal { input, reason } => {
                write!(f, "Invalid decimal '{}': {}", input, reason)
            }
        }
    }
}

impl std::error::Error for UnitError {}

/// Convert a bitcoin amount to satoshis, rounding half away from zero.
pub fn to_satoshis(bitcoins: Decimal) -> Result<i64, UnitError> {
    let sats = bitcoins
        .checked_mul(Decimal::from(SATOSHIS_PER_BITCOIN))
        .ok_or_else(|| UnitError::Overflow {
            value: bitcoins.to_string(),
        })?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    sats.to_i64().ok_or_else(|| UnitError::Overflow {
        value: bitcoins.to_string(),
    })
}

/// Parse a decimal string (e.g. a CLI flag) and convert it to satoshis.
pub fn parse_satoshis(input: &str) -> Result<i64, UnitError> {
    let value = Decimal::from_str(input.trim()).map_err(|e| UnitError::InvalidDecimal {
        input: input.to_string(),
        reason: e.to_string(),
    })?;
    to_satoshis(value)
}

/// Convert satoshis to a bitcoin amount with 8 decimal places.
pub fn to_bitcoins(satoshis: i64) -> Decimal {
    Decimal::new(satoshis, 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_satoshis_whole_and_fractional() {
        assert_eq!(to_satoshis(dec("1")).unwrap(), 100_000_000);
        assert_eq!(to_satoshis(dec("0.00000001")).unwrap(), 1);
        assert_eq!(to_satoshis(dec("0.5")).unwrap(), 50_000_000);
        assert_eq!(to_satoshis(Decimal::ZERO).unwrap(), 0);
    }

    #[test]
    fn test_to_satoshis_rounds_sub_satoshi_amounts() {
        assert_eq!(to_satoshis(dec("0.000000015")).unwrap(), 2);
        assert_eq!(to_satoshis(dec("0.000000014")).unwrap(), 1);
        assert_eq!(to_satoshis(dec("-0.000000015")).unwrap(), -2);
    }

    #[test]
    fn test_to_satoshis_overflow() {
        let err = to_satoshis(Decimal::MAX).unwrap_err();
        assert!(matches!(err, UnitError::Overflow { .. }));
    }

    #[test]
    fn test_parse_satoshis() {
        assert_eq!(parse_satoshis(" 0.001 ").unwrap(), 100_000);
        let err = parse_satoshis("one").unwrap_err();
        assert!(matches!(err, UnitError::InvalidDecimal { .. }));
    }

    #[test]
    fn test_to_bitcoins_formats_eight_places() {
        assert_eq!(to_bitcoins(123_456_789).to_string(), "1.23456789");
        assert_eq!(to_bitcoins(1).to_string(), "0.00000001");
        assert_eq!(to_bitcoins(100_000_000).to_string(), "1.00000000");
    }
}
