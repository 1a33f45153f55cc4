use crate::error::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a strictly positive amount.
pub fn validate_amount(input: &str, message: &str) -> Result<Decimal> {
    match parse_decimal(input) {
        Some(amount) if amount > Decimal::ZERO => Ok(amount.normalize()),
        _ => Err(Error::ValidationError(message.to_string())),
    }
}

/// Empty input means "not set"; anything else must lie in `0..=100`.
pub fn validate_percentage(input: &str, message: &str) -> Result<Option<Decimal>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    match parse_decimal(input) {
        Some(value) if value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED => Ok(Some(value.normalize())),
        _ => Err(Error::ValidationError(message.to_string())),
    }
}

pub fn validate_required(input: &str, message: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::ValidationError(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSG: &str = "bad input";

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount("100", MSG).unwrap(), Decimal::from(100));
        assert_eq!(validate_amount(" 2.50 ", MSG).unwrap().to_string(), "2.5");
        assert_eq!(validate_amount("1e2", MSG).unwrap(), Decimal::from(100));
        for bad in ["", "0", "-5", "abc", "   "] {
            match validate_amount(bad, MSG) {
                Err(Error::ValidationError(msg)) => assert_eq!(msg, MSG),
                other => panic!("{:?} should be rejected, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_validate_percentage() {
        assert_eq!(validate_percentage("", MSG).unwrap(), None);
        assert_eq!(validate_percentage("0", MSG).unwrap(), Some(Decimal::ZERO));
        assert_eq!(validate_percentage("100", MSG).unwrap(), Some(Decimal::ONE_HUNDRED));
        assert_eq!(validate_percentage("12.5", MSG).unwrap().unwrap().to_string(), "12.5");
        assert!(validate_percentage("100.01", MSG).is_err());
        assert!(validate_percentage("-1", MSG).is_err());
        assert!(validate_percentage("ten", MSG).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("  Genesis ", MSG).unwrap(), "Genesis");
        assert!(validate_required(" ", MSG).is_err());
    }
}
