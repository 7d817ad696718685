use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Errors produced while reading an amount typed by a user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAmountError {
    #[error("no digits in amount")]
    Empty,
    #[error("malformed amount: {0}")]
    Malformed(String),
}

impl From<ParseAmountError> for EngineError {
    fn from(err: ParseAmountError) -> Self {
        EngineError::InvalidAmount(err.to_string())
    }
}

/// Reads free-form text as a decimal number.
///
/// Everything except ASCII digits, `,` and `.` is dropped first, so
/// `"1 500,75 ₽"` reads as `1500.75`. The first comma becomes a decimal
/// point and only the first point is kept as separator: the digits of any
/// further segment are appended to the fraction (`"1.234,56"` reads as
/// `1.23456`). Commas after the first are not separators and make the
/// input malformed.
///
/// The sign is never read, and zero is returned as is: positivity is checked
/// by [`Amount::new`].
pub fn parse_amount(raw: &str) -> Result<Decimal, ParseAmountError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let normalized = cleaned.replacen(',', ".", 1);
    let mut segments = normalized.split('.');
    let whole = segments.next().unwrap_or_default();
    let fraction: String = segments.collect();

    let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || !is_digits(&fraction) || (whole.is_empty() && fraction.is_empty()) {
        return Err(ParseAmountError::Malformed(cleaned));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let literal = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };

    Decimal::from_str(&literal).map_err(|_| ParseAmountError::Malformed(cleaned))
}

/// A strictly positive, currency-agnostic amount.
///
/// ```rust
/// use engine::Amount;
///
/// let amount = Amount::parse("15000,5").unwrap();
/// assert_eq!(amount.to_string(), "15000.50");
/// assert!(Amount::parse("0").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> ResultEngine<Self> {
        if value <= Decimal::ZERO {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Parses user text with [`parse_amount`] and rejects zero.
    pub fn parse(raw: &str) -> ResultEngine<Self> {
        Self::new(parse_amount(raw)?)
    }

    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Amount> for Decimal {
    fn from(value: Amount) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).unwrap()
    }

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_amount("25000").unwrap(), dec("25000"));
        assert_eq!(parse_amount("15000.50").unwrap(), dec("15000.50"));
        assert_eq!(parse_amount("8500,5").unwrap(), dec("8500.5"));
    }

    #[test]
    fn noise_is_stripped() {
        assert_eq!(parse_amount(" 1 500,75 ₽").unwrap(), dec("1500.75"));
        assert_eq!(parse_amount("сумма: 300р.").unwrap(), dec("300"));
        assert_eq!(parse_amount("-42").unwrap(), dec("42"));
    }

    #[test]
    fn only_first_separator_is_a_decimal_point() {
        assert_eq!(parse_amount("1.234,56").unwrap(), dec("1.23456"));
        assert_eq!(parse_amount("1.000.000").unwrap(), dec("1.000000"));
    }

    #[test]
    fn missing_parts_default_to_zero() {
        assert_eq!(parse_amount(".5").unwrap(), dec("0.5"));
        assert_eq!(parse_amount("12.").unwrap(), dec("12"));
    }

    #[test]
    fn rejects_text_without_digits() {
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::Empty));
        assert_eq!(parse_amount(""), Err(ParseAmountError::Empty));
        assert!(matches!(parse_amount("."), Err(ParseAmountError::Malformed(_))));
        assert!(matches!(parse_amount(",,"), Err(ParseAmountError::Malformed(_))));
    }

    #[test]
    fn second_comma_is_malformed() {
        assert!(matches!(
            parse_amount("1,234,567"),
            Err(ParseAmountError::Malformed(_))
        ));
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(matches!(Amount::parse("0"), Err(EngineError::InvalidAmount(_))));
        assert!(matches!(Amount::parse("0,00"), Err(EngineError::InvalidAmount(_))));
        assert!(matches!(Amount::parse("нет"), Err(EngineError::InvalidAmount(_))));
        assert_eq!(Amount::parse("0.01").unwrap().value(), dec("0.01"));
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(Amount::parse("15000.5").unwrap().to_string(), "15000.50");
        assert_eq!(Amount::parse("1.23456").unwrap().to_string(), "1.23");
    }
}
