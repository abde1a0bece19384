//! pt-BR display formatting and number parsing for form values.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NumberParseError {
    #[error("empty value")]
    Empty,

    #[error("invalid number {0:?}")]
    Invalid(String),

    #[error("negative number {0:?}")]
    Negative(String),
}

/// Parse a form value, accepting either `,` or `.` as decimal separator.
pub fn parse_decimal(raw: &str) -> Result<Decimal, NumberParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NumberParseError::Empty);
    }
    let normalized = trimmed.replacen(',', ".", 1);
    let value = Decimal::from_str(&normalized)
        .map_err(|_| NumberParseError::Invalid(trimmed.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(NumberParseError::Negative(trimmed.to_string()));
    }
    Ok(value)
}

fn fixed(value: Decimal, places: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(places);
    rounded
}

/// Quantity in kilograms: three places, comma separator.
pub fn format_quantidade(value: Decimal) -> String {
    fixed(value, 3).to_string().replace('.', ",")
}

/// Price without currency symbol: two places, comma separator.
pub fn format_preco(value: Decimal) -> String {
    fixed(value, 2).to_string().replace('.', ",")
}

/// Price as prefilled into the edit modal.
pub fn edit_preco(value: Decimal) -> String {
    fixed(value, 2).to_string()
}

/// `dd/mm/aaaa, HH:MM:SS` in the zone's offset for that instant.
pub fn format_timestamp<Tz>(value: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    value
        .with_timezone(tz)
        .format("%d/%m/%Y, %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn quantity_and_price_use_pt_br_separators() {
        assert_eq!(format_quantidade(Decimal::new(105, 1)), "10,500");
        assert_eq!(format_preco(Decimal::new(499, 1)), "49,90");
        assert_eq!(format_preco(Decimal::new(3, 0)), "3,00");
        assert_eq!(format_quantidade(Decimal::new(12345, 4)), "1,235");
    }

    #[test]
    fn edit_price_keeps_decimal_point() {
        assert_eq!(edit_preco(Decimal::new(499, 1)), "49.90");
    }

    #[test]
    fn parses_both_separators() {
        assert_eq!(parse_decimal("10,5"), Ok(Decimal::new(105, 1)));
        assert_eq!(parse_decimal(" 49.90 "), Ok(Decimal::new(4990, 2)));
        assert_eq!(parse_decimal(""), Err(NumberParseError::Empty));
        assert!(matches!(
            parse_decimal("1.2.3"),
            Err(NumberParseError::Invalid(_))
        ));
        assert!(matches!(
            parse_decimal("-1"),
            Err(NumberParseError::Negative(_))
        ));
    }

    #[test]
    fn timestamp_renders_in_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 13, 4, 9).unwrap();
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_timestamp(ts, &brt), "05/03/2024, 10:04:09");
    }
}
