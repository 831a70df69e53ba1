//! Currency normalization
//!
//! Spreadsheet cells arrive formatted for humans ("€1,234.56", "-€5.00").
//! Amounts are kept as `Decimal` throughout; floats never touch money.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a formatted currency cell into a plain decimal amount.
///
/// Strips the euro sign and thousands separators, keeping sign and decimal
/// point. Returns `None` when no number remains.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '€' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Format an amount for reply text, two decimal places, no sign.
pub fn format_euros(amount: Decimal) -> String {
    format!("{:.2}", amount.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount_with_symbol_and_separator() {
        assert_eq!(parse_amount("€1,234.56"), Some(dec("1234.56")));
    }

    #[test]
    fn test_parse_amount_negative_before_symbol() {
        assert_eq!(parse_amount("-€5.00"), Some(dec("-5.0")));
    }

    #[test]
    fn test_parse_amount_plain_number() {
        assert_eq!(parse_amount("42"), Some(dec("42")));
        assert_eq!(parse_amount(" -0.5 "), Some(dec("-0.5")));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("€"), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("€12.34.56"), None);
    }

    #[test]
    fn test_format_euros_drops_sign() {
        assert_eq!(format_euros(dec("-20")), "20.00");
        assert_eq!(format_euros(dec("10.5")), "10.50");
    }
}
