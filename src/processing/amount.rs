//! Accounting amounts
//!
//! Balance sheets print negatives in parentheses, `(1,250,000)`, and group
//! thousands with commas. Amounts are kept as `Decimal`, never as floats.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Regex fragment capturing one printed amount, including the parenthesised
/// negative form.
pub const AMOUNT_PATTERN: &str = r"(\(\s*\$?\s*\d[\d,]*(?:\.\d+)?\s*\)|-?\$?\s?\d[\d,]*(?:\.\d+)?)";

/// Parse a printed amount. Returns `None` when the text is not a number.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '$')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let (negative, digits) = match cleaned.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, cleaned.as_str()),
    };

    let value = Decimal::from_str(digits).ok()?;
    Some(if negative { -value } else { value })
}

/// Like [`parse_amount`], but anything unparsable counts as zero
pub fn clean_amount(text: &str) -> Decimal {
    parse_amount(text).unwrap_or(Decimal::ZERO)
}

/// Render an amount the way the statement prints it: `6,858,029`, `(1,250,000)`
pub fn format_amount(amount: Decimal) -> String {
    let normalized = amount.abs().normalize();
    let rendered = if normalized.fract().is_zero() {
        normalized.trunc().to_string()
    } else {
        normalized.round_dp(2).to_string()
    };

    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac)) => (int_part.to_string(), Some(format!("{:0<2}", frac))),
        None => (rendered, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(&frac);
    }

    if amount.is_sign_negative() && !amount.is_zero() {
        format!("({})", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_grouped_amount() {
        assert_eq!(parse_amount("1,250,000"), Some(dec!(1250000)));
        assert_eq!(parse_amount(" 583,961 "), Some(dec!(583961)));
        assert_eq!(parse_amount("$89,840.50"), Some(dec!(89840.50)));
    }

    #[test]
    fn test_parentheses_mean_negative() {
        assert_eq!(parse_amount("(1,250,000)"), Some(dec!(-1250000)));
        assert_eq!(parse_amount("( $ 12.5 )"), Some(dec!(-12.5)));
        assert_eq!(parse_amount("-400"), Some(dec!(-400)));
    }

    #[test]
    fn test_unparsable_amounts() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount("(12"), None);
        assert_eq!(clean_amount("—"), Decimal::ZERO);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(6858029)), "6,858,029");
        assert_eq!(format_amount(dec!(-1250000)), "(1,250,000)");
        assert_eq!(format_amount(dec!(898402.00)), "898,402");
        assert_eq!(format_amount(dec!(1234.5)), "1,234.50");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(Decimal::ZERO), "0");
    }

    #[test]
    fn test_amount_pattern_captures_printed_forms() {
        let re = Regex::new(&format!(r"Stock\s+{}", AMOUNT_PATTERN)).unwrap();
        let caps = re.captures("3100 Treasury Stock (1,250,000)").unwrap();
        assert_eq!(&caps[1], "(1,250,000)");

        let caps = re.captures("3000 Capital Stock $2,500,000").unwrap();
        assert_eq!(clean_amount(&caps[1]), dec!(2500000));
    }
}
