//! Text parsing for prompted input

use super::{check_amount, check_days, check_rate, ValidationError, ValidationResult};

/// Remove thousands separators, or `None` if commas are not in groups of three
fn strip_grouping(input: &str) -> Option<String> {
    let (whole, fraction) = match input.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (input, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let digits = whole.trim_start_matches(['-', '+']);
    if digits.contains(',') {
        let mut groups = digits.split(',');
        let lead = groups.next()?;
        if lead.is_empty() || lead.len() > 3 {
            return None;
        }
        if !groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())) {
            return None;
        }
    }

    Some(input.replace(',', ""))
}

/// Parse a currency amount such as `50000`, `50,000` or `1,250.50`
pub fn parse_amount(field: &'static str, input: &str) -> ValidationResult<f64> {
    let trimmed = input.trim();
    let invalid = || ValidationError::Parse {
        field,
        input: trimmed.to_string(),
        expected: "number",
    };
    let cleaned = strip_grouping(trimmed).ok_or_else(invalid)?;
    let value = cleaned.parse::<f64>().map_err(|_| invalid())?;
    check_amount(field, value)
}

/// Parse an annual percentage rate, accepting a trailing `%`
pub fn parse_rate(field: &'static str, input: &str, max: f64) -> ValidationResult<f64> {
    let trimmed = input.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let value = number.parse::<f64>().map_err(|_| ValidationError::Parse {
        field,
        input: trimmed.to_string(),
        expected: "number",
    })?;
    check_rate(field, value, max)
}

/// Parse a whole number of days
pub fn parse_days(input: &str) -> ValidationResult<i32> {
    let trimmed = input.trim();
    let value = trimmed.parse::<i64>().map_err(|_| ValidationError::Parse {
        field: "days invested",
        input: trimmed.to_string(),
        expected: "whole number",
    })?;
    check_days(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_with_grouping() {
        assert_eq!(parse_amount("principal", " 1,250.50 ").unwrap(), 1_250.5);
        assert_eq!(parse_amount("principal", "50000").unwrap(), 50_000.0);
    }

    #[test]
    fn test_parse_amount_rejects_misplaced_commas() {
        for input in ["1,,2", ",5,", "12,34", "1,2345", "1,000.5,0", "1234,567"] {
            assert!(
                matches!(parse_amount("principal", input), Err(ValidationError::Parse { .. })),
                "accepted {}",
                input
            );
        }
        assert_eq!(parse_amount("principal", "1,234,567.5").unwrap(), 1_234_567.5);
        assert_eq!(parse_amount("principal", "999").unwrap(), 999.0);
    }

    #[test]
    fn test_parse_amount_rejects_text_and_negatives() {
        assert!(matches!(parse_amount("principal", "lots"), Err(ValidationError::Parse { .. })));
        assert!(matches!(parse_amount("principal", "-10"), Err(ValidationError::Negative { .. })));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("rate", "8.5%", 100.0).unwrap(), 8.5);
        assert_eq!(parse_rate("rate", " 12 ", 100.0).unwrap(), 12.0);
        assert!(parse_rate("rate", "60", 50.0).is_err());
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("90").unwrap(), 90);
        assert!(matches!(parse_days("0"), Err(ValidationError::NonPositiveDays(0))));
        assert!(matches!(parse_days("2.5"), Err(ValidationError::Parse { .. })));
    }
}
