//! Chilean (es-CL) number conventions
//!
//! Amounts are written with `.` as thousands separator and `,` as decimal mark
//! (`6.300.000,5`). Rates are typed by hand and may use either mark (`4,5` or `4.5`).

/// Parse an es-CL formatted number, e.g. `"6.300.000,25"` → `6300000.25`
///
/// Returns `None` for empty, non-numeric, or non-finite input.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replace('.', "").replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a whole currency amount by keeping only its digits, e.g. `"$ 1.250.000"` → `1250000`
pub fn parse_whole_amount(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok()
}

/// Parse a percentage rate accepting either `,` or `.` as the decimal mark
pub fn parse_rate(text: &str) -> Option<f64> {
    let trimmed = text.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format a value rounded to whole units with `.` thousands separators
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a currency amount, e.g. `1250000` → `"$1.250.000"`
pub fn format_currency(value: f64) -> String {
    if value.round() < 0.0 {
        format!("-${}", format_thousands(-value))
    } else {
        format!("${}", format_thousands(value))
    }
}

/// Format with a fixed number of decimals and a decimal comma, e.g. `-33.428331` → `"-33,428331"`
pub fn format_decimal(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value).replacen('.', ",", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("6.300.000"), Some(6_300_000.0));
        assert_eq!(parse_decimal("346000,5"), Some(346_000.5));
        assert_eq!(parse_decimal(" 1.234,75 "), Some(1_234.75));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn test_parse_whole_amount() {
        assert_eq!(parse_whole_amount("$ 1.250.000"), Some(1_250_000.0));
        assert_eq!(parse_whole_amount("20.000.000"), Some(20_000_000.0));
        assert_eq!(parse_whole_amount("none"), None);
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("4,5"), Some(4.5));
        assert_eq!(parse_rate("4.5"), Some(4.5));
        assert_eq!(parse_rate("6%"), Some(6.0));
        assert_eq!(parse_rate("x"), None);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1_000.0), "1.000");
        assert_eq!(format_thousands(444_665.98), "444.666");
        assert_eq!(format_thousands(266_583_633.0), "266.583.633");
        assert_eq!(format_thousands(-1_500_000.0), "-1.500.000");
    }

    #[test]
    fn test_format_currency_and_decimal() {
        assert_eq!(format_currency(1_250_000.0), "$1.250.000");
        assert_eq!(format_currency(-2_000.0), "-$2.000");
        assert_eq!(format_decimal(-33.42833110361134, 6), "-33,428331");
        assert_eq!(format_decimal(-70.0, 6), "-70,000000");
    }
}
