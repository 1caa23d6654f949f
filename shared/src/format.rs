use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Text produced for input that does not parse as a number.
pub const NOT_A_NUMBER: &str = "NaN";

/// Text produced for input that does not parse as a date.
pub const INVALID_DATE: &str = "Invalid Date";

/// Anything that can be shown as a currency amount.
///
/// Strings are read the way a browser's `parseFloat` reads them, so
/// `"12.5abc"` is `12.5` and `"abc"` is not a number.
pub trait Amount {
    fn to_amount(&self) -> f64;
}

impl Amount for f64 {
    fn to_amount(&self) -> f64 {
        *self
    }
}

impl Amount for f32 {
    fn to_amount(&self) -> f64 {
        *self as f64
    }
}

impl Amount for i32 {
    fn to_amount(&self) -> f64 {
        *self as f64
    }
}

impl Amount for i64 {
    fn to_amount(&self) -> f64 {
        *self as f64
    }
}

impl Amount for u32 {
    fn to_amount(&self) -> f64 {
        *self as f64
    }
}

impl Amount for &str {
    fn to_amount(&self) -> f64 {
        parse_float_prefix(self).unwrap_or(f64::NAN)
    }
}

impl Amount for String {
    fn to_amount(&self) -> f64 {
        self.as_str().to_amount()
    }
}

impl<A: Amount> Amount for &A {
    fn to_amount(&self) -> f64 {
        (*self).to_amount()
    }
}

/// Format an amount as US dollars with thousands separators and two decimals.
///
/// `1234.5` becomes `"$1,234.50"`, negative values keep their sign after the
/// symbol (`"$-12.00"`), and unparseable input becomes `"$NaN"`.
pub fn format_currency(amount: impl Amount) -> String {
    format!("${}", format_decimal(amount.to_amount(), 2, 2))
}

/// Format a plain number with thousands separators and exactly two decimals.
pub fn format_amount(value: f64) -> String {
    format_decimal(value, 2, 2)
}

/// Axis tick text: `"$"` plus the grouped value with up to three decimals.
pub fn axis_tick_label(value: f64) -> String {
    format!("${}", format_decimal(value, 0, 3))
}

/// Format `value` with en-US grouping, keeping between `min_fraction` and
/// `max_fraction` decimals.
pub fn format_decimal(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if value.is_nan() {
        return NOT_A_NUMBER.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let fixed = fixed_half_away(value.abs(), max_fraction);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_fraction && frac.ends_with('0') {
        frac.pop();
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac.chars().all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(int_part))
    } else {
        format!("{}{}.{}", sign, group_thousands(int_part), frac)
    }
}

/// `value` with exactly `digits` decimals, rounding exact ties away from
/// zero. `value` must be finite.
fn fixed_half_away(value: f64, digits: usize) -> String {
    // Any double that is not exactly on a tie differs from it well within
    // this many decimals, so a trailing "5000..." here is a true tie.
    let wide = format!("{:.*}", 2 * digits + 20, value);
    let Some((int_part, frac_part)) = wide.split_once('.') else {
        return format!("{:.*}", digits, value);
    };
    let tail = &frac_part[digits..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{:.*}", digits, value);
    }

    let kept = if digits == 0 {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, &frac_part[..digits])
    };
    increment_last_digit(&kept)
}

/// Add one unit in the last place of a plain decimal string.
fn increment_last_digit(number: &str) -> String {
    let mut bytes = number.as_bytes().to_vec();
    for b in bytes.iter_mut().rev() {
        match *b {
            b'.' => continue,
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                return String::from_utf8_lossy(&bytes).into_owned();
            }
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

/// Insert a comma between every group of three digits, counting from the right.
pub fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result
}

/// Read the longest numeric prefix of `input`, ignoring leading whitespace.
///
/// Returns `None` when no number can be read at all.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let negative = s.starts_with('-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits = has_digits || frac_end > frac_start;
            end = frac_end;
        }
    }

    if !has_digits {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    let candidate = s[..end].trim_end_matches('.');
    candidate.parse::<f64>().ok()
}

/// Parse the date representations the backend emits.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt.date());
        }
    }
    for pattern in ["%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, pattern) {
            return Some(date);
        }
    }
    None
}

/// Format a date as `"Mar 5, 2024"`. Unreadable input yields `"Invalid Date"`.
pub fn format_date(input: &str) -> String {
    match parse_date(input) {
        Some(date) => format!("{} {}, {}", date.format("%b"), date.day(), date.year()),
        None => INVALID_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_000_000), "$1,000,000.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_format_currency_rounds_half_cents_away_from_zero() {
        assert_eq!(format_currency(0.125), "$0.13");
        assert_eq!(format_currency(1234.125), "$1,234.13");
        assert_eq!(format_currency(-0.125), "$-0.13");
        assert_eq!(format_currency(0.375), "$0.38");
        // 2.675 is stored just below the tie, so it rounds down.
        assert_eq!(format_currency(2.675), "$2.67");
    }

    #[test]
    fn test_format_decimal_tie_carries_into_integer() {
        assert_eq!(format_decimal(2.5, 0, 0), "3");
        assert_eq!(format_decimal(9.5, 0, 0), "10");
        assert_eq!(format_decimal(999.5, 0, 0), "1,000");
        assert_eq!(format_decimal(-0.5, 0, 0), "-1");
    }

    #[test]
    fn test_format_currency_negative_keeps_sign_after_symbol() {
        assert_eq!(format_currency(-1234.5), "$-1,234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_currency_from_strings() {
        assert_eq!(format_currency("42"), "$42.00");
        assert_eq!(format_currency("  1500.256 USD"), "$1,500.26");
        assert_eq!(format_currency(String::from("7.1")), "$7.10");
    }

    #[test]
    fn test_format_currency_not_a_number() {
        let formatted = format_currency("abc");
        assert!(formatted.contains("NaN"));
        assert_eq!(formatted, "$NaN");
        assert_eq!(format_currency(""), "$NaN");
        assert_eq!(format_currency(f64::NAN), "$NaN");
    }

    #[test]
    fn test_axis_tick_label_trims_fraction() {
        assert_eq!(axis_tick_label(1200.0), "$1,200");
        assert_eq!(axis_tick_label(2.5), "$2.5");
        assert_eq!(axis_tick_label(0.0), "$0");
        assert_eq!(axis_tick_label(1.23456), "$1.235");
        assert_eq!(axis_tick_label(0.0625), "$0.063");
        assert_eq!(axis_tick_label(1.0625), "$1.063");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("92%"), Some(92.0));
        assert_eq!(parse_float_prefix("  -3.5e2px"), Some(-350.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_format_date_iso() {
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date("2023-12-14T01:02:02.000Z"), "Dec 14, 2023");
        assert_eq!(format_date("2025-06-15T00:00:00-05:00"), "Jun 15, 2025");
        assert_eq!(format_date("2024-11-30T08:15"), "Nov 30, 2024");
    }

    #[test]
    fn test_format_date_other_layouts() {
        assert_eq!(format_date("03/05/2024"), "Mar 5, 2024");
        assert_eq!(format_date("January 15, 2025"), "Jan 15, 2025");
        assert_eq!(format_date("Feb 1, 2022"), "Feb 1, 2022");
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("not a date"), "Invalid Date");
        assert_eq!(format_date(""), "Invalid Date");
        assert_eq!(format_date("2024-02-30"), "Invalid Date");
    }
}
