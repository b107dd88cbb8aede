//! Display formatting for amounts, timestamps and phone numbers

use chrono::{DateTime, NaiveDateTime};

const NAIRA: char = '₦';

/// `1234.5` -> `₦1,234.50`, `-20` -> `-₦20.00`
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{NAIRA}0.00");
    }

    let kobo = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && kobo > 0 { "-" } else { "" };

    format!(
        "{sign}{NAIRA}{}.{:02}",
        group_thousands(kobo / 100),
        kobo % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `2026-10-16T14:05:00Z` -> `16 October 2026, 02:05 PM`.
///
/// The time is shown in the offset the server sent. Input that is not a
/// timestamp comes back unchanged.
pub fn format_date(value: &str) -> String {
    const DISPLAY: &str = "%-d %B %Y, %I:%M %p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format(DISPLAY).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.format(DISPLAY).to_string())
        .unwrap_or_else(|| value.to_string())
}

/// `+2348012345678` -> `+234 801 234 5678`; anything else unchanged
pub fn format_phone_number(phone: &str) -> String {
    match phone.strip_prefix("+234") {
        Some(rest) if rest.len() == 10 && rest.chars().all(|c| c.is_ascii_digit()) => {
            format!("+234 {} {} {}", &rest[..3], &rest[3..6], &rest[6..])
        }
        _ => phone.to_string(),
    }
}

/// Phone number safe for logs: only the last four digits survive
pub fn redact_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() <= 4 {
        return "*".repeat(digits.len());
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("***{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_and_rounds() {
        assert_eq!(format_currency(0.0), "₦0.00");
        assert_eq!(format_currency(5.0), "₦5.00");
        assert_eq!(format_currency(1234.5), "₦1,234.50");
        assert_eq!(format_currency(1_000_000.0), "₦1,000,000.00");
        assert_eq!(format_currency(999.999), "₦1,000.00");
        assert_eq!(format_currency(-20.0), "-₦20.00");
        assert_eq!(format_currency(-0.001), "₦0.00");
        assert_eq!(format_currency(f64::NAN), "₦0.00");
    }

    #[test]
    fn dates_use_long_month_and_twelve_hour_clock() {
        assert_eq!(format_date("2026-10-16T14:05:00Z"), "16 October 2026, 02:05 PM");
        assert_eq!(format_date("2026-01-03T09:30:00.123+01:00"), "3 January 2026, 09:30 AM");
        assert_eq!(format_date("2026-01-03T00:00:00"), "3 January 2026, 12:00 AM");
        assert_eq!(format_date("2026-01-03 17:45:10"), "3 January 2026, 05:45 PM");
    }

    #[test]
    fn unparseable_dates_are_echoed() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn nigerian_numbers_are_spaced() {
        assert_eq!(format_phone_number("+2348012345678"), "+234 801 234 5678");
        assert_eq!(format_phone_number("08012345678"), "08012345678");
        assert_eq!(format_phone_number("+234801"), "+234801");
        assert_eq!(format_phone_number(""), "");
    }

    #[test]
    fn redaction_keeps_last_four_digits() {
        assert_eq!(redact_phone("+2348012345678"), "***5678");
        assert_eq!(redact_phone("123"), "***");
        assert_eq!(redact_phone(""), "");
    }
}
