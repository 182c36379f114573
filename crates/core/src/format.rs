//! Display helpers for dates, amounts and percentages.

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Human label for how long ago `then` was, relative to `now`.
///
/// The day difference is the absolute difference rounded up to whole days, so anything within
/// the last 24 hours (but not the same instant) reads as "Yesterday".
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let millis = (now - then).num_milliseconds().abs();
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => format!("{} months ago", days / 30),
    }
}

/// Group an integer with commas: `1234567` -> `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let grouped = group_digits(value.unsigned_abs());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn group_digits(magnitude: u64) -> String {
    let digits = magnitude.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Sign goes in front of the symbol: `-$1,200`. Out-of-range amounts saturate.
fn with_symbol(symbol: char, value: f64) -> String {
    let rounded = value.round() as i64;
    let grouped = group_digits(rounded.unsigned_abs());
    if rounded < 0 {
        format!("-{symbol}{grouped}")
    } else {
        format!("{symbol}{grouped}")
    }
}

/// Whole-dollar USD amount, e.g. `$12,500`.
pub fn format_usd(value: f64) -> String {
    with_symbol('$', value)
}

/// Whole-rupee amount, e.g. `₹250,000`.
pub fn format_inr(value: f64) -> String {
    with_symbol('₹', value)
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_labels() {
        let now = now();
        assert_eq!(relative_label(now, now), "Today");
        assert_eq!(relative_label(now - Duration::hours(3), now), "Yesterday");
        assert_eq!(relative_label(now - Duration::days(1), now), "Yesterday");
        assert_eq!(relative_label(now - Duration::days(4), now), "4 days ago");
        assert_eq!(relative_label(now - Duration::days(15), now), "2 weeks ago");
        assert_eq!(relative_label(now - Duration::days(75), now), "2 months ago");
    }

    #[test]
    fn future_dates_use_absolute_difference() {
        let now = now();
        assert_eq!(relative_label(now + Duration::days(3), now), "3 days ago");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_160_000), "1,160,000");
        assert_eq!(group_thousands(-25_000), "-25,000");
    }

    #[test]
    fn currency() {
        assert_eq!(format_usd(3_600_000.0), "$3,600,000");
        assert_eq!(format_usd(12_499.6), "$12,500");
        assert_eq!(format_inr(250_000.0), "₹250,000");
        assert_eq!(format_inr(-100_000.0), "-₹100,000");
    }

    #[test]
    fn extreme_amounts_do_not_overflow() {
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
        assert_eq!(format_usd(f64::MIN), "-$9,223,372,036,854,775,808");
        assert_eq!(format_inr(f64::MAX), "₹9,223,372,036,854,775,807");
    }

    #[test]
    fn one_decimal() {
        assert_eq!(round_one_decimal(359.375), 359.4);
        assert_eq!(round_one_decimal(-25.0), -25.0);
    }
}
