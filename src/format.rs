/// Format Module
///
/// Number, amount and timestamp formatting shared by the views.
use chrono::{DateTime, Utc};

/// Fractional digits kept by `display_value`
const DISPLAY_DECIMALS: usize = 4;

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    group_digits(&n.to_string())
}

fn group_digits(digits: &str) -> String {
    let mut result = String::new();

    for (count, c) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Shift a raw integer balance by `decimals` into an exact decimal string
///
/// Trailing fractional zeros are trimmed, so `to_precision(15_000, 4)` is `"1.5"`.
pub fn to_precision(raw: u128, decimals: u8) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals { format!("{:0>width$}", digits, width = decimals + 1) } else { digits };
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Shorten a decimal string for display: grouped integer part, at most four decimals
pub fn display_value(precise: &str) -> String {
    let (int_part, frac_part) = precise.split_once('.').unwrap_or((precise, ""));
    let frac_part: String = frac_part.chars().take(DISPLAY_DECIMALS).collect();
    let frac_part = frac_part.trim_end_matches('0');

    if frac_part.is_empty() {
        group_digits(int_part)
    } else {
        format!("{}.{}", group_digits(int_part), frac_part)
    }
}

/// Render a millisecond Unix timestamp as UTC wall-clock time
pub fn format_time(ts_millis: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ts_millis).map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

/// Render a millisecond timestamp relative to `now`, e.g. "5 mins ago"
pub fn format_age(ts_millis: i64, now: DateTime<Utc>) -> Option<String> {
    let then = DateTime::<Utc>::from_timestamp_millis(ts_millis)?;
    let secs = (now - then).num_seconds().max(0);

    let (value, unit) = match secs {
        0..=59 => (secs, "sec"),
        60..=3_599 => (secs / 60, "min"),
        3_600..=86_399 => (secs / 3_600, "hr"),
        _ => (secs / 86_400, "day"),
    };
    let plural = if value == 1 { "" } else { "s" };

    Some(format!("{} {}{} ago", value, unit, plural))
}
