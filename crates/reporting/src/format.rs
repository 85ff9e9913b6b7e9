//! Display formatting for dashboard values (en-US conventions).

use campaign_core::types::parse_timestamp_millis;
use chrono::DateTime;

/// Whole-unit US dollars with thousands separators: `$1,234`, `-$50`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }
    let rounded = amount.round();
    let digits = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

/// Percentage with two decimals: `28.57%`.
pub fn format_percent(value: f64) -> String {
    format_percent_with(value, 2)
}

/// Percentage rounded half away from zero to `decimals` places.
pub fn format_percent_with(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    format!("{rounded:.decimals$}%")
}

/// Compact large numbers for chart axes: `950`, `18K`, `1.2M`.
pub fn abbreviate(value: u64) -> String {
    if value >= 1_000_000 {
        let millions = (value as f64 / 100_000.0).round() / 10.0;
        let text = format!("{millions:.1}");
        format!("{}M", text.trim_end_matches(".0"))
    } else if value >= 1_000 {
        format!("{:.0}K", (value as f64 / 1_000.0).round())
    } else {
        value.to_string()
    }
}

/// `Jan 5, 2024`; unparsable input is returned unchanged.
pub fn format_date(raw: &str) -> String {
    parse_timestamp_millis(raw)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Upper-case the first character: `active` → `Active`.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(3500.0), "$3,500");
        assert_eq!(format_currency(1_234_567.49), "$1,234,567");
        assert_eq!(format_currency(2.5), "$3");
        assert_eq!(format_currency(-1500.0), "-$1,500");
        assert_eq!(format_currency(-0.2), "$0");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(28.571_428), "28.57%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(100.0), "100.00%");
        assert_eq!(format_percent(f64::INFINITY), "0.00%");
        assert_eq!(format_percent_with(33.333, 1), "33.3%");
        assert_eq!(format_percent_with(12.5, 0), "13%");
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate(0), "0");
        assert_eq!(abbreviate(950), "950");
        assert_eq!(abbreviate(4500), "5K");
        assert_eq!(abbreviate(18_000), "18K");
        assert_eq!(abbreviate(1_200_000), "1.2M");
        assert_eq!(abbreviate(2_000_000), "2M");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05T12:00:00Z"), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-24"), "Dec 24, 2023");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("active"), "Active");
        assert_eq!(capitalize(""), "");
    }
}
