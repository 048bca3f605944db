//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Utc};

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Formats a price with two decimal places.
///
/// Usage in templates: `{{ product.price|price }}`
#[askama::filter_fn]
pub fn price(value: &f64, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_price(*value))
}

/// Formats an optional timestamp as a short date, or a dash when absent.
///
/// Usage in templates: `{{ admin.last_login|short_date }}`
#[askama::filter_fn]
pub fn short_date(
    value: &Option<DateTime<Utc>>,
    _env: &dyn askama::Values,
) -> askama::Result<String> {
    Ok(format_short_date(value.as_ref()))
}

fn format_price(value: f64) -> String {
    format!("{value:.2}")
}

fn format_short_date(value: Option<&DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |ts| ts.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::{format_price, format_short_date};

    #[test]
    fn test_price_two_decimals() {
        assert_eq!(format_price(12.5), "12.50");
        assert_eq!(format_price(0.0), "0.00");
    }

    #[test]
    fn test_short_date() {
        let ts = chrono::Utc.with_ymd_and_hms(2025, 3, 9, 10, 0, 0).unwrap();
        assert_eq!(format_short_date(Some(&ts)), "2025-03-09");
        assert_eq!(format_short_date(None), "-");
    }
}
