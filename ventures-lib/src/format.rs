//! Display formatting for currency, dates and ratios.
//!
//! Every formatter accepts optional input and always returns a string; missing
//! values render as a neutral placeholder instead of failing.

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Placeholder for a missing date.
pub const MISSING_DATE: &str = "-";

/// Formats an amount as US dollars with thousands separators.
///
/// `None` formats as `$0.00`.
///
/// ```
/// use rust_decimal::Decimal;
/// use ventures_lib::format::format_currency;
///
/// assert_eq!(format_currency(None), "$0.00");
/// assert_eq!(format_currency(Some(Decimal::new(123456789, 2))), "$1,234,567.89");
/// ```
pub fn format_currency(amount: Option<Decimal>) -> String {
    let amount = amount
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let digits = format!("{:.2}", amount.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a timestamp as a short calendar date, e.g. `Mar 5, 2026`.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => MISSING_DATE.to_string(),
    }
}

/// Formats a timestamp as a year-month bucket, e.g. `2026-03`.
pub fn format_month(date: DateTime<Utc>) -> String {
    date.format("%Y-%m").to_string()
}

/// Formats `part / whole` as a whole-number percentage.
///
/// A zero or missing whole yields `0%`. Ratios beyond the decimal range
/// saturate.
pub fn format_percent(part: Option<Decimal>, whole: Option<Decimal>) -> String {
    let whole = whole.unwrap_or(Decimal::ZERO);
    if whole.is_zero() {
        return "0%".to_string();
    }
    let part = part.unwrap_or(Decimal::ZERO);
    let ratio = part
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .or_else(|| {
            part.checked_div(whole)
                .and_then(|fraction| fraction.checked_mul(Decimal::ONE_HUNDRED))
        })
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        });
    let rounded = ratio.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{}%", rounded.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_currency_missing_is_zero() {
        assert_eq!(format_currency(None), "$0.00");
        assert_eq!(format_currency(Some(Decimal::ZERO)), "$0.00");
    }

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(Some(Decimal::new(5, 0))), "$5.00");
        assert_eq!(format_currency(Some(Decimal::new(100000, 0))), "$100,000.00");
        assert_eq!(format_currency(Some(Decimal::new(999, 0))), "$999.00");
        assert_eq!(format_currency(Some(Decimal::new(1000, 0))), "$1,000.00");
    }

    #[test]
    fn test_format_currency_rounding_and_sign() {
        assert_eq!(format_currency(Some(Decimal::new(-12, 0))), "-$12.00");
        assert_eq!(format_currency(Some(Decimal::new(12345, 3))), "$12.35");
        assert_eq!(format_currency(Some(Decimal::new(-1, 3))), "$0.00");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2026, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(format_date(Some(date)), "Mar 5, 2026");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_month(date), "2026-03");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(Decimal::new(1, 0)), Some(Decimal::new(4, 0))), "25%");
        assert_eq!(format_percent(Some(Decimal::new(2, 0)), Some(Decimal::new(3, 0))), "67%");
        assert_eq!(format_percent(Some(Decimal::new(5, 0)), Some(Decimal::ZERO)), "0%");
        assert_eq!(format_percent(None, None), "0%");
        assert_eq!(format_percent(None, Some(Decimal::new(10, 0))), "0%");
    }

    #[test]
    fn test_format_percent_never_overflows() {
        assert_eq!(format_percent(Some(Decimal::MAX), Some(Decimal::MAX)), "100%");
        assert_eq!(
            format_percent(Some(Decimal::MAX), Some(Decimal::ONE)),
            format!("{}%", Decimal::MAX)
        );
        assert_eq!(
            format_percent(Some(Decimal::MIN), Some(Decimal::new(1, 2))),
            format!("{}%", Decimal::MIN)
        );
    }
}
