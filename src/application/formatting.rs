//! Number and date formatting for dashboard text.
//!
//! Every function here is total: bad input degrades to `NaN`, `None` or a
//! placeholder instead of an error.

use crate::domain::locale::{DateOrder, Locale};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Shown in place of an amount that is not a finite number
pub const FALLBACK_GLYPH: &str = "—";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Numeric coercion of a CSV cell.
///
/// Blank text is `0`. Decimal and exponent forms and the spelled-out
/// `Infinity` are accepted; anything else is `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let t = text.trim();
    match t {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // str::parse also takes "inf" and "nan" spellings
    if t.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return f64::NAN;
    }

    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses an ISO-like date or timestamp. Values without an offset are read as UTC.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(t, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}

/// USD amount with locale grouping and two fraction digits, or
/// [`FALLBACK_GLYPH`] when `value` is not finite.
pub fn format_money(value: f64, locale: Locale) -> String {
    if !value.is_finite() {
        return FALLBACK_GLYPH.to_string();
    }

    let (negative, fixed) = fixed_parts(value, 2);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let amount = format!(
        "{}{}{}",
        group_digits(int_part, locale.group_separator()),
        locale.decimal_separator(),
        frac_part
    );
    locale.wrap_usd(&amount, negative)
}

/// [`format_money`] over a raw CSV cell
pub fn format_money_text(text: &str, locale: Locale) -> String {
    format_money(parse_number(text), locale)
}

/// Two-digit day, month and year in locale order, computed in UTC.
/// Unparseable input is returned unchanged.
pub fn format_short_date(iso_like: &str, locale: Locale) -> String {
    let Some(dt) = parse_date(iso_like) else {
        return iso_like.to_string();
    };

    let sep = locale.date_separator();
    let year = dt.year().rem_euclid(100);
    match locale.date_order() {
        DateOrder::MonthDayYear => {
            format!("{:02}{sep}{:02}{sep}{:02}", dt.month(), dt.day(), year)
        }
        DateOrder::DayMonthYear => {
            format!("{:02}{sep}{:02}{sep}{:02}", dt.day(), dt.month(), year)
        }
    }
}

/// Locale-grouped number with at most three fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64, locale: Locale) -> String {
    if !value.is_finite() {
        return non_finite_text(value);
    }

    let (negative, fixed) = fixed_parts(value, 3);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale.group_separator()));
    if !frac_part.is_empty() {
        out.push_str(locale.decimal_separator());
        out.push_str(frac_part);
    }
    out
}

/// Fixed-point text with `digits` fraction digits, halves rounded away from zero.
pub fn to_fixed(value: f64, digits: u32) -> String {
    if !value.is_finite() {
        return non_finite_text(value);
    }

    let (negative, fixed) = fixed_parts(value, digits);
    if negative { format!("-{}", fixed) } else { fixed }
}

fn non_finite_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

/// Rounds the exact binary value of `value` and returns (is_negative, unsigned digits).
///
/// The sign follows the input, so a small loss that rounds to zero still
/// reads as negative (`-0.00`).
fn fixed_parts(value: f64, digits: u32) -> (bool, String) {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            (value < 0.0, format!("{:.*}", digits as usize, rounded.abs()))
        }
        // Outside Decimal range; f64 formatting is exact enough there
        None => (value < 0.0, format!("{:.*}", digits as usize, value.abs())),
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
