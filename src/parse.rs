//! Lenient parsers for the display strings served by the screener backend.
//!
//! Both parsers are total: malformed input becomes NaN or `None`, never an
//! error, so a single odd cell can not break a whole table.

use chrono::{DateTime, NaiveDate};

/// Fallback formats tried after the `DD-MM-YYYY` / `DD/MM/YYYY` fast path.
const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d %b, %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%B %d, %Y",
];

/// Parse a metric display string into a float.
///
/// Handles `"₹1,234.5"`, `"12.3%"`, `"$ 5"` and `"High / Low"` ranges (the
/// first value is used). Returns `f64::NAN` when no number can be read.
///
/// ```rust
/// use screener_view::parse::parse_value;
/// assert_eq!(parse_value(Some("₹1,234.5%")), 1234.5);
/// assert_eq!(parse_value(Some("52.3 / 48.1")), 52.3);
/// assert!(parse_value(None).is_nan());
/// ```
pub fn parse_value(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return f64::NAN;
    };
    let head = raw.split('/').next().unwrap_or("");
    let cleaned: String = head
        .chars()
        .filter(|c| !matches!(c, '₹' | '$' | ',' | '%') && !c.is_whitespace())
        .collect();
    parse_float_prefix(&cleaned)
}

/// Read the longest leading decimal number of `s`, like a browser's
/// `parseFloat`. Trailing text such as `"Cr."` is ignored.
fn parse_float_prefix(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Parse a corporate-action date cell.
///
/// `DD-MM-YYYY` and `DD/MM/YYYY` are tried first, then a set of common
/// written formats (`2025-06-10`, `10 Jun 2025`, `16 Oct, 2025`, ...), then
/// RFC 3339 and RFC 2822 timestamps.
/// Placeholders such as `""`, `"-"` or `"Not Announced"` yield `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() || s == "-" || s.to_lowercase().contains("not") {
        return None;
    }

    if let Some(date) = parse_day_month_year(s) {
        return Some(date);
    }

    for fmt in FALLBACK_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
        .map(|dt| dt.date_naive())
}

fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    let sep = if s.contains('-') { '-' } else { '/' };
    let parts: Vec<&str> = s.split(sep).collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };
    let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    if day.len() > 2 || month.len() > 2 || year.len() != 4 {
        return None;
    }
    if !all_digits(day) || !all_digits(month) || !all_digits(year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
