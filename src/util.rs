// Utility helpers for parsing, calendar arithmetic and number formatting.
//
// This module centralizes the "dirty" CSV text handling so the rest of the
// code can assume clean, typed values.
use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime};
use num_format::{Locale, ToFormattedString};
use std::str::FromStr;

/// Parse an `OCCUR_DATE` style value (`MM/DD/YYYY`).
///
/// Returns `None` for missing, empty, or impossible dates (e.g. `02/30/2020`);
/// a bad value is never coerced into a different day. The year must have
/// exactly four digits (`05/27/21` is rejected, not read as year 21).
pub fn parse_date_mdy(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let year = s.rsplit('/').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

/// Parse an `OCCUR_TIME` style value. `HH:MM:SS` is expected; `HH:MM` is
/// accepted as well since some exports truncate seconds.
pub fn parse_time_hms(s: Option<&str>) -> Option<NaiveTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<u32>().ok()
}

/// Coerce a textual field into one of the closed enums in `types`.
///
/// Unrecognized, empty, or missing text falls back to the enum's default
/// (`Unknown`) instead of failing.
pub fn coerce<T>(s: Option<&str>) -> T
where
    T: FromStr + Default,
{
    s.map(str::trim)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or_default()
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d - Days::new(u64::from(d.day0()))
}

pub fn next_month(d: NaiveDate) -> Option<NaiveDate> {
    d.checked_add_months(Months::new(1))
}

/// Index of `d`'s month counted from year 0, so consecutive months differ by 1.
pub fn month_index(d: NaiveDate) -> i64 {
    i64::from(d.year()) * 12 + i64::from(d.month0())
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    NAMES
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("?")
}

/// Percentage `part / whole * 100`; 0 when `whole` is 0.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234.56`).
    let s = format!("{:.*}", decimals, n.abs());
    // No sign on values that round to zero.
    let neg = n.is_sign_negative() && s.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_optional(n: Option<f64>, decimals: usize) -> String {
    n.map(|v| format!("{:.*}", decimals, v)).unwrap_or_default()
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
