use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("date pattern is valid"));

/// Parse an amount column into a whole number.
///
/// Every non-digit is dropped, separators included, so the digits are read
/// as an integer in the smallest currency unit:
/// - "767 000" -> 767000
/// - "12.345,67" -> 1234567
/// - "" or "-" -> 0
///
/// Never fails; anything unusable becomes zero.
pub fn parse_amount(s: &str) -> Decimal {
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&digits).unwrap_or(Decimal::ZERO)
}

/// Parse a DD/MM/YYYY date, returning None for anything else.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !DATE_RE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

/// Tidy an accumulated description: drop table rules (`|`), trim, and
/// collapse runs of whitespace.
pub fn clean_libelle(s: &str) -> String {
    s.replace('|', "").split_whitespace().collect::<Vec<_>>().join(" ")
}
