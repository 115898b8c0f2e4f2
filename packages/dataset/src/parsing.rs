//! Cell-level parsing for ASRS exports.
//!
//! Everything here is best-effort: malformed input yields `None`, never an
//! error.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static AIRPORT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9]{3,4})").unwrap_or_else(|_| unreachable!()));

/// Trims a raw cell; empty cells become `None`.
#[must_use]
pub fn clean_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses an ASRS `YYYYMM` date into the first day of that month.
///
/// Accepts exactly six ASCII digits with a month in `01..=12`.
#[must_use]
pub fn parse_year_month(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = raw[..4].parse().ok()?;
    let month: u32 = raw[4..].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Extracts the leading airport identifier from a locale reference such as
/// `"ORD.Airport"` or `"KLAX.Airport"`.
#[must_use]
pub fn extract_airport_code(locale: &str) -> Option<String> {
    AIRPORT_CODE
        .captures(locale)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike as _;

    #[test]
    fn cleans_cells() {
        assert_eq!(clean_cell("  ORD.Airport "), Some("ORD.Airport".to_string()));
        assert_eq!(clean_cell("   "), None);
        assert_eq!(clean_cell(""), None);
    }

    #[test]
    fn parses_year_month() {
        let date = parse_year_month("201703").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2017, 3, 1));
    }

    #[test]
    fn rejects_malformed_year_month() {
        assert!(parse_year_month("201713").is_none());
        assert!(parse_year_month("201700").is_none());
        assert!(parse_year_month("2017-03").is_none());
        assert!(parse_year_month("20173").is_none());
        assert!(parse_year_month("unknown").is_none());
        assert!(parse_year_month("").is_none());
    }

    #[test]
    fn extracts_airport_codes() {
        assert_eq!(extract_airport_code("ORD.Airport"), Some("ORD".to_string()));
        assert_eq!(extract_airport_code("KLAX.Airport"), Some("KLAX".to_string()));
        assert_eq!(extract_airport_code("SFO"), Some("SFO".to_string()));
        assert_eq!(extract_airport_code("ZZZZZ.ARTCC"), Some("ZZZZ".to_string()));
    }

    #[test]
    fn airport_code_requires_leading_uppercase_token() {
        assert!(extract_airport_code("ord.Airport").is_none());
        assert!(extract_airport_code("SF.Airport").is_none());
        assert!(extract_airport_code(" ORD").is_none());
        assert!(extract_airport_code("").is_none());
    }
}
