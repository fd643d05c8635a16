//! Academic-year date window: May of the window year through April of the
//! following year, inclusive.

use lazy_static::lazy_static;
use regex::Regex;

/// First month of the window in its start year.
const WINDOW_START_MONTH: u32 = 5;
/// Last month of the window in the year after its start year.
const WINDOW_END_MONTH: u32 = 4;

lazy_static! {
    // Scholar prints dates as YYYY/MM/DD or YYYY/MM, month and day
    // sometimes without a leading zero.
    static ref RECORD_DATE_PATTERN: Regex =
        Regex::new(r"^\s*(\d{4})/(\d{1,2})(?:/(\d{1,2}))?\s*$").unwrap();
}

/// Position of one record's date relative to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// Strictly precedes May of the window year. Records arrive in
    /// descending date order, so this ends the profile's traversal.
    Before,
    In,
    /// Strictly follows April of the following year; skipped, traversal
    /// continues.
    After,
}

/// Parse a record's publication-date field into (year, month).
///
/// Returns `None` for anything that is not `YYYY/MM/DD` or `YYYY/MM` with a
/// valid month; the caller maps that to a `DateUnparseable` outcome.
pub fn parse_record_date(raw: &str) -> Option<(i32, u32)> {
    let caps = RECORD_DATE_PATTERN.captures(raw)?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    if let Some(day) = caps.get(3) {
        let day: u32 = day.as_str().parse().ok()?;
        if !(1..=31).contains(&day) {
            return None;
        }
    }
    Some((year, month))
}

/// Place a (year, month) date relative to the window starting in
/// `window_year`.
pub fn window_position(year: i32, month: u32, window_year: i32) -> DateWindow {
    if year < window_year || (year == window_year && month < WINDOW_START_MONTH) {
        DateWindow::Before
    } else if year > window_year + 1 || (year == window_year + 1 && month > WINDOW_END_MONTH) {
        DateWindow::After
    } else {
        DateWindow::In
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_date() {
        assert_eq!(parse_record_date("2023/06/15"), Some((2023, 6)));
        assert_eq!(parse_record_date("2023/6/5"), Some((2023, 6)));
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_record_date("2024/2"), Some((2024, 2)));
        assert_eq!(parse_record_date(" 2024/02 "), Some((2024, 2)));
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        assert_eq!(parse_record_date("2023"), None);
        assert_eq!(parse_record_date("June 2023"), None);
        assert_eq!(parse_record_date("2023-06-15"), None);
        assert_eq!(parse_record_date("2023/13"), None);
        assert_eq!(parse_record_date("2023/06/32"), None);
        assert_eq!(parse_record_date(""), None);
    }

    #[test]
    fn test_window_boundaries() {
        // Window 2023: May 2023 through April 2024 inclusive.
        assert_eq!(window_position(2023, 4, 2023), DateWindow::Before);
        assert_eq!(window_position(2023, 5, 2023), DateWindow::In);
        assert_eq!(window_position(2023, 12, 2023), DateWindow::In);
        assert_eq!(window_position(2024, 1, 2023), DateWindow::In);
        assert_eq!(window_position(2024, 4, 2023), DateWindow::In);
        assert_eq!(window_position(2024, 5, 2023), DateWindow::After);
        assert_eq!(window_position(2022, 12, 2023), DateWindow::Before);
        assert_eq!(window_position(2025, 1, 2023), DateWindow::After);
    }
}
