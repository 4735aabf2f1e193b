//! Date handling for itineraries
//!
//! Two concerns live here:
//! - the export date given on the command line (`today`, `2025-10-31`,
//!   `10/31/2025`, `friday`, `friday+1`), which stamps the output file name;
//! - display formatting of dates typed into the itinerary. Fields that hold an
//!   ISO date are shown as `31st October 2025`; free text such as
//!   `Thu 31 Oct 25` or `Initial Payment` is passed through untouched.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use crate::error::{Error, Result};

/// Date expression types
#[derive(Debug, Clone, PartialEq)]
pub enum DateExpression {
    /// Use today's date
    Today,
    /// Use an explicit date
    Explicit(NaiveDate),
    /// Use next occurrence of a day of week with optional week offset
    DayOfWeek { day: Weekday, offset: u32 },
    /// No date (empty)
    None,
}

/// Parse a date expression string into a DateExpression
///
/// Supported formats:
/// - `""` (empty) → None
/// - `"today"` → Today
/// - `"2025-10-31"` → Explicit date (ISO format)
/// - `"10/31/2025"` → Explicit date (US format)
/// - `"Friday"` → Next Friday (or today if today is Friday)
/// - `"Friday+2"` → Third upcoming Friday
pub fn parse_date_expression(expr: &str) -> Result<DateExpression> {
    let expr = expr.trim();

    if expr.is_empty() {
        return Ok(DateExpression::None);
    }

    if expr.eq_ignore_ascii_case("today") {
        return Ok(DateExpression::Today);
    }

    if let Some(date) = parse_iso_date(expr) {
        return Ok(DateExpression::Explicit(date));
    }

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%m/%d/%Y") {
        return Ok(DateExpression::Explicit(date));
    }

    let (day_str, offset) = match expr.split_once('+') {
        Some((day_str, offset_str)) => {
            let offset: u32 = offset_str.trim().parse()
                .map_err(|_| Error::InvalidDateExpression(format!("Invalid offset: {}", offset_str)))?;
            (day_str, offset)
        }
        None => (expr, 0),
    };

    parse_weekday(day_str)
        .map(|day| DateExpression::DayOfWeek { day, offset })
        .ok_or_else(|| Error::InvalidDateExpression(format!("Unable to parse date expression: {}", expr)))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Resolve a DateExpression to an actual date (if applicable)
///
/// Fails when a week offset pushes the date past the supported range.
pub fn resolve_date(expr: &DateExpression) -> Result<Option<NaiveDate>> {
    let today = Local::now().date_naive();
    match expr {
        DateExpression::None => Ok(None),
        DateExpression::Today => Ok(Some(today)),
        DateExpression::Explicit(date) => Ok(Some(*date)),
        DateExpression::DayOfWeek { day, offset } => next_weekday_from(today, *day, *offset)
            .map(Some)
            .ok_or_else(|| Error::InvalidDateExpression(format!("{:?}+{} is out of range", day, offset))),
    }
}

/// Next occurrence of `target` on or after `from`, pushed `offset` weeks later
fn next_weekday_from(from: NaiveDate, target: Weekday, offset: u32) -> Option<NaiveDate> {
    let current = from.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let days_until = u64::from((wanted + 7 - current) % 7);
    from.checked_add_days(Days::new(days_until + u64::from(offset) * 7))
}

/// Parse a stored `YYYY-MM-DD` field value
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

/// English ordinal suffix for a day of the month
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Format a date as "31st October 2025"
pub fn format_date(date: &NaiveDate) -> String {
    format!("{}{} {}", date.day(), ordinal_suffix(date.day()), date.format("%B %Y"))
}

/// Display form of a stored date field: ISO dates are formatted, anything
/// else is returned as typed.
pub fn display_date(text: &str) -> String {
    match parse_iso_date(text) {
        Some(date) => format_date(&date),
        None => text.trim().to_string(),
    }
}

/// Date stamp used in export file names
pub fn file_stamp(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
