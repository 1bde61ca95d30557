use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::SaintError;

// chrono's %Y accepts any number of digits, so the shape is checked first
// to keep "03/05/24" from becoming year 24.
static DATE_FORMATS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap(), "%Y-%m-%d"),
        (Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(), "%m/%d/%Y"),
    ]
});

static SHORT_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").unwrap());

/// Parse a date given on the command line.
pub fn parse_date(input: &str) -> Result<NaiveDate, SaintError> {
    let trimmed = input.trim();

    DATE_FORMATS
        .iter()
        .filter(|(shape, _)| shape.is_match(trimmed))
        .find_map(|(_, fmt)| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| parse_short_year(trimmed))
        .ok_or_else(|| SaintError::DateParse {
            input: input.to_string(),
        })
}

/// `MM/DD/YY`, with 00-68 in the 2000s and 69-99 in the 1900s.
/// chrono's own `%y` puts 69 in the 2000s.
fn parse_short_year(input: &str) -> Option<NaiveDate> {
    let caps = SHORT_YEAR.captures(input)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let yy: i32 = caps[3].parse().ok()?;

    let year = if yy <= 68 { 2000 + yy } else { 1900 + yy };
    NaiveDate::from_ymd_opt(year, month, day)
}
