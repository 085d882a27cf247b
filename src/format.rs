//! Display formatting for values coming back from the API.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder shown when a record has no value for a column.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a phone number by digit count: 10 digits as `(xxx) xxx-xxxx`,
/// 11 digits as `x (xxx) xxx-xxxx`. Anything else is returned unchanged.
#[must_use]
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        11 => format!(
            "{} ({}) {}-{}",
            &digits[..1],
            &digits[1..4],
            &digits[4..7],
            &digits[7..]
        ),
        _ => phone.to_string(),
    }
}

/// Renders a server timestamp as a calendar date, or `N/A` when absent or unparseable.
#[must_use]
pub fn format_date(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.date_naive().to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return parsed.date().to_string();
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed.to_string();
    }

    NOT_AVAILABLE.to_string()
}

/// Uppercased first character of a name, used as the avatar initial.
#[must_use]
pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
}
