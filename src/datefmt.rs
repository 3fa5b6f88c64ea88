use chrono::{Local, NaiveDate};

/// Fallback pattern used when the configured one is unrecognized or unset
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

/// Map a user-facing date pattern to its chrono equivalent.
///
/// The pattern set is closed; anything outside it falls back to the default.
fn strftime_pattern(pattern: &str) -> &'static str {
    match pattern {
        "yyyy-MM-dd" => "%Y-%m-%d",
        "MM/dd/yyyy" => "%m/%d/%Y",
        "dd/MM/yyyy" => "%d/%m/%Y",
        "yyyy/MM/dd" => "%Y/%m/%d",
        "MM-dd-yyyy" => "%m-%d-%Y",
        "dd-MM-yyyy" => "%d-%m-%Y",
        "dd.MM.yyyy" => "%d.%m.%Y",
        "yyyy.MM.dd" => "%Y.%m.%d",
        "yyyyMMdd" => "%Y%m%d",
        "ddMMyyyy" => "%d%m%Y",
        "MMddyyyy" => "%m%d%Y",
        _ => "%Y-%m-%d",
    }
}

/// Render a date according to the given pattern. Never fails.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    date.format(strftime_pattern(pattern)).to_string()
}

/// Render today's local date according to the given pattern.
pub fn current_timestamp(pattern: &str) -> String {
    format_date(Local::now().date_naive(), pattern)
}
