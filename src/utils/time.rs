
use chrono::{DateTime, Local, NaiveDate, Utc};


/// This is the standard way of rendering a moment for terminal output in
/// strikelog. Entries are stored in UTC and shown in the user's timezone.
pub fn format_local(moment: DateTime<Utc>) -> String {
    moment
        .with_timezone(&Local)
        .format("%x %H:%M:%S")
        .to_string()
}

/// Calendar date of a moment in the user's timezone.
pub fn local_date(moment: DateTime<Utc>) -> NaiveDate {
    moment.with_timezone(&Local).date_naive()
}

/// This is the standard way of converting a date to a string in strikelog.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
