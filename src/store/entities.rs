use chrono::DateTime;
use chrono::Utc;

/// A single logged strike session. Entries are append-only: once written
/// they are never updated or deleted.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct StrikeEntry {
    /// Assigned by the store, strictly increasing, never reused.
    pub id: i64,
    pub strikes_count: i64,
    pub entry_datetime: DateTime<Utc>,
    /// Stored lowercase. `None` means the session was untagged.
    pub tag: Option<String>,
}

/// Orderings supported by the itemized detail query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOrder {
    /// Tag ascending with untagged first, newest entry first within a tag.
    TagThenDate,
    /// Local calendar date ascending, tag ascending within a day.
    DateThenTag,
}
