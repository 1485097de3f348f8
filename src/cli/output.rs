use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::{
    store::entities::{DetailOrder, StrikeEntry},
    utils::time::{format_date, format_local, local_date},
};

pub fn render_added(count: i64, tag: Option<&str>) -> String {
    match tag {
        Some(tag) => format!("Successfully added {count} strikes with tag '{tag}'."),
        None => format!("Successfully added {count} strikes."),
    }
}

pub fn render_total(total: i64, filter_tag: Option<&str>) -> String {
    match filter_tag {
        Some(tag) if total > 0 => format!("Total strikes for tag '{tag}': {total}"),
        Some(tag) => format!("No strikes found for tag '{tag}'."),
        None if total > 0 => format!("Total strikes: {total}"),
        None => "No strikes recorded yet.".to_string(),
    }
}

/// The map already orders the untagged group first and tags ascending.
pub fn render_summary(sums: &BTreeMap<Option<String>, i64>, grand_total: i64) -> String {
    if sums.is_empty() && grand_total == 0 {
        return "No strikes recorded yet.".to_string();
    }
    let mut lines = vec!["Strike Summary:".to_string()];
    for (tag, sum) in sums {
        lines.push(match tag {
            None => format!("  Untagged: {sum} strikes"),
            Some(tag) => format!("  Tag '{tag}': {sum} strikes"),
        });
    }
    lines.push("--------------------".to_string());
    lines.push(format!("Grand Total: {grand_total} strikes"));
    lines.join("\n")
}

/// Renders entries already sorted by the store, inserting a group heading
/// whenever the tag (or the local calendar date) changes and a blank line
/// between groups.
pub fn render_details(
    entries: &[StrikeEntry],
    order: DetailOrder,
    filter_tag: Option<&str>,
) -> String {
    if entries.is_empty() {
        return match filter_tag {
            Some(tag) => format!("No entries found for tag '{tag}'."),
            None => "No entries found.".to_string(),
        };
    }

    let mut lines = vec!["Strike Details:".to_string()];
    match order {
        DetailOrder::TagThenDate => {
            let mut current: Option<Option<&str>> = None;
            for entry in entries {
                let tag = entry.tag.as_deref();
                if current != Some(tag) {
                    if current.is_some() {
                        lines.push(String::new());
                    }
                    lines.push(match tag {
                        None => "Untagged:".to_string(),
                        Some(tag) => format!("Tag '{tag}':"),
                    });
                    current = Some(tag);
                }
                lines.push(format!(
                    "  {}: {} strikes",
                    format_local(entry.entry_datetime),
                    entry.strikes_count
                ));
            }
        }
        DetailOrder::DateThenTag => {
            let mut current: Option<NaiveDate> = None;
            for entry in entries {
                let date = local_date(entry.entry_datetime);
                if current != Some(date) {
                    if current.is_some() {
                        lines.push(String::new());
                    }
                    lines.push(format!("{}:", format_date(date)));
                    current = Some(date);
                }
                let label = match entry.tag.as_deref() {
                    None => "Untagged".to_string(),
                    Some(tag) => format!("Tag '{tag}'"),
                };
                lines.push(format!(
                    "  {} {}: {} strikes",
                    format_local(entry.entry_datetime),
                    label,
                    entry.strikes_count
                ));
            }
        }
    }
    lines.join("\n")
}

pub fn render_info(db_path: &Path) -> String {
    format!(
        "{} v{}\nDatabase: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        db_path.display()
    )
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;

    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

    use crate::store::entities::{DetailOrder, StrikeEntry};

    use super::{render_added, render_details, render_info, render_summary, render_total};

    const TEST_START_DATE: NaiveDateTime =
        NaiveDateTime::new(NaiveDate::from_ymd_opt(2018, 7, 4).unwrap(), NaiveTime::MIN);

    fn entry(id: i64, count: i64, offset_days: i64, tag: Option<&str>) -> StrikeEntry {
        StrikeEntry {
            id,
            strikes_count: count,
            entry_datetime: Utc.from_utc_datetime(&TEST_START_DATE) + Duration::days(offset_days),
            tag: tag.map(str::to_string),
        }
    }

    #[test]
    fn test_render_added() {
        assert_eq!(render_added(5, None), "Successfully added 5 strikes.");
        assert_eq!(
            render_added(3, Some("gym")),
            "Successfully added 3 strikes with tag 'gym'."
        );
    }

    #[test]
    fn test_render_total() {
        assert_eq!(render_total(15, None), "Total strikes: 15");
        assert_eq!(render_total(0, None), "No strikes recorded yet.");
        assert_eq!(
            render_total(10, Some("gym")),
            "Total strikes for tag 'gym': 10"
        );
        assert_eq!(
            render_total(0, Some("gym")),
            "No strikes found for tag 'gym'."
        );
    }

    #[test]
    fn test_render_summary() {
        let mut sums = BTreeMap::new();
        sums.insert(None, 5);
        sums.insert(Some("gym".to_string()), 10);
        assert_eq!(
            render_summary(&sums, 15),
            "Strike Summary:\n  Untagged: 5 strikes\n  Tag 'gym': 10 strikes\n\
             --------------------\nGrand Total: 15 strikes"
        );
    }

    #[test]
    fn test_render_summary_empty() {
        assert_eq!(render_summary(&BTreeMap::new(), 0), "No strikes recorded yet.");
    }

    #[test]
    fn test_render_details_empty() {
        assert_eq!(
            render_details(&[], DetailOrder::TagThenDate, None),
            "No entries found."
        );
        assert_eq!(
            render_details(&[], DetailOrder::TagThenDate, Some("gym")),
            "No entries found for tag 'gym'."
        );
    }

    #[test]
    fn test_render_details_by_tag_groups() {
        // Already in store order: untagged first, then tags ascending.
        let entries = [
            entry(1, 4, 0, None),
            entry(2, 2, 1, Some("gym")),
            entry(3, 1, 0, Some("gym")),
        ];
        let rendered = render_details(&entries, DetailOrder::TagThenDate, None);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "Strike Details:");
        assert_eq!(lines[1], "Untagged:");
        assert!(lines[2].ends_with(": 4 strikes"));
        // Blank line between the untagged group and the gym group.
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Tag 'gym':");
        assert!(lines[5].ends_with(": 2 strikes"));
        assert!(lines[6].ends_with(": 1 strikes"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_render_details_by_date_groups() {
        // Days far apart so the local date differs in any timezone.
        let entries = [
            entry(1, 4, 0, None),
            entry(2, 2, 0, Some("gym")),
            entry(3, 1, 5, Some("gym")),
        ];
        let rendered = render_details(&entries, DetailOrder::DateThenTag, None);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[0], "Strike Details:");
        assert!(lines[1].ends_with(":"));
        assert!(lines[2].contains("Untagged") && lines[2].ends_with(": 4 strikes"));
        assert!(lines[3].contains("Tag 'gym'") && lines[3].ends_with(": 2 strikes"));
        assert_eq!(lines[4], "");
        assert!(lines[5].ends_with(":"));
        assert!(lines[6].contains("Tag 'gym'") && lines[6].ends_with(": 1 strikes"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_render_info() {
        let rendered = render_info(Path::new("/tmp/strikes.db"));
        assert!(rendered.starts_with("strikelog v"));
        assert!(rendered.ends_with("Database: /tmp/strikes.db"));
    }
}
