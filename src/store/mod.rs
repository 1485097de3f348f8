pub mod entities;

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use entities::{DetailOrder, StrikeEntry};

/// Name of the database file inside the application directory.
pub const DB_FILE_NAME: &str = "strikes.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS strike_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    strikes_count INTEGER NOT NULL,
    entry_datetime TEXT NOT NULL,
    tag TEXT
)
";

/// Durable append-only log of strike entries.
///
/// Only the path is held onto. Every operation opens its own connection and
/// releases it on return, so locking across invocations is left entirely to
/// SQLite.
pub struct StrikeStore {
    db_path: PathBuf,
}

impl StrikeStore {
    /// Opens the store, creating the database file and the `strike_log`
    /// table on first use.
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!("Opening strike log at {db_path:?}");
        let conn = Connection::open(&db_path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { db_path })
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Appends one entry and assigns it the next id. The caller is
    /// responsible for validating that `strikes_count` is positive and that
    /// `tag` is already lowercase.
    pub fn insert(
        &self,
        strikes_count: i64,
        entry_datetime: DateTime<Utc>,
        tag: Option<&str>,
    ) -> Result<()> {
        let conn = self.connect()?;
        // Microsecond precision keeps the text fixed-width, so the column
        // sorts chronologically as plain text.
        conn.execute(
            "INSERT INTO strike_log (strikes_count, entry_datetime, tag) VALUES (?1, ?2, ?3)",
            params![
                strikes_count,
                entry_datetime.to_rfc3339_opts(SecondsFormat::Micros, false),
                tag
            ],
        )?;
        Ok(())
    }

    /// Sum of all strike counts, optionally narrowed to entries whose tag
    /// matches `filter_tag` case-insensitively. An empty or fully filtered
    /// out log yields 0.
    pub fn total(&self, filter_tag: Option<&str>) -> Result<i64> {
        let conn = self.connect()?;
        let total = match filter_tag {
            Some(tag) => conn.query_row(
                "SELECT COALESCE(SUM(strikes_count), 0) FROM strike_log WHERE LOWER(tag) = ?1",
                params![tag.to_lowercase()],
                |row| row.get(0),
            )?,
            None => conn.query_row(
                "SELECT COALESCE(SUM(strikes_count), 0) FROM strike_log",
                [],
                |row| row.get(0),
            )?,
        };
        Ok(total)
    }

    /// Per-tag sums plus the grand total. Untagged entries form one group
    /// under the `None` key, which the map orders before all tags.
    pub fn summary(&self) -> Result<(BTreeMap<Option<String>, i64>, i64)> {
        let conn = self.connect()?;
        let mut statement =
            conn.prepare("SELECT tag, SUM(strikes_count) FROM strike_log GROUP BY tag ORDER BY tag")?;
        let rows = statement.query_map([], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut sums = BTreeMap::new();
        let mut grand_total = 0;
        for row in rows {
            let (tag, sum) = row?;
            grand_total += sum;
            sums.insert(tag, sum);
        }
        Ok((sums, grand_total))
    }

    /// Itemized entries, optionally filtered like [StrikeStore::total], in
    /// one of the two supported orderings. Nothing matching is an empty
    /// vector, not an error.
    ///
    /// For [DetailOrder::DateThenTag] the conversion to the local calendar
    /// date is delegated to SQLite's `localtime` modifier.
    pub fn details(
        &self,
        filter_tag: Option<&str>,
        order: DetailOrder,
    ) -> Result<Vec<StrikeEntry>> {
        let conn = self.connect()?;
        let order_clause = match order {
            DetailOrder::TagThenDate => "ORDER BY LOWER(tag) ASC, entry_datetime DESC",
            DetailOrder::DateThenTag => {
                "ORDER BY date(entry_datetime, 'localtime') ASC, tag ASC, entry_datetime ASC"
            }
        };
        let sql = match filter_tag {
            Some(_) => format!(
                "SELECT id, strikes_count, entry_datetime, tag FROM strike_log \
                 WHERE LOWER(tag) = ?1 {order_clause}"
            ),
            None => format!(
                "SELECT id, strikes_count, entry_datetime, tag FROM strike_log {order_clause}"
            ),
        };

        let mut statement = conn.prepare(&sql)?;
        let entries = match filter_tag {
            Some(tag) => statement
                .query_map(params![tag.to_lowercase()], row_to_entry)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            None => statement
                .query_map([], row_to_entry)?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(entries)
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<StrikeEntry> {
    Ok(StrikeEntry {
        id: row.get(0)?,
        strikes_count: row.get(1)?,
        entry_datetime: row.get(2)?,
        tag: row.get(3)?,
    })
}
