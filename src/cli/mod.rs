pub mod operation;
pub mod output;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    store::{entities::DetailOrder, StrikeStore, DB_FILE_NAME},
    utils::{dir::create_application_default_path, logging::enable_logging},
};

use operation::Operation;

#[derive(Parser, Debug)]
#[command(name = "strikelog", version)]
#[command(about = "Strike counter for extracorporeal shock wave machines", long_about = None)]
pub struct Args {
    #[arg(
        value_name = "AMOUNT",
        allow_negative_numbers = true,
        help = "Number of strikes to add (required unless a query mode is selected)"
    )]
    amount: Option<i64>,
    #[arg(
        value_name = "SESSION_TAG",
        help = "Optional tag for the session, stored lowercase (add mode only)"
    )]
    session_tag: Option<String>,
    #[arg(short, long, help = "Report the total strike count")]
    count: bool,
    #[arg(short, long, help = "Report per-tag sums and the grand total")]
    summary: bool,
    #[arg(short, long, help = "List individual entries grouped by tag")]
    detail: bool,
    #[arg(
        short = 'b',
        long = "by-date",
        help = "With --detail, group entries by calendar date instead of tag"
    )]
    by_date: bool,
    #[arg(short, long, help = "Show the version and where the log is stored")]
    info: bool,
    #[arg(
        long,
        value_name = "TAG",
        help = "Restrict --count or --detail to this tag, case-insensitively (implies --count)"
    )]
    filter_tag: Option<String>,
    #[arg(long, help = "Enable debug logging")]
    debug: bool,
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let data_path = create_application_default_path()?;
    let logging_level = if args.debug {
        Some(LevelFilter::DEBUG)
    } else {
        None
    };
    enable_logging(&data_path, logging_level, args.debug)?;
    debug!("Application started with arguments: {args:?}");

    // Resolution happens before the store is even constructed, so invalid
    // flag combinations never touch the database.
    let operation = operation::resolve(args)?;
    let db_path = data_path.join(DB_FILE_NAME);

    match operation {
        Operation::Info => {
            println!("{}", output::render_info(&db_path));
            Ok(())
        }
        Operation::AddEntry { count, tag } => {
            add_entry(&StrikeStore::new(db_path)?, count, tag.as_deref())
        }
        Operation::CountTotal { filter_tag } => {
            count_total(&StrikeStore::new(db_path)?, filter_tag.as_deref())
        }
        Operation::Summary => summarize(&StrikeStore::new(db_path)?),
        Operation::Detail { filter_tag, order } => {
            detail(&StrikeStore::new(db_path)?, filter_tag.as_deref(), order)
        }
    }
}

/// Validates and appends one strike session. The tag is folded to lowercase
/// before it is written so later filters can match it in any case.
fn add_entry(store: &StrikeStore, count_to_add: i64, session_tag: Option<&str>) -> Result<()> {
    debug!("Attempting to add strike entry: count={count_to_add}, tag={session_tag:?}");
    if count_to_add <= 0 {
        bail!("Strike count must be a positive integer.");
    }
    let tag = session_tag.map(str::to_lowercase);
    store.insert(count_to_add, Utc::now(), tag.as_deref())?;
    println!("{}", output::render_added(count_to_add, tag.as_deref()));
    Ok(())
}

fn count_total(store: &StrikeStore, filter_tag: Option<&str>) -> Result<()> {
    let filter = filter_tag.map(str::to_lowercase);
    let total = store.total(filter.as_deref())?;
    debug!("Retrieved total strikes: {total}");
    println!("{}", output::render_total(total, filter.as_deref()));
    Ok(())
}

fn summarize(store: &StrikeStore) -> Result<()> {
    let (sums, grand_total) = store.summary()?;
    debug!(
        "Retrieved summary: {} tags, grand total {grand_total}",
        sums.len()
    );
    println!("{}", output::render_summary(&sums, grand_total));
    Ok(())
}

fn detail(store: &StrikeStore, filter_tag: Option<&str>, order: DetailOrder) -> Result<()> {
    let filter = filter_tag.map(str::to_lowercase);
    let entries = store.details(filter.as_deref(), order)?;
    debug!("Retrieved {} detail entries", entries.len());
    println!("{}", output::render_details(&entries, order, filter.as_deref()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::store::{StrikeStore, DB_FILE_NAME};

    use super::add_entry;

    #[test]
    fn test_add_entry_folds_tag_to_lowercase() -> Result<()> {
        let dir = tempdir()?;
        let store = StrikeStore::new(dir.path().join(DB_FILE_NAME))?;
        add_entry(&store, 3, Some("Gym"))?;
        add_entry(&store, 7, Some("GYM"))?;
        add_entry(&store, 5, None)?;

        let (sums, grand_total) = store.summary()?;
        assert_eq!(sums[&Some("gym".to_string())], 10);
        assert_eq!(sums[&None], 5);
        assert_eq!(grand_total, 15);
        assert_eq!(store.total(Some("gym"))?, 10);
        Ok(())
    }

    #[test]
    fn test_add_entry_rejects_non_positive_counts() -> Result<()> {
        let dir = tempdir()?;
        let store = StrikeStore::new(dir.path().join(DB_FILE_NAME))?;
        add_entry(&store, 4, None)?;

        assert!(add_entry(&store, 0, None).is_err());
        assert!(add_entry(&store, -2, Some("gym")).is_err());
        // The failed validations left the log untouched.
        assert_eq!(store.total(None)?, 4);
        Ok(())
    }
}
