use anyhow::Result;
use clap::error::ErrorKind;
use clap::CommandFactory;

use crate::store::entities::DetailOrder;

use super::Args;

/// The single operation an invocation performs. Produced only by [resolve],
/// so holding one means the flag combination was already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Append `count` strikes, optionally tagged.
    AddEntry { count: i64, tag: Option<String> },
    /// Print the total strike count, optionally narrowed to one tag.
    CountTotal { filter_tag: Option<String> },
    /// Print per-tag sums and the grand total.
    Summary,
    /// Print itemized entries grouped by tag or by calendar date.
    Detail {
        filter_tag: Option<String>,
        order: DetailOrder,
    },
    /// Print the version and the storage location.
    Info,
}

/// Resolves the flat flag surface into exactly one [Operation].
///
/// Explicit query flags never tie-break silently: any two of
/// `--info`/`--summary`/`--detail` (or a bare `--count` next to them) is a
/// usage error naming the combination. Implicit signals follow precedence:
/// `--filter-tag` attaches to `--detail` when that flag is present and
/// otherwise selects count mode on its own, while the positionals select
/// add mode only when no query signal exists at all.
pub fn resolve(args: Args) -> Result<Operation> {
    let Args {
        amount,
        session_tag,
        count,
        summary,
        detail,
        by_date,
        info,
        filter_tag,
        debug: _,
    } = args;

    if info {
        let conflicting = active_flags(&[
            (count, "--count"),
            (summary, "--summary"),
            (detail, "--detail"),
            (filter_tag.is_some(), "--filter-tag"),
        ]);
        if !conflicting.is_empty() {
            return Err(usage_error(format!(
                "--info cannot be combined with {}.",
                conflicting.join(", ")
            )));
        }
    }

    if summary {
        let conflicting = active_flags(&[
            (count, "--count"),
            (detail, "--detail"),
            (filter_tag.is_some(), "--filter-tag"),
        ]);
        if !conflicting.is_empty() {
            return Err(usage_error(format!(
                "--summary cannot be combined with {}.",
                conflicting.join(", ")
            )));
        }
    }

    if by_date && !detail {
        return Err(usage_error(
            "--by-date can only be used together with --detail.".to_string(),
        ));
    }

    if detail && count && filter_tag.is_none() {
        return Err(usage_error(
            "--count cannot be combined with --detail unless --filter-tag is given.".to_string(),
        ));
    }

    if amount.is_some() || session_tag.is_some() {
        let conflicting = active_flags(&[
            (count, "--count"),
            (summary, "--summary"),
            (detail, "--detail"),
            (info, "--info"),
            (filter_tag.is_some(), "--filter-tag"),
        ]);
        if !conflicting.is_empty() {
            return Err(usage_error(format!(
                "Positional arguments <AMOUNT> and [SESSION_TAG] are not allowed with {}.",
                conflicting.join(", ")
            )));
        }
    }

    if info {
        return Ok(Operation::Info);
    }
    if detail {
        let order = if by_date {
            DetailOrder::DateThenTag
        } else {
            DetailOrder::TagThenDate
        };
        return Ok(Operation::Detail { filter_tag, order });
    }
    if summary {
        return Ok(Operation::Summary);
    }
    if count || filter_tag.is_some() {
        return Ok(Operation::CountTotal { filter_tag });
    }
    match amount {
        Some(amount) => Ok(Operation::AddEntry {
            count: amount,
            tag: session_tag,
        }),
        None => Err(Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "Amount is required unless a query mode is selected.",
            )
            .into()),
    }
}

fn active_flags<'a>(flags: &[(bool, &'a str)]) -> Vec<&'a str> {
    flags
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, name)| *name)
        .collect()
}

fn usage_error(message: String) -> anyhow::Error {
    Args::command()
        .error(ErrorKind::ArgumentConflict, message)
        .into()
}
