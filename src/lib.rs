//! Cli for tallying the strikes made by an extracorporeal shock wave machine.
//! Every session is appended to a local SQLite log, and totals, per-tag
//! summaries and itemized listings are available straight from the terminal.
//!

pub mod cli;
pub mod store;
pub mod utils;
