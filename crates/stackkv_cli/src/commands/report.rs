//! End-of-session statistics report.

use serde::Serialize;
use stackkv_core::{StoreMode, TransactionalStore};
use std::io::{self, Write};

/// Statistics printed when a session ends.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Number of visible keys.
    pub visible_keys: usize,
    /// Transactions still open when the session ended.
    pub open_transactions: usize,
    /// SET operations.
    pub sets: u64,
    /// GET operations.
    pub gets: u64,
    /// GET operations that found nothing.
    pub misses: u64,
    /// DELETE operations.
    pub deletes: u64,
    /// COUNT operations.
    pub counts: u64,
    /// Transactions started.
    pub begins: u64,
    /// Transactions committed.
    pub commits: u64,
    /// Transactions rolled back.
    pub rollbacks: u64,
    /// COMMIT/ROLLBACK calls rejected while idle.
    pub no_transaction: u64,
    /// Deepest nesting level reached.
    pub max_depth: u64,
}

impl StatsReport {
    /// Collects a report from a store.
    pub fn collect(store: &TransactionalStore) -> Self {
        let stats = store.stats().snapshot();
        Self {
            visible_keys: store.len(),
            open_transactions: store.mode().depth(),
            sets: stats.sets,
            gets: stats.gets,
            misses: stats.misses,
            deletes: stats.deletes,
            counts: stats.counts,
            begins: stats.begins,
            commits: stats.commits,
            rollbacks: stats.rollbacks,
            no_transaction: stats.no_transaction,
            max_depth: stats.max_depth,
        }
    }
}

/// Writes the report in the requested format (`text` or `json`).
pub fn run<W: Write>(
    out: &mut W,
    store: &TransactionalStore,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = StatsReport::collect(store);

    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        _ => {
            print_text_output(out, &report, store.mode())?;
        }
    }

    Ok(())
}

fn print_text_output<W: Write>(
    out: &mut W,
    report: &StatsReport,
    mode: StoreMode,
) -> io::Result<()> {
    writeln!(out, "StackKV Session Statistics")?;
    writeln!(out, "==========================")?;
    writeln!(out)?;
    writeln!(out, "State:")?;
    writeln!(out, "  Mode:          {mode}")?;
    writeln!(out, "  Visible keys:  {}", report.visible_keys)?;
    writeln!(out)?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  SET:     {}", report.sets)?;
    let (gets, misses) = (report.gets, report.misses);
    writeln!(out, "  GET:     {gets} ({misses} not set)")?;
    writeln!(out, "  DELETE:  {}", report.deletes)?;
    writeln!(out, "  COUNT:   {}", report.counts)?;
    writeln!(out)?;
    writeln!(out, "Transactions:")?;
    writeln!(out, "  Started:         {}", report.begins)?;
    writeln!(out, "  Committed:       {}", report.commits)?;
    writeln!(out, "  Rolled back:     {}", report.rollbacks)?;
    writeln!(out, "  No transaction:  {}", report.no_transaction)?;
    writeln!(out, "  Max depth:       {}", report.max_depth)?;
    Ok(())
}
