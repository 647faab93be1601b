//! Price history command handlers for the CLI.
//!
//! The history file lives at `TASKALOOP_HISTORY_PATH`; each `record` loads,
//! appends and rewrites it.

use std::path::Path;

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::Subcommand;
use serde::Serialize;
use taskaloop_core::StoreCatalog;
use taskaloop_pricing::{PriceHistory, PriceObservation, PriceTrend};

/// Sub-commands available under `history`.
#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// Record an observed shelf price
    Record {
        /// Item name (matched case-insensitively)
        #[arg(long)]
        item: String,
        /// Store id from the catalog
        #[arg(long)]
        store: String,
        /// Observed price
        #[arg(long)]
        price: f64,
        /// Pricing unit, e.g. lb or gallon
        #[arg(long)]
        unit: String,
    },
    /// Show recorded prices, the lowest price and the recent trend for an item
    Show {
        /// Item name (matched case-insensitively)
        #[arg(long)]
        item: String,
        /// Days counted as "recent" when computing the trend
        #[arg(long, default_value = "7")]
        window_days: i64,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryReport<'a> {
    pub item: String,
    pub observations: Vec<&'a PriceObservation>,
    pub lowest: Option<&'a PriceObservation>,
    pub trend: PriceTrend,
}

pub(crate) fn build_report<'a>(
    history: &'a PriceHistory,
    item: &str,
    window: Duration,
    now: chrono::DateTime<Utc>,
) -> HistoryReport<'a> {
    HistoryReport {
        item: item.trim().to_lowercase(),
        observations: history.observations_for(item).collect(),
        lowest: history.lowest_price(item),
        trend: history.trend(item, window, now),
    }
}

/// Append one observation to the history file.
///
/// Unknown store ids are recorded anyway with a warning, since observations
/// may come from stores not in the active catalog.
///
/// # Errors
///
/// Returns an error if the observation is invalid or the history file cannot
/// be read or written.
pub(crate) fn run_history_record(
    history_path: &Path,
    catalog: &StoreCatalog,
    item: &str,
    store: &str,
    price: f64,
    unit: &str,
) -> anyhow::Result<()> {
    if catalog.get(store).is_none() {
        tracing::warn!(store_id = store, "store is not in the catalog; recording anyway");
    }

    let mut history = PriceHistory::load(history_path)?;
    let observation = history.record(item, store, price, unit, Utc::now())?.clone();
    history
        .save(history_path)
        .with_context(|| format!("saving price history to {}", history_path.display()))?;

    println!(
        "recorded {} at {}: ${:.2}/{} ({})",
        observation.item, observation.store_id, observation.price, observation.unit, observation.id
    );
    Ok(())
}

/// Print observations, lowest price and trend for one item.
///
/// # Errors
///
/// Returns an error if the window is not positive or too large, the history
/// file cannot be loaded, or JSON encoding fails.
pub(crate) fn run_history_show(
    history_path: &Path,
    item: &str,
    window_days: i64,
    json: bool,
) -> anyhow::Result<()> {
    if window_days <= 0 {
        anyhow::bail!("--window-days must be positive, got {window_days}");
    }
    let Some(window) = Duration::try_days(window_days) else {
        anyhow::bail!("--window-days is too large, got {window_days}");
    };

    let history = PriceHistory::load(history_path)?;
    let report = build_report(&history, item, window, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn render_report(report: &HistoryReport<'_>) -> String {
    if report.observations.is_empty() {
        return format!("No price history recorded for {}", report.item);
    }

    let mut lines = vec![format!(
        "{} ({} observations)",
        report.item,
        report.observations.len()
    )];
    for o in &report.observations {
        lines.push(format!(
            "  {}  {:<20} ${:.2}/{}",
            o.observed_at.format("%Y-%m-%d %H:%M"),
            o.store_id,
            o.price,
            o.unit
        ));
    }
    if let Some(lowest) = report.lowest {
        lines.push(format!(
            "Lowest: ${:.2}/{} at {} on {}",
            lowest.price,
            lowest.unit,
            lowest.store_id,
            lowest.observed_at.format("%Y-%m-%d")
        ));
    }
    lines.push(format!("Trend: {}", report.trend));
    lines.join("\n")
}
