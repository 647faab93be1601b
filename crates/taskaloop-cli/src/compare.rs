//! Price comparison command handlers for the CLI.
//!
//! Called from `main` once config and the store catalog are loaded. Rendering
//! is split from printing so output formats can be tested directly.

use clap::Args;
use taskaloop_core::{Coordinates, StoreCatalog};
use taskaloop_pricing::{
    build_shopping_plan, find_best_prices, nearby_stores_with_distance, validate_search,
    ItemPriceResult, ShoppingPlan,
};

/// Shown when a lookup produced nothing the user can act on.
pub(crate) const NO_PRICES_MESSAGE: &str = "No price information found for any of your items";

/// Where to search.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Latitude of the shopper, in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude of the shopper, in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
    /// Search radius in miles (defaults to `TASKALOOP_DEFAULT_RADIUS_MILES`)
    #[arg(long)]
    pub radius: Option<f64>,
}

impl SearchArgs {
    pub(crate) fn location(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    pub(crate) fn radius_or(&self, default_radius_miles: f64) -> f64 {
        self.radius.unwrap_or(default_radius_miles)
    }
}

fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// List catalog stores within the search radius.
///
/// # Errors
///
/// Returns an error if the location or radius is invalid.
pub(crate) fn run_stores(
    catalog: &StoreCatalog,
    search: &SearchArgs,
    default_radius_miles: f64,
) -> anyhow::Result<()> {
    let location = search.location();
    let radius = search.radius_or(default_radius_miles);
    validate_search(location, radius)?;

    let nearby = nearby_stores_with_distance(catalog.stores(), location, radius);
    if nearby.is_empty() {
        println!("No stores within {radius} miles of {location}");
        return Ok(());
    }

    for (store, distance) in nearby {
        println!(
            "{:<24} {:<20} {distance:>6.1} mi  {} items",
            store.name,
            store.id,
            store.items().len()
        );
    }
    Ok(())
}

/// Compare prices for each requested item.
///
/// # Errors
///
/// Returns an error if the request fails validation or JSON encoding fails.
pub(crate) fn run_prices(
    catalog: &StoreCatalog,
    search: &SearchArgs,
    items: &[String],
    json: bool,
    default_radius_miles: f64,
) -> anyhow::Result<()> {
    let results = find_best_prices(
        items,
        search.location(),
        search.radius_or(default_radius_miles),
        catalog.stores(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", render_prices(&results));
    }
    Ok(())
}

/// Build and print a shopping plan for the requested items.
///
/// # Errors
///
/// Returns an error if the request fails validation or JSON encoding fails.
pub(crate) fn run_plan(
    catalog: &StoreCatalog,
    search: &SearchArgs,
    items: &[String],
    json: bool,
    default_radius_miles: f64,
) -> anyhow::Result<()> {
    let results = find_best_prices(
        items,
        search.location(),
        search.radius_or(default_radius_miles),
        catalog.stores(),
    )?;
    let plan = build_shopping_plan(&results);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("{}", render_plan(&plan, &results));
    }
    Ok(())
}

pub(crate) fn render_prices(results: &[ItemPriceResult]) -> String {
    if !results.iter().any(ItemPriceResult::is_priced) {
        return NO_PRICES_MESSAGE.to_string();
    }

    let mut lines = Vec::new();
    for result in results {
        let Some(best) = &result.best_price else {
            lines.push(format!("{}: no nearby store carries this item", result.item));
            continue;
        };

        lines.push(format!(
            "{}: {}/{} at {} (save {} / {:.1}% vs. average)",
            result.item,
            money(best.price),
            best.unit,
            best.store.name,
            money(best.savings.amount),
            best.savings.percentage
        ));
        for other in &result.other_stores {
            lines.push(format!(
                "    {}/{} at {}",
                money(other.price),
                other.unit,
                other.store.name
            ));
        }
    }
    lines.join("\n")
}

pub(crate) fn render_plan(plan: &ShoppingPlan, results: &[ItemPriceResult]) -> String {
    if plan.is_empty() {
        return NO_PRICES_MESSAGE.to_string();
    }

    let mut lines = Vec::new();
    for visit in &plan.store_visits {
        lines.push(format!(
            "{} ({} items, {})",
            visit.store.name,
            visit.items.len(),
            money(visit.total_cost)
        ));
        for item in &visit.items {
            lines.push(format!(
                "  - {} {}/{}",
                item.item,
                money(item.price),
                item.unit
            ));
        }
    }

    let missing: Vec<&str> = results
        .iter()
        .filter(|r| !r.is_priced())
        .map(|r| r.item.as_str())
        .collect();
    if !missing.is_empty() {
        lines.push(format!("Not available nearby: {}", missing.join(", ")));
    }

    lines.push(format!(
        "Total: {} across {} store(s), estimated savings {}",
        money(plan.total_cost()),
        plan.store_count(),
        money(plan.total_savings)
    ));
    lines.join("\n")
}
