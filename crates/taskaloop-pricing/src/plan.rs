//! Groups best-price assignments into per-store visits.

use std::collections::HashMap;

use crate::types::{ItemPriceResult, PlanItem, ShoppingPlan, StoreVisit};

/// Build a shopping plan with one visit per best-price store.
///
/// Unpriced results are skipped. Visits appear in the order their store
/// first wins an item. `total_savings` is the sum of each item's own
/// savings and does not depend on how items group.
#[must_use]
pub fn build_shopping_plan(results: &[ItemPriceResult]) -> ShoppingPlan {
    let mut store_visits: Vec<StoreVisit> = Vec::new();
    let mut visit_index: HashMap<&str, usize> = HashMap::new();
    let mut total_savings = 0.0;

    for (result, best) in results
        .iter()
        .filter_map(|r| r.best_price.as_ref().map(|b| (r, b)))
    {
        let idx = *visit_index.entry(best.store.id.as_str()).or_insert_with(|| {
            store_visits.push(StoreVisit {
                store: best.store.clone(),
                items: Vec::new(),
                total_cost: 0.0,
            });
            store_visits.len() - 1
        });

        if let Some(visit) = store_visits.get_mut(idx) {
            visit.items.push(PlanItem {
                item: result.item.clone(),
                price: best.price,
                unit: best.unit.clone(),
            });
            visit.total_cost += best.price;
        }

        total_savings += best.savings.amount;
    }

    tracing::debug!(
        stores = store_visits.len(),
        total_savings,
        "built shopping plan"
    );

    ShoppingPlan {
        store_visits,
        total_savings,
    }
}
