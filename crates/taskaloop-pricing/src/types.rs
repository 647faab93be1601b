use serde::{Deserialize, Serialize};
use taskaloop_core::Store;

/// Identity of a store as carried in results, detached from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: String,
    pub name: String,
}

impl From<&Store> for StoreRef {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name.clone(),
        }
    }
}

/// One store's price for an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePrice {
    pub store: StoreRef,
    pub price: f64,
    pub unit: String,
}

/// Best price measured against the average across every nearby store
/// carrying the item (the best store included).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPrice {
    pub price: f64,
    pub unit: String,
    pub store: StoreRef,
    pub savings: Savings,
}

/// Price comparison outcome for a single requested item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPriceResult {
    /// The item exactly as requested.
    pub item: String,
    /// `None` when no nearby store carries the item.
    pub best_price: Option<BestPrice>,
    /// Every other nearby store carrying the item, in catalog order.
    pub other_stores: Vec<StorePrice>,
}

impl ItemPriceResult {
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.best_price.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub item: String,
    pub price: f64,
    pub unit: String,
}

/// Items to buy at one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreVisit {
    pub store: StoreRef,
    pub items: Vec<PlanItem>,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoppingPlan {
    pub store_visits: Vec<StoreVisit>,
    pub total_savings: f64,
}

impl ShoppingPlan {
    /// Sum of every visit's `total_cost`.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.store_visits.iter().map(|v| v.total_cost).sum()
    }

    #[must_use]
    pub fn store_count(&self) -> usize {
        self.store_visits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store_visits.is_empty()
    }

    #[must_use]
    pub fn visit_for(&self, store_id: &str) -> Option<&StoreVisit> {
        self.store_visits.iter().find(|v| v.store.id == store_id)
    }
}
