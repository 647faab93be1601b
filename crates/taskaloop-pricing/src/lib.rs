//! Price comparison and shopping-plan engine for TaskaLoop.
//!
//! Given a shopping list, a location and a store catalog, finds the cheapest
//! nearby store per item, reports savings against the local average, and
//! groups the winners into a per-store shopping plan. Also keeps a history
//! of observed prices.
//!
//! Everything here is synchronous and operates on borrowed, read-only
//! catalog data.

pub mod aggregate;
pub mod distance;
pub mod error;
pub mod history;
pub mod plan;
pub mod resolver;
pub mod types;

pub use aggregate::{find_best_prices, validate_request, validate_search};
pub use distance::{find_nearby_stores, nearby_stores_with_distance};
pub use error::{PricingError, ValidationError};
pub use history::{PriceHistory, PriceObservation, PriceTrend};
pub use plan::build_shopping_plan;
pub use resolver::find_best_price;
pub use types::{
    BestPrice, ItemPriceResult, PlanItem, Savings, ShoppingPlan, StorePrice, StoreRef, StoreVisit,
};
