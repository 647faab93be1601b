//! Multi-item price comparison with savings accounting.

use taskaloop_core::{Coordinates, Store};

use crate::distance::find_nearby_stores;
use crate::error::ValidationError;
use crate::resolver::{cheapest, offers_for, Offer};
use crate::types::{BestPrice, ItemPriceResult, Savings, StorePrice, StoreRef};

/// Reject malformed requests before any lookup runs.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checking items, then
/// location, then radius.
pub fn validate_request(
    items: &[String],
    user_location: Coordinates,
    radius_miles: f64,
) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyItems);
    }

    if let Some(index) = items.iter().position(|item| item.trim().is_empty()) {
        return Err(ValidationError::BlankItem { index });
    }

    validate_search(user_location, radius_miles)
}

/// Check a search location and radius on their own.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCoordinates`] or
/// [`ValidationError::InvalidRadius`].
pub fn validate_search(
    user_location: Coordinates,
    radius_miles: f64,
) -> Result<(), ValidationError> {
    if !user_location.is_valid() {
        return Err(ValidationError::InvalidCoordinates {
            lat: user_location.lat,
            lng: user_location.lng,
        });
    }

    if !radius_miles.is_finite() || radius_miles < 0.0 {
        return Err(ValidationError::InvalidRadius(radius_miles));
    }

    Ok(())
}

/// Best price, savings and alternatives for each requested item.
///
/// Nearby stores are computed once for the whole batch; when none are in
/// range the result is empty rather than one unpriced entry per item.
/// Results follow `items` order, one per entry, duplicates included.
///
/// # Errors
///
/// Returns [`ValidationError`] for an empty or blank item list, invalid
/// coordinates, or a negative/non-finite radius.
pub fn find_best_prices(
    items: &[String],
    user_location: Coordinates,
    radius_miles: f64,
    stores: &[Store],
) -> Result<Vec<ItemPriceResult>, ValidationError> {
    validate_request(items, user_location, radius_miles)?;

    let nearby = find_nearby_stores(stores, user_location, radius_miles);
    if nearby.is_empty() {
        tracing::debug!(
            location = %user_location,
            radius_miles,
            "no stores within radius"
        );
        return Ok(Vec::new());
    }

    tracing::debug!(
        items = items.len(),
        nearby = nearby.len(),
        radius_miles,
        "comparing prices"
    );

    Ok(items
        .iter()
        .map(|item| price_item(item, &nearby))
        .collect())
}

fn price_item(item: &str, nearby: &[&Store]) -> ItemPriceResult {
    let offers = offers_for(item, nearby);

    let Some((best_store, best)) = cheapest(&offers) else {
        tracing::debug!(item, "no nearby store carries item");
        return ItemPriceResult {
            item: item.to_string(),
            best_price: None,
            other_stores: Vec::new(),
        };
    };

    let savings = savings_against_average(best.price, &offers);

    let other_stores = offers
        .iter()
        .filter(|(store, _)| !std::ptr::eq(*store, best_store))
        .map(|(store, price)| StorePrice {
            store: StoreRef::from(*store),
            price: price.price,
            unit: price.unit.clone(),
        })
        .collect();

    tracing::debug!(
        item,
        store_id = %best_store.id,
        price = best.price,
        savings = savings.amount,
        "resolved best price"
    );

    ItemPriceResult {
        item: item.to_string(),
        best_price: Some(BestPrice {
            price: best.price,
            unit: best.unit.clone(),
            store: StoreRef::from(best_store),
            savings,
        }),
        other_stores,
    }
}

/// Savings of `best_price` against the mean of every offer, the best one
/// included. `offers` must be non-empty.
fn savings_against_average(best_price: f64, offers: &[Offer<'_>]) -> Savings {
    let total: f64 = offers.iter().map(|(_, price)| price.price).sum();
    #[allow(clippy::cast_precision_loss)]
    let average = total / offers.len() as f64;

    // Rounding in the mean must not produce a negative saving.
    let amount = (average - best_price).max(0.0);
    let percentage = if average > 0.0 {
        amount / average * 100.0
    } else {
        0.0
    };

    Savings { amount, percentage }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERE: Coordinates = Coordinates::new(40.712_8, -74.006_0);
    const BOSTON: Coordinates = Coordinates::new(42.360_1, -71.058_9);

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    fn catalog() -> Vec<Store> {
        vec![
            Store::new("kroger", "Kroger", HERE)
                .with_item("apple", 1.29, "lb")
                .with_item("bread", 2.29, "loaf"),
            Store::new("aldi", "Aldi", HERE)
                .with_item("apple", 0.99, "lb")
                .with_item("eggs", 2.49, "dozen"),
            Store::new("walmart", "Walmart", HERE).with_item("apple", 1.19, "lb"),
            Store::new("far-away", "Far Away", BOSTON).with_item("apple", 0.10, "lb"),
        ]
    }

    #[test]
    fn apple_scenario_matches_documented_numbers() {
        let results = find_best_prices(&items(&["apple"]), HERE, 10.0, &catalog()).unwrap();
        assert_eq!(results.len(), 1);

        let best = results[0].best_price.as_ref().unwrap();
        assert_eq!(best.store.id, "aldi");
        assert!((best.price - 0.99).abs() < 1e-12);

        let average = (1.29 + 0.99 + 1.19) / 3.0;
        assert!((best.savings.amount - (average - 0.99)).abs() < 1e-12);
        assert!((best.savings.amount - 0.1667).abs() < 1e-4);
        assert!((best.savings.percentage - 14.41).abs() < 1e-2);

        let others: Vec<_> = results[0]
            .other_stores
            .iter()
            .map(|s| s.store.id.as_str())
            .collect();
        assert_eq!(others, vec!["kroger", "walmart"]);
    }

    #[test]
    fn out_of_range_store_is_ignored() {
        let results = find_best_prices(&items(&["apple"]), HERE, 10.0, &catalog()).unwrap();
        let best = results[0].best_price.as_ref().unwrap();
        assert_ne!(best.store.id, "far-away");
        assert!(results[0]
            .other_stores
            .iter()
            .all(|s| s.store.id != "far-away"));
    }

    #[test]
    fn single_carrier_has_zero_savings() {
        let results = find_best_prices(&items(&["eggs"]), HERE, 10.0, &catalog()).unwrap();
        let best = results[0].best_price.as_ref().unwrap();
        assert_eq!(best.store.id, "aldi");
        assert!(best.savings.amount.abs() < f64::EPSILON);
        assert!(best.savings.percentage.abs() < f64::EPSILON);
        assert!(results[0].other_stores.is_empty());
    }

    #[test]
    fn uncarried_item_has_no_best_price() {
        let results =
            find_best_prices(&items(&["apple", "caviar"]), HERE, 10.0, &catalog()).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].item, "caviar");
        assert!(results[1].best_price.is_none());
        assert!(results[1].other_stores.is_empty());
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let results = find_best_prices(
            &items(&["bread", "Apple", "bread"]),
            HERE,
            10.0,
            &catalog(),
        )
        .unwrap();
        let names: Vec<_> = results.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(names, vec!["bread", "Apple", "bread"]);
        assert_eq!(results[0], results[2]);
        assert!(results[1].is_priced());
    }

    #[test]
    fn no_nearby_stores_returns_empty_batch() {
        let results = find_best_prices(&items(&["apple"]), HERE, 0.0, &catalog()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn zero_radius_includes_store_at_exact_location() {
        let stores = vec![Store::new("here", "Here", HERE).with_item("apple", 1.0, "lb")];
        let results = find_best_prices(&items(&["apple"]), HERE, 0.0, &stores).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_priced());
    }

    #[test]
    fn tied_prices_exclude_only_the_winner() {
        let stores = vec![
            Store::new("a", "A", HERE).with_item("milk", 3.0, "gallon"),
            Store::new("b", "B", HERE).with_item("milk", 3.0, "gallon"),
        ];
        let results = find_best_prices(&items(&["milk"]), HERE, 1.0, &stores).unwrap();
        let best = results[0].best_price.as_ref().unwrap();
        assert_eq!(best.store.id, "a");
        assert_eq!(results[0].other_stores.len(), 1);
        assert_eq!(results[0].other_stores[0].store.id, "b");
        assert!(best.savings.amount.abs() < f64::EPSILON);
    }

    #[test]
    fn duplicate_store_ids_stay_in_other_stores() {
        let stores = vec![
            Store::new("dup", "Corner Shop", HERE).with_item("milk", 2.50, "gallon"),
            Store::new("dup", "Corner Shop Annex", HERE).with_item("milk", 3.10, "gallon"),
        ];
        let results = find_best_prices(&items(&["milk"]), HERE, 1.0, &stores).unwrap();
        let best = results[0].best_price.as_ref().unwrap();
        assert_eq!(best.store.name, "Corner Shop");
        assert_eq!(results[0].other_stores.len(), 1);
        assert_eq!(results[0].other_stores[0].store.name, "Corner Shop Annex");
    }

    #[test]
    fn free_items_report_zero_percentage() {
        let stores = vec![
            Store::new("a", "A", HERE).with_item("sample", 0.0, "each"),
            Store::new("b", "B", HERE).with_item("sample", 0.0, "each"),
        ];
        let results = find_best_prices(&items(&["sample"]), HERE, 1.0, &stores).unwrap();
        let savings = results[0].best_price.as_ref().unwrap().savings;
        assert!(savings.percentage.abs() < f64::EPSILON);
        assert!(!savings.percentage.is_nan());
    }

    #[test]
    fn rejects_empty_item_list() {
        let err = find_best_prices(&[], HERE, 10.0, &catalog()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyItems);
    }

    #[test]
    fn rejects_blank_item() {
        let err = find_best_prices(&items(&["apple", "  "]), HERE, 10.0, &catalog()).unwrap_err();
        assert_eq!(err, ValidationError::BlankItem { index: 1 });
    }

    #[test]
    fn rejects_nan_coordinates() {
        let bad = Coordinates::new(f64::NAN, -74.0);
        let err = find_best_prices(&items(&["apple"]), bad, 10.0, &catalog()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCoordinates { .. }));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let bad = Coordinates::new(40.0, 200.0);
        let err = find_best_prices(&items(&["apple"]), bad, 10.0, &catalog()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCoordinates { .. }));
    }

    #[test]
    fn rejects_negative_radius() {
        let err = find_best_prices(&items(&["apple"]), HERE, -1.0, &catalog()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidRadius(-1.0));
    }

    #[test]
    fn rejects_nan_radius() {
        let err = find_best_prices(&items(&["apple"]), HERE, f64::NAN, &catalog()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRadius(r) if r.is_nan()));
    }

    #[test]
    fn empty_catalog_is_not_an_error() {
        let results = find_best_prices(&items(&["apple"]), HERE, 10.0, &[]).unwrap();
        assert!(results.is_empty());
    }
}
