//! Single-item best price lookup.

use taskaloop_core::{ItemPrice, Store};

use crate::types::{StorePrice, StoreRef};

/// A store paired with its price for one item.
pub(crate) type Offer<'a> = (&'a Store, &'a ItemPrice);

/// Every store in `stores` carrying `item`, in input order.
pub(crate) fn offers_for<'a>(item: &str, stores: &[&'a Store]) -> Vec<Offer<'a>> {
    stores
        .iter()
        .filter_map(|store| store.price_of(item).map(|price| (*store, price)))
        .collect()
}

/// Lowest-priced offer. Strict `<` keeps the earliest offer on ties.
pub(crate) fn cheapest<'a>(offers: &[Offer<'a>]) -> Option<Offer<'a>> {
    let mut best: Option<Offer<'a>> = None;
    for &(store, price) in offers {
        if best.is_none_or(|(_, current)| price.price < current.price) {
            best = Some((store, price));
        }
    }
    best
}

/// Cheapest store for `item` among `stores`, matching the item name
/// case-insensitively.
///
/// Returns `None` when no store carries the item. On an exact price tie the
/// store that comes first in `stores` wins.
#[must_use]
pub fn find_best_price(item: &str, stores: &[&Store]) -> Option<StorePrice> {
    let offers = offers_for(item, stores);
    cheapest(&offers).map(|(store, price)| StorePrice {
        store: StoreRef::from(store),
        price: price.price,
        unit: price.unit.clone(),
    })
}

#[cfg(test)]
mod tests {
    use taskaloop_core::Coordinates;

    use super::*;

    const HERE: Coordinates = Coordinates::new(40.712_8, -74.006_0);

    fn catalog() -> Vec<Store> {
        vec![
            Store::new("kroger", "Kroger", HERE)
                .with_item("apple", 1.29, "lb")
                .with_item("milk", 3.29, "gallon"),
            Store::new("aldi", "Aldi", HERE)
                .with_item("apple", 0.99, "lb")
                .with_item("milk", 3.29, "gallon"),
            Store::new("walmart", "Walmart", HERE).with_item("apple", 1.19, "lb"),
        ]
    }

    #[test]
    fn picks_lowest_price() {
        let stores = catalog();
        let refs: Vec<&Store> = stores.iter().collect();
        let best = find_best_price("apple", &refs).unwrap();
        assert_eq!(best.store.id, "aldi");
        assert!((best.price - 0.99).abs() < f64::EPSILON);
        assert_eq!(best.unit, "lb");
    }

    #[test]
    fn tie_goes_to_first_store_in_input_order() {
        let stores = catalog();
        let refs: Vec<&Store> = stores.iter().collect();
        assert_eq!(find_best_price("milk", &refs).unwrap().store.id, "kroger");

        let reversed: Vec<&Store> = stores.iter().rev().collect();
        assert_eq!(find_best_price("milk", &reversed).unwrap().store.id, "aldi");
    }

    #[test]
    fn unknown_item_is_none() {
        let stores = catalog();
        let refs: Vec<&Store> = stores.iter().collect();
        assert!(find_best_price("nonexistent-item", &refs).is_none());
    }

    #[test]
    fn empty_store_list_is_none() {
        assert!(find_best_price("apple", &[]).is_none());
    }

    #[test]
    fn matching_ignores_case() {
        let stores = catalog();
        let refs: Vec<&Store> = stores.iter().collect();
        assert_eq!(
            find_best_price("APPLE", &refs),
            find_best_price("apple", &refs)
        );
        assert!(find_best_price("Apple", &refs).is_some());
    }

    #[test]
    fn offers_skip_stores_without_item() {
        let stores = catalog();
        let refs: Vec<&Store> = stores.iter().collect();
        let offers = offers_for("milk", &refs);
        let ids: Vec<_> = offers.iter().map(|(s, _)| s.id.as_str()).collect();
        assert_eq!(ids, vec!["kroger", "aldi"]);
    }
}
