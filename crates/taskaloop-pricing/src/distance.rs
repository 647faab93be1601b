//! Nearby-store lookup by great-circle distance.

use taskaloop_core::{Coordinates, Store};

/// Stores within `radius_miles` of `user_location`, boundary inclusive.
///
/// Preserves catalog order. `NaN` coordinates or radius match nothing.
#[must_use]
pub fn find_nearby_stores(
    stores: &[Store],
    user_location: Coordinates,
    radius_miles: f64,
) -> Vec<&Store> {
    nearby_stores_with_distance(stores, user_location, radius_miles)
        .into_iter()
        .map(|(store, _)| store)
        .collect()
}

/// Same filter as [`find_nearby_stores`], keeping each store's distance.
#[must_use]
pub fn nearby_stores_with_distance(
    stores: &[Store],
    user_location: Coordinates,
    radius_miles: f64,
) -> Vec<(&Store, f64)> {
    stores
        .iter()
        .map(|store| (store, user_location.distance_miles(&store.coordinates)))
        .filter(|(_, distance)| *distance <= radius_miles)
        .collect()
}
