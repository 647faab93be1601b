use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::ConfigError;

/// Catalog compiled into the binary, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../config/stores.yaml"
));

/// Shelf price of one item at one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPrice {
    pub price: f64,
    /// Pricing unit as displayed, e.g. `"lb"`, `"gallon"`, `"dozen"`.
    pub unit: String,
}

/// A store and the items it carries.
///
/// Item keys are stored lowercased; use [`Store::price_of`] for
/// case-insensitive lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    items: BTreeMap<String, ItemPrice>,
}

impl Store {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            items: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) an item price. The item name is lowercased.
    #[must_use]
    pub fn with_item(mut self, item: &str, price: f64, unit: impl Into<String>) -> Self {
        self.items.insert(
            item.to_lowercase(),
            ItemPrice {
                price,
                unit: unit.into(),
            },
        );
        self
    }

    /// Looks up an item's price, ignoring case.
    #[must_use]
    pub fn price_of(&self, item: &str) -> Option<&ItemPrice> {
        self.items.get(&item.to_lowercase())
    }

    /// All items carried, keyed by lowercased name.
    #[must_use]
    pub fn items(&self) -> &BTreeMap<String, ItemPrice> {
        &self.items
    }
}

/// A store as written in the catalog file, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreEntry {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub items: BTreeMap<String, ItemPrice>,
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<StoreEntry>,
}

/// Validated, read-only set of stores in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreCatalog {
    stores: Vec<Store>,
}

impl StoreCatalog {
    /// Build a catalog from already-constructed stores, validating them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any store fails validation.
    pub fn from_stores(stores: Vec<Store>) -> Result<Self, ConfigError> {
        validate_stores(&stores)?;
        Ok(Self { stores })
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text cannot be parsed or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: StoresFile =
            serde_yaml::from_str(content).map_err(ConfigError::CatalogFileParse)?;

        let stores = file
            .stores
            .into_iter()
            .map(store_from_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_stores(stores)
    }

    /// The catalog shipped with the binary (`config/stores.yaml`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only if the bundled file is malformed.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id.eq_ignore_ascii_case(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// Load and validate a store catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<StoreCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    StoreCatalog::from_yaml_str(&content)
}

fn store_from_entry(entry: StoreEntry) -> Result<Store, ConfigError> {
    let mut store = Store::new(entry.id, entry.name, entry.coordinates);
    for (item, price) in entry.items {
        let key = item.to_lowercase();
        if store.items.contains_key(&key) {
            return Err(ConfigError::Validation(format!(
                "store '{}' lists item '{}' more than once",
                store.id, key
            )));
        }
        store.items.insert(key, price);
    }
    Ok(store)
}

fn validate_stores(stores: &[Store]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in stores {
        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store id must be non-empty".to_string(),
            ));
        }

        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' must have a non-empty name",
                store.id
            )));
        }

        if !seen_ids.insert(store.id.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }

        if !store.coordinates.is_valid() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has invalid coordinates {}",
                store.id, store.coordinates
            )));
        }

        for (item, price) in &store.items {
            if item.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "store '{}' has an item with an empty name",
                    store.id
                )));
            }
            if !price.price.is_finite() || price.price < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "store '{}' has invalid price {} for '{}'",
                    store.id, price.price, item
                )));
            }
            if price.unit.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "store '{}' has an empty unit for '{}'",
                    store.id, item
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
