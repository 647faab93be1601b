use std::path::Path;

use super::*;

fn here() -> Coordinates {
    Coordinates::new(40.712_8, -74.006_0)
}

#[test]
fn with_item_lowercases_key() {
    let store = Store::new("aldi", "Aldi", here()).with_item("Apple", 0.99, "lb");
    assert!(store.items().contains_key("apple"));
    assert!(!store.items().contains_key("Apple"));
}

#[test]
fn price_of_ignores_case() {
    let store = Store::new("aldi", "Aldi", here()).with_item("apple", 0.99, "lb");
    assert_eq!(store.price_of("APPLE"), store.price_of("apple"));
    assert_eq!(store.price_of("ApPlE").map(|p| p.price), Some(0.99));
    assert!(store.price_of("apple").is_some());
    assert!(store.price_of("pear").is_none());
}

#[test]
fn from_yaml_str_parses_stores_in_file_order() {
    let yaml = r"
stores:
  - id: kroger
    name: Kroger
    coordinates: { lat: 40.73, lng: -73.93 }
    items:
      Apple: { price: 1.29, unit: lb }
  - id: aldi
    name: Aldi
    coordinates: { lat: 40.70, lng: -73.99 }
";
    let catalog = StoreCatalog::from_yaml_str(yaml).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.stores()[0].id, "kroger");
    assert_eq!(catalog.stores()[1].id, "aldi");
    assert_eq!(
        catalog.stores()[0].price_of("apple").map(|p| p.price),
        Some(1.29)
    );
    assert!(catalog.stores()[1].items().is_empty());
}

#[test]
fn from_yaml_str_rejects_malformed_yaml() {
    let err = StoreCatalog::from_yaml_str("stores: [ {").unwrap_err();
    assert!(matches!(err, ConfigError::CatalogFileParse(_)));
}

#[test]
fn from_yaml_str_rejects_case_duplicate_items() {
    let yaml = r"
stores:
  - id: kroger
    name: Kroger
    coordinates: { lat: 40.73, lng: -73.93 }
    items:
      Apple: { price: 1.29, unit: lb }
      apple: { price: 1.09, unit: lb }
";
    let err = StoreCatalog::from_yaml_str(yaml).unwrap_err();
    assert!(err.to_string().contains("more than once"), "got: {err}");
}

#[test]
fn validate_rejects_duplicate_store_id() {
    let stores = vec![
        Store::new("Aldi", "Aldi", here()),
        Store::new("aldi", "Aldi Downtown", here()),
    ];
    let err = StoreCatalog::from_stores(stores).unwrap_err();
    assert!(err.to_string().contains("duplicate store id"));
}

#[test]
fn validate_rejects_empty_id() {
    let err = StoreCatalog::from_stores(vec![Store::new(" ", "Aldi", here())]).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_empty_name() {
    let err = StoreCatalog::from_stores(vec![Store::new("aldi", "", here())]).unwrap_err();
    assert!(err.to_string().contains("non-empty name"));
}

#[test]
fn validate_rejects_out_of_range_coordinates() {
    let store = Store::new("aldi", "Aldi", Coordinates::new(123.0, 0.0));
    let err = StoreCatalog::from_stores(vec![store]).unwrap_err();
    assert!(err.to_string().contains("invalid coordinates"));
}

#[test]
fn validate_rejects_negative_price() {
    let store = Store::new("aldi", "Aldi", here()).with_item("apple", -0.5, "lb");
    let err = StoreCatalog::from_stores(vec![store]).unwrap_err();
    assert!(err.to_string().contains("invalid price"));
}

#[test]
fn validate_rejects_nan_price() {
    let store = Store::new("aldi", "Aldi", here()).with_item("apple", f64::NAN, "lb");
    let err = StoreCatalog::from_stores(vec![store]).unwrap_err();
    assert!(err.to_string().contains("invalid price"));
}

#[test]
fn validate_rejects_empty_unit() {
    let store = Store::new("aldi", "Aldi", here()).with_item("apple", 0.99, "");
    let err = StoreCatalog::from_stores(vec![store]).unwrap_err();
    assert!(err.to_string().contains("empty unit"));
}

#[test]
fn validate_accepts_free_item() {
    let store = Store::new("aldi", "Aldi", here()).with_item("sample", 0.0, "each");
    assert!(StoreCatalog::from_stores(vec![store]).is_ok());
}

#[test]
fn get_matches_id_ignoring_case() {
    let catalog = StoreCatalog::from_stores(vec![Store::new("aldi-1", "Aldi", here())]).unwrap();
    assert_eq!(catalog.get("ALDI-1").map(|s| s.name.as_str()), Some("Aldi"));
    assert!(catalog.get("kroger").is_none());
}

#[test]
fn builtin_catalog_loads() {
    let catalog = StoreCatalog::builtin().expect("bundled catalog must be valid");
    assert!(!catalog.is_empty());
    assert!(catalog.stores().iter().any(|s| s.price_of("apple").is_some()));
}

#[test]
fn load_catalog_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("stores.yaml");
    assert!(path.exists(), "stores.yaml missing at {path:?}");
    let catalog = load_catalog(&path).expect("failed to load stores.yaml");
    assert_eq!(catalog, StoreCatalog::builtin().unwrap());
}

#[test]
fn load_catalog_missing_file_is_io_error() {
    let err = load_catalog(Path::new("/definitely/not/here/stores.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::CatalogFileIo { ref path, .. } if path.ends_with("stores.yaml")),
        "expected CatalogFileIo, got: {err:?}"
    );
}
