/// Cart store behaviour against real storage.
///
/// These tests go through the public API only and use a `FileStore` in a
/// temporary directory, so state survives the store being dropped and
/// reopened the way it does across application restarts.
use std::time::Duration;

use storefront_cache::{Cache, FileStore};
use storefront_commerce::cart::CART_STORAGE_KEY;
use storefront_commerce::prelude::*;

fn product(id: i64, title: &str, cents: i64) -> Product {
    Product::new(id, title, Money::usd(cents), "electronics", "p.png")
}

fn file_cache(dir: &tempfile::TempDir) -> Cache {
    Cache::new(FileStore::open(dir.path()).unwrap())
}

#[test]
fn add_update_remove_scenario() {
    let store = CartStore::open(Cache::in_memory(), CartStoreConfig::default());
    let p = product(1, "Widget", 1000);

    store.add_to_cart(&p, 1);
    assert_eq!(store.cart_count(), 1);

    store.add_to_cart(&p, 2);
    assert_eq!(store.lines().len(), 1);
    assert_eq!(store.line(ProductId::new(1)).unwrap().quantity, 3);
    assert_eq!(store.cart_total(), Money::usd(3000));
    assert_eq!(store.cart_total().display(), "$30.00");

    store.update_quantity(ProductId::new(1), 1);
    assert_eq!(store.cart_total(), Money::usd(1000));

    store.remove_from_cart(ProductId::new(1));
    assert_eq!(store.cart_count(), 0);
    assert_eq!(store.cart_total(), Money::zero(Currency::USD));
    assert!(store.is_empty());
}

#[test]
fn distinct_products_keep_insertion_order() {
    let store = CartStore::open(Cache::in_memory(), CartStoreConfig::default());
    store.add_to_cart(&product(20, "Shirt", 1299), 2);
    store.add_to_cart(&product(5, "Ring", 69500), 1);
    store.add_to_cart(&product(9, "Drive", 6400), 4);

    let ids: Vec<i64> = store.lines().iter().map(|l| l.id().as_i64()).collect();
    assert_eq!(ids, vec![20, 5, 9]);
    assert_eq!(store.cart_count(), 7);
    assert_eq!(store.cart_total(), Money::usd(2 * 1299 + 69500 + 4 * 6400));
}

#[test]
fn cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = CartStore::open(file_cache(&dir), CartStoreConfig::default());
        store.add_to_cart(&product(1, "Widget", 1000), 2);
        store.add_to_cart(&product(2, "Gadget", 250), 1);
        store.set_cart_open(true);
    }

    let store = CartStore::open(file_cache(&dir), CartStoreConfig::default());
    assert_eq!(store.cart_count(), 3);
    assert_eq!(store.cart_total(), Money::usd(2250));
    assert_eq!(
        store.line(ProductId::new(2)).unwrap().product.title,
        "Gadget"
    );

    // Panel state and notifications are not persisted.
    assert!(!store.is_cart_open());
    assert!(!store.notification().is_visible);
}

#[test]
fn corrupted_storage_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), b"{ definitely not a cart").unwrap();

    let store = CartStore::open(file_cache(&dir), CartStoreConfig::default());
    assert!(store.is_empty());

    store.add_to_cart(&product(3, "Lamp", 4500), 1);
    let reopened = CartStore::open(file_cache(&dir), CartStoreConfig::default());
    assert_eq!(reopened.cart_count(), 1);
}

#[test]
fn sub_cent_price_is_not_rounded_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let saved = r#"[{"id":1,"title":"Bolt","price":0.125,"category":"hardware","image":"b.png","quantity":8}]"#;
    let path = dir.path().join("cart.json");
    std::fs::write(&path, saved).unwrap();

    let store = CartStore::open(file_cache(&dir), CartStoreConfig::default());
    assert!(store.is_empty());
    assert_eq!(store.cart_total(), Money::zero(Currency::USD));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), saved);

    store.add_to_cart(&product(2, "Nut", 5), 1);
    let stored = std::fs::read_to_string(&path).unwrap();
    assert!(!stored.contains("0.13"), "{stored}");
    assert_eq!(
        CartStore::open(file_cache(&dir), CartStoreConfig::default()).cart_total(),
        Money::usd(5)
    );
}

#[test]
fn stored_format_is_a_line_list() {
    let cache = Cache::in_memory();
    let store = CartStore::open(cache.clone(), CartStoreConfig::default());
    store.add_to_cart(&product(7, "Cable", 1999), 2);

    let stored: serde_json::Value = cache.get(CART_STORAGE_KEY).unwrap().unwrap();
    let lines = stored.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["id"], 7);
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["price"], 19.99);
}

#[test]
fn clear_persists_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = CartStore::open(file_cache(&dir), CartStoreConfig::default());
    store.add_to_cart(&product(1, "Widget", 1000), 1);
    store.clear_cart();

    let reopened = CartStore::open(file_cache(&dir), CartStoreConfig::default());
    assert!(reopened.is_empty());
    assert_eq!(store.notification().message, "Your cart has been cleared");
}

#[tokio::test(start_paused = true)]
async fn notification_hides_after_ttl() {
    let config = CartStoreConfig {
        notification_ttl: Duration::from_secs(3),
        ..CartStoreConfig::default()
    };
    let store = CartStore::open(Cache::in_memory(), config);
    store.add_to_cart(&product(1, "Widget", 1000), 1);
    assert!(store.notification().is_visible);

    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert!(store.notification().is_visible);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!store.notification().is_visible);
}
