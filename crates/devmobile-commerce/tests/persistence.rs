//! Persistence and cross-tab behavior of the cart engine.

use devmobile_cache::Cache;
use devmobile_commerce::cart::STORAGE_KEY;
use devmobile_commerce::prelude::*;

fn case() -> NewLineItem {
    NewLineItem::new("case", "Clear Case", Money::new(2999, Currency::EUR), "")
}

#[test]
fn test_cart_survives_restart() {
    let repo = MemoryCartRepository::new();
    {
        let mut cart = CartEngine::load(repo.clone());
        cart.add(case(), 2);
        cart.apply_promo_code("PROMO10");
        cart.set_shipping_method(ShippingMethod::Express);
    }

    let cart = CartEngine::load(repo);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.items()[0].unit_price.amount_cents, 2999);
    assert_eq!(cart.promo_code(), Some("PROMO10"));
    assert_eq!(cart.shipping_method(), ShippingMethod::Express);
}

#[test]
fn test_file_backed_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let cache = Cache::open_dir(dir.path()).unwrap();
        let mut cart = CartEngine::load(CacheCartRepository::new(cache));
        cart.add(case(), 3);
    }

    let cache = Cache::open_dir(dir.path()).unwrap();
    let cart = CartEngine::load(CacheCartRepository::new(cache));
    assert_eq!(cart.item_count(), 3);
    assert!(dir.path().join(format!("{STORAGE_KEY}.json")).exists());
}

#[test]
fn test_reads_legacy_document() {
    let repo = MemoryCartRepository::with_raw(
        r#"{"state":{"items":[{"productId":"case","title":"Clear Case","price":29.99,"qty":2,"image":"/c.jpg"}],"promoCode":"PROMO10","shipping":"standard"},"version":0}"#,
    );

    let cart = CartEngine::load(repo);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.subtotal().amount_cents, 5998);
    assert_eq!(cart.items()[0].image_url, "/c.jpg");
    assert_eq!(cart.promo_code(), Some("PROMO10"));
}

#[test]
fn test_unknown_shipping_method_does_not_empty_cart() {
    let repo = MemoryCartRepository::with_raw(
        r#"{"state":{"items":[{"productId":"case","title":"Clear Case","unitPrice":29.99,"quantity":2}],"shippingMethod":"overnight"},"version":2}"#,
    );

    let cart = CartEngine::load(repo);
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.shipping_method(), ShippingMethod::Standard);
    assert_eq!(cart.shipping_total().amount_cents, 650);
}

#[test]
fn test_invalid_lines_are_dropped_on_load() {
    let repo = MemoryCartRepository::with_raw(
        r#"{"state":{"items":[
            {"productId":"a","title":"A","unitPrice":10.0,"quantity":0},
            {"productId":"b","title":"B","unitPrice":10.0,"quantity":1},
            {"productId":"b","title":"B again","unitPrice":99.0,"quantity":2}
        ]},"version":1}"#,
    );

    let cart = CartEngine::load(repo);
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].title, "B");
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn test_corrupt_document_starts_empty_and_is_overwritten() {
    let repo = MemoryCartRepository::with_raw("definitely not json");
    let mut cart = CartEngine::load(repo.clone());
    assert!(cart.is_empty());

    cart.add(case(), 1);
    let reopened = CartEngine::load(repo);
    assert_eq!(reopened.item_count(), 1);
}

#[test]
fn test_two_tabs_last_writer_wins() {
    let repo = MemoryCartRepository::new();
    let mut tab_a = CartEngine::load(repo.clone());
    let mut tab_b = CartEngine::load(repo.clone());

    tab_a.add(case(), 1);
    tab_b.set_shipping_method(ShippingMethod::Express);

    // tab_b never saw tab_a's item and overwrote it.
    assert!(tab_a.handle_storage_change(STORAGE_KEY));
    assert!(tab_a.is_empty());
    assert_eq!(tab_a.shipping_method(), ShippingMethod::Express);
}

#[test]
fn test_checkout_clears_stored_cart() {
    let repo = MemoryCartRepository::new();
    let mut cart = CartEngine::load(repo.clone());
    cart.add(case(), 1);

    let details = CheckoutDetails {
        email: "grace@example.com".to_string(),
        shipping_address: Address::new("Grace", "Hopper", "Main St 5", "Munich", "80331", "Germany"),
        payment_method: PaymentMethod::Paypal,
    };
    let receipt = cart.submit_order(details).unwrap();
    assert!(receipt.id.as_str().starts_with("DM-"));
    assert_eq!(receipt.line_items.len(), 1);

    assert!(CartEngine::load(repo).is_empty());
}
