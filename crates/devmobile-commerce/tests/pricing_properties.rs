//! Property tests for cart pricing.

use devmobile_commerce::prelude::*;
use proptest::prelude::*;

fn line(id: usize, cents: i64) -> NewLineItem {
    NewLineItem::new(format!("p{id}"), format!("Product {id}"), Money::new(cents, Currency::EUR), "")
}

fn lines() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..500_000, 1i64..20), 0..8)
}

fn cart_from(lines: &[(i64, i64)], promo: bool) -> CartEngine<MemoryCartRepository> {
    let mut cart = CartEngine::load(MemoryCartRepository::new());
    for (i, (cents, qty)) in lines.iter().enumerate() {
        cart.add(line(i, *cents), *qty);
    }
    if promo {
        cart.apply_promo_code("PROMO10");
    }
    cart
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    /// Adding a product in several steps sums the quantities.
    #[test]
    fn test_repeated_adds_sum(cents in 0i64..500_000, qtys in prop::collection::vec(1i64..50, 1..10)) {
        let mut cart = CartEngine::load(MemoryCartRepository::new());
        for qty in &qtys {
            cart.add(line(0, cents), *qty);
        }
        prop_assert_eq!(cart.items().len(), 1);
        prop_assert_eq!(cart.item_count(), qtys.iter().sum::<i64>());
    }

    /// The total is exactly the sum of its rounded components.
    #[test]
    fn test_total_identity(lines in lines(), promo in any::<bool>(), express in any::<bool>()) {
        let mut cart = cart_from(&lines, promo);
        if express {
            cart.set_shipping_method(ShippingMethod::Express);
        }
        let p = cart.pricing();
        prop_assert_eq!(
            p.grand_total.amount_cents,
            p.subtotal.amount_cents - p.discount_total.amount_cents
                + p.shipping_total.amount_cents
                + p.tax_total.amount_cents
        );
        prop_assert_eq!(p.grand_total, cart.total());
    }

    /// Tax and discount never go negative and the discount never exceeds the subtotal.
    #[test]
    fn test_components_bounded(lines in lines(), promo in any::<bool>()) {
        let cart = cart_from(&lines, promo);
        prop_assert!(!cart.tax().is_negative());
        prop_assert!(!cart.discount().is_negative());
        prop_assert!(cart.discount().amount_cents <= cart.subtotal().amount_cents);
    }

    /// Line order does not change any total.
    #[test]
    fn test_order_independent(lines in lines(), promo in any::<bool>()) {
        let forward = cart_from(&lines, promo);

        let mut reversed = CartEngine::load(MemoryCartRepository::new());
        for (i, (cents, qty)) in lines.iter().enumerate().rev() {
            reversed.add(line(i, *cents), *qty);
        }
        if promo {
            reversed.apply_promo_code("PROMO10");
        }

        prop_assert_eq!(forward.pricing().grand_total, reversed.pricing().grand_total);
        prop_assert_eq!(forward.tax(), reversed.tax());
    }

    /// A stored cart reloads to the same pricing.
    #[test]
    fn test_reload_preserves_pricing(lines in lines(), promo in any::<bool>()) {
        let repo = MemoryCartRepository::new();
        let mut cart = CartEngine::load(repo.clone());
        for (i, (cents, qty)) in lines.iter().enumerate() {
            cart.add(line(i, *cents), *qty);
        }
        if promo {
            cart.apply_promo_code("PROMO10");
        }

        let reloaded = CartEngine::load(repo);
        prop_assert_eq!(reloaded.pricing(), cart.pricing());
    }
}
