use repair_shop_api::domain::cart::{Cart, CartProduct, CartSnapshot, SnapshotLine};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn product(price: Decimal, stock: i32) -> CartProduct {
    CartProduct {
        id: Uuid::new_v4(),
        name: "Capinha".into(),
        sale_price: price,
        stock_quantity: stock,
        image_url: None,
    }
}

#[test]
fn adding_past_stock_clamps() {
    let case = product(dec!(49.90), 3);
    let mut cart = Cart::new();

    for _ in 0..4 {
        cart.add(case.clone(), 1);
    }

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 3);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn new_line_is_capped_at_stock() {
    let charger = product(dec!(89.90), 2);
    let mut cart = Cart::new();
    cart.add(charger, 5);

    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), dec!(179.80));
}

#[test]
fn out_of_stock_product_is_not_added() {
    let mut cart = Cart::new();
    cart.add(product(dec!(10.00), 0), 1);
    assert!(cart.is_empty());
}

#[test]
fn update_to_zero_removes_the_line() {
    let film = product(dec!(30.00), 10);
    let mut cart = Cart::new();
    cart.add(film.clone(), 2);

    cart.update_quantity(film.id, 7);
    assert_eq!(cart.item_count(), 7);

    cart.update_quantity(film.id, 20);
    assert_eq!(cart.item_count(), 10);

    cart.update_quantity(film.id, 0);
    assert!(cart.is_empty());
}

#[test]
fn totals_span_all_lines() {
    let a = product(dec!(30.00), 10);
    let b = product(dec!(12.50), 10);
    let mut cart = Cart::new();
    cart.add(a.clone(), 2);
    cart.add(b, 3);

    assert_eq!(cart.total(), dec!(97.50));
    assert_eq!(cart.item_count(), 5);

    cart.remove(a.id);
    assert_eq!(cart.total(), dec!(37.50));

    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn snapshot_survives_json() {
    let a = product(dec!(30.00), 10);
    let mut cart = Cart::new();
    cart.add(a.clone(), 2);

    let raw = cart.snapshot().to_json();
    let restored = CartSnapshot::from_json(&raw);

    assert_eq!(
        restored.items,
        vec![SnapshotLine {
            product_id: a.id,
            quantity: 2
        }]
    );
}

#[test]
fn corrupt_snapshot_restores_empty() {
    assert_eq!(CartSnapshot::from_json("not json"), CartSnapshot::default());
    assert_eq!(CartSnapshot::from_json("{\"items\": 3}"), CartSnapshot::default());
}

#[test]
fn hydrate_drops_unknown_products_and_clamps_stock() {
    let known = product(dec!(15.00), 2);
    let snapshot = CartSnapshot {
        items: vec![
            SnapshotLine {
                product_id: known.id,
                quantity: 5,
            },
            SnapshotLine {
                product_id: Uuid::new_v4(),
                quantity: 1,
            },
            SnapshotLine {
                product_id: known.id,
                quantity: -1,
            },
        ],
    };

    let cart = Cart::hydrate(&snapshot, |id| (id == known.id).then(|| known.clone()));

    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.total(), dec!(30.00));
}
