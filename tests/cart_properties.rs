//! Property-based tests for the cart
//!
//! Invariants that must hold for any sequence of edits, not just the scenarios in the unit
//! tests.

use order_desk::cart::{round_money, Cart, TaxPolicy};
use order_desk::model::{Product, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;

fn product(id: u32, cents: i64, stock: u32) -> Product {
    Product {
        id: ProductId(id),
        code: format!("P-{id}"),
        name: format!("Product {id}"),
        unit_price: Decimal::new(cents, 2),
        stock,
        min_stock: 0,
        unit: "unit".to_string(),
        shortfall: 0,
    }
}

#[derive(Debug, Clone)]
enum Edit {
    Add(u32, i64),
    Remove(u32),
    SetQuantity(u32, i64),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (1..6u32, -3..50i64).prop_map(|(id, q)| Edit::Add(id, q)),
        (1..6u32).prop_map(Edit::Remove),
        (1..6u32, -3..50i64).prop_map(|(id, q)| Edit::SetQuantity(id, q)),
    ]
}

fn apply(cart: &mut Cart, edit: &Edit) {
    match *edit {
        Edit::Add(id, q) => {
            let _ = cart.add_line(&product(id, 199 + i64::from(id), 20), q);
        }
        Edit::Remove(id) => cart.remove_line(ProductId(id)),
        Edit::SetQuantity(id, q) => {
            let _ = cart.set_quantity(ProductId(id), q);
        }
    }
}

proptest! {
    /// Property: no two lines ever share a product, and every quantity stays positive
    #[test]
    fn test_lines_stay_unique_and_positive(edits in prop::collection::vec(edit(), 0..40)) {
        let mut cart = Cart::default();
        for e in &edits {
            apply(&mut cart, e);
        }

        let ids: HashSet<_> = cart.lines().iter().map(|l| l.product_id).collect();
        prop_assert_eq!(ids.len(), cart.len());
        prop_assert!(cart.lines().iter().all(|l| l.quantity > 0));
    }

    /// Property: totals always match the lines, and recomputing changes nothing
    #[test]
    fn test_totals_track_lines(edits in prop::collection::vec(edit(), 0..40)) {
        let mut cart = Cart::new(TaxPolicy::Rate(Decimal::new(18, 2)));
        for e in &edits {
            apply(&mut cart, e);
        }

        let subtotal = round_money(cart.lines().iter().map(|l| l.subtotal()).sum());
        let totals = cart.totals();
        prop_assert_eq!(totals.subtotal, subtotal);
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax);

        prop_assert_eq!(cart.compute_totals(), totals);
        prop_assert_eq!(cart.compute_totals(), cart.compute_totals());
    }

    /// Property: adding q1 then q2 is one line of q1 + q2 at the first price
    #[test]
    fn test_merge_law(q1 in 1..1000i64, q2 in 1..1000i64, cents in 1..100_000i64) {
        let mut cart = Cart::new(TaxPolicy::Exempt);
        let first = product(1, cents, 5);
        cart.add_line(&first, q1).unwrap();
        cart.add_line(&product(1, cents + 1, 5), q2).unwrap();

        prop_assert_eq!(cart.len(), 1);
        let line = &cart.lines()[0];
        prop_assert_eq!(i64::from(line.quantity), q1 + q2);
        prop_assert_eq!(line.unit_price, first.unit_price);
        prop_assert_eq!(
            cart.totals().total,
            round_money(first.unit_price * Decimal::from(q1 + q2))
        );
    }

    /// Property: a non-positive quantity is rejected and leaves the cart exactly as it was
    #[test]
    fn test_invalid_quantity_changes_nothing(
        edits in prop::collection::vec(edit(), 0..20),
        bad in -1000..=0i64,
        id in 1..6u32,
    ) {
        let mut cart = Cart::default();
        for e in &edits {
            apply(&mut cart, e);
        }
        let before = cart.clone();

        prop_assert!(cart.add_line(&product(id, 100, 10), bad).is_err());
        prop_assert!(cart.set_quantity(ProductId(id), bad).is_err());
        prop_assert_eq!(cart, before);
    }
}
