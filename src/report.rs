//! Delivery consolidation: what the warehouse has to load for one delivery date.

use crate::model::{ConsolidatedProduct, Order, OrderStatus, Product, ProductId};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Sums ordered quantities per product over the orders delivered on `date`.
///
/// Cancelled orders are skipped. Products missing from `products` still appear, with their
/// name taken from the order line and zero stock. Rows are ordered by product name.
pub fn consolidate(
    orders: &[Order],
    products: &[Product],
    date: NaiveDate,
) -> Vec<ConsolidatedProduct> {
    let mut rows: BTreeMap<ProductId, ConsolidatedProduct> = BTreeMap::new();

    let due = orders.iter().filter(|o| {
        o.delivery_date == date && !matches!(o.status, OrderStatus::Cancelled { .. })
    });

    for order in due {
        for line in &order.lines {
            let row = rows.entry(line.product_id).or_insert_with(|| {
                let product = products.iter().find(|p| p.id == line.product_id);
                ConsolidatedProduct {
                    product_id: line.product_id,
                    name: product.map_or_else(|| line.name.clone(), |p| p.name.clone()),
                    unit: product.map(|p| p.unit.clone()).unwrap_or_default(),
                    total_quantity: 0,
                    orders: 0,
                    stock: product.map_or(0, |p| p.stock),
                    min_stock: product.map_or(0, |p| p.min_stock),
                }
            });
            row.total_quantity = row.total_quantity.saturating_add(line.quantity);
            row.orders += 1;
        }
    }

    let mut rows: Vec<_> = rows.into_values().collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}
