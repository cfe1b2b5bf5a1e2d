//! The in-progress order: product lines, frozen prices, and derived totals.
//!
//! Every mutation recomputes [`OrderTotals`] before returning, so [`Cart::totals`] never lags
//! behind [`Cart::lines`]. Stock checks done here are advisory only; see
//! [`StockWarning`].

pub mod error;
pub mod totals;

pub use error::CartError;
pub use totals::{round_money, TaxPolicy};

use crate::model::{OrderLine, OrderTotals, Product, ProductId, StockRequest};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub code: String,
    pub name: String,
    pub quantity: u32,
    /// Price at the moment the product was first added.
    pub unit_price: Decimal,
    /// Stock as the catalog reported it when the line was last touched.
    pub known_stock: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        round_money(self.unit_price * Decimal::from(self.quantity))
    }

    fn warning(&self) -> Option<StockWarning> {
        (self.quantity > self.known_stock).then(|| StockWarning {
            product_id: self.product_id,
            name: self.name.clone(),
            requested: self.quantity,
            known_stock: self.known_stock,
        })
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            product_id: line.product_id,
            code: line.code.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            subtotal: line.subtotal(),
        }
    }
}

/// A line asks for more than the catalog last reported.
///
/// The line is kept anyway: the catalog may be stale, and only the backend stock check is
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockWarning {
    pub product_id: ProductId,
    pub name: String,
    pub requested: u32,
    pub known_stock: u32,
}

impl fmt::Display for StockWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Only {} available for {} ({} requested)",
            self.known_stock, self.name, self.requested
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    policy: TaxPolicy,
    totals: OrderTotals,
}

impl Cart {
    pub fn new(policy: TaxPolicy) -> Self {
        Self {
            lines: Vec::new(),
            policy,
            totals: OrderTotals::default(),
        }
    }

    pub fn policy(&self) -> TaxPolicy {
        self.policy
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    /// Adds `quantity` units of `product`, merging with an existing line.
    ///
    /// A merged line keeps its original price snapshot but refreshes the known stock.
    pub fn add_line(
        &mut self,
        product: &Product,
        quantity: i64,
    ) -> Result<Option<StockWarning>, CartError> {
        let quantity = positive_quantity(quantity)?;

        let warning = match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                let merged = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::InvalidQuantity(
                        i64::from(line.quantity) + i64::from(quantity),
                    ))?;
                line.quantity = merged;
                line.known_stock = product.stock;
                line.warning()
            }
            None => {
                let line = CartLine {
                    product_id: product.id,
                    code: product.code.clone(),
                    name: product.name.clone(),
                    quantity,
                    unit_price: product.unit_price,
                    known_stock: product.stock,
                };
                let warning = line.warning();
                self.lines.push(line);
                warning
            }
        };

        self.totals = self.compute_totals();
        Ok(warning)
    }

    /// Removes the product's line. Absent products are ignored.
    pub fn remove_line(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            self.totals = self.compute_totals();
        }
    }

    /// Replaces a line's quantity. Absent products are ignored.
    ///
    /// The quantity is validated first, so an invalid value fails even for a product that is
    /// not in the cart, and the cart is left untouched.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Option<StockWarning>, CartError> {
        let quantity = positive_quantity(quantity)?;

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return Ok(None);
        };
        line.quantity = quantity;
        let warning = line.warning();

        self.totals = self.compute_totals();
        Ok(warning)
    }

    /// Totals over the current lines. Pure: no state is read besides the lines and the policy.
    pub fn compute_totals(&self) -> OrderTotals {
        self.policy.totals(self.lines.iter().map(CartLine::subtotal))
    }

    pub fn reset(&mut self) {
        self.lines.clear();
        self.totals = OrderTotals::default();
    }

    /// The batch sent to the dry-run stock check, in cart order.
    pub fn stock_requests(&self) -> Vec<StockRequest> {
        self.lines
            .iter()
            .map(|l| StockRequest {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect()
    }

    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines.iter().map(OrderLine::from).collect()
    }
}

fn positive_quantity(quantity: i64) -> Result<u32, CartError> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity(quantity));
    }
    u32::try_from(quantity).map_err(|_| CartError::InvalidQuantity(quantity))
}
