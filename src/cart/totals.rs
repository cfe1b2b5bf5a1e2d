//! Money arithmetic for carts and orders.

use crate::model::OrderTotals;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounds to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether and how tax applies on top of the subtotal.
///
/// The rate is configuration, not a constant: deployments have run both with 18% and with
/// no tax at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxPolicy {
    /// No tax line; total equals subtotal.
    Exempt,
    /// Tax is `subtotal x rate`, e.g. `0.18`.
    Rate(Decimal),
}

impl TaxPolicy {
    /// A zero (or negative) rate means exempt.
    pub fn from_rate(rate: Decimal) -> Self {
        if rate > Decimal::ZERO {
            TaxPolicy::Rate(rate)
        } else {
            TaxPolicy::Exempt
        }
    }

    pub fn tax_on(&self, subtotal: Decimal) -> Decimal {
        match self {
            TaxPolicy::Exempt => Decimal::ZERO,
            TaxPolicy::Rate(rate) => round_money(subtotal * rate),
        }
    }

    /// Totals for a set of already-rounded line subtotals.
    pub fn totals<I>(&self, line_subtotals: I) -> OrderTotals
    where
        I: IntoIterator<Item = Decimal>,
    {
        let subtotal = round_money(line_subtotals.into_iter().sum());
        let tax = self.tax_on(subtotal);
        OrderTotals {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::Rate(Decimal::new(18, 2))
    }
}
