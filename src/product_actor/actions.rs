//! Custom actions for the Product actor.
//!
//! Everything that touches stock goes through these actions so the product actor stays the
//! only writer of `stock` and `shortfall`.

/// Stock operations on a single [`Product`](crate::model::Product).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes `quantity` units out of stock.
    ///
    /// Without `force` the reservation is all-or-nothing and fails on insufficient stock.
    /// With `force` it takes whatever is available and books the rest as shortfall.
    Reserve { quantity: u32, force: bool },
    /// Gives back units taken by [`ProductAction::Reserve`], and forgets the matching
    /// shortfall.
    Release { quantity: u32, shortfall: u32 },
    /// Zeroes the shortfall ledger entry.
    ClearShortfall,
}

/// What a forced or regular reservation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    /// Units removed from stock.
    pub taken: u32,
    /// Units promised but not covered. Always zero for unforced reservations.
    pub shortfall: u32,
}

/// Results from [`ProductAction`]s; variants match 1:1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductActionResult {
    CheckStock(u32),
    Reserve(Reservation),
    /// Stock level after the release.
    Release(u32),
    /// Shortfall before it was cleared.
    ClearShortfall(u32),
}
