use crate::model::OrderStatus;

/// Custom actions for Order entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    /// Moves a pending order to `Delivered` or `Cancelled`. Cancelling returns its stock.
    ChangeStatus(OrderStatus),
}

/// Results from [`OrderAction`]s; variants match 1:1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderActionResult {
    ChangeStatus(OrderStatus),
}
