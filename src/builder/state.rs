//! The observable side of an order builder session.
//!
//! Front ends subscribe to a `tokio::sync::watch` channel and re-render on every change.
//! The builder publishes before each mutating call returns.

use crate::cart::CartLine;
use crate::model::{Client, DeliveryDay, OrderTotals, Seller, StockShortage};
use serde::Serialize;

/// What the session wants the user to notice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Status {
    #[default]
    Idle,
    /// A request is in flight; the triggering control should be disabled.
    Loading,
    /// Soft problem: stock looks short, the user decides.
    Warning(String),
    Error(String),
    /// Transient; cleared automatically after the configured delay.
    Success(String),
}

/// Snapshot of a builder session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuilderView {
    pub client: Option<Client>,
    pub seller: Option<Seller>,
    pub lines: Vec<CartLine>,
    pub totals: OrderTotals,
    pub notes: String,
    pub on_credit: bool,
    pub delivery: DeliveryDay,
    /// Shortages from the last stock check, until the cart changes or the order goes through.
    pub pending_shortages: Vec<StockShortage>,
    pub status: Status,
    /// Bumped on every status change so a delayed clear never wipes a newer message.
    pub status_seq: u64,
}
