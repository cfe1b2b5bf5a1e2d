//! Orders: the draft the builder submits, and the record the backend keeps.
use crate::model::{ClientId, ProductId, SellerId, StockRequest, StockShortage};
use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// When the order should be delivered, relative to the day it is registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryDay {
    #[default]
    Today,
    Tomorrow,
    DayAfterTomorrow,
}

impl DeliveryDay {
    pub fn offset_days(self) -> u64 {
        match self {
            DeliveryDay::Today => 0,
            DeliveryDay::Tomorrow => 1,
            DeliveryDay::DayAfterTomorrow => 2,
        }
    }

    /// The calendar date this delivery day refers to when registered on `today`.
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(self.offset_days()))
            .unwrap_or(today)
    }
}

/// One priced line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub code: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Subtotal, tax and total of a cart or order, all rounded to cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Everything the builder hands to the submission service besides the parties and the
/// force flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
    pub notes: String,
    pub on_credit: bool,
    pub delivery: DeliveryDay,
}

/// What the submission service returns for an accepted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub delivery_date: NaiveDate,
    /// Deficits the backend accepted because the order was forced.
    #[serde(default)]
    pub shortfalls: Vec<StockShortage>,
}

/// Lifecycle of a stored order. `Delivered` and `Cancelled` are terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
    Cancelled { reason: String },
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

/// An order as persisted by the in-process backend.
///
/// # Actor Framework
/// Implements [`ActorEntity`](crate::framework::ActorEntity) in [`crate::order_actor::entity`];
/// its `on_create` hook checks the parties and reserves stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub lines: Vec<OrderLine>,
    pub totals: OrderTotals,
    pub notes: String,
    pub on_credit: bool,
    pub forced: bool,
    pub created_at: DateTime<Utc>,
    pub delivery_date: NaiveDate,
    pub status: OrderStatus,
    /// Units actually taken from stock, per product.
    pub reservations: Vec<StockRequest>,
    pub shortfalls: Vec<StockShortage>,
}

impl Order {
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        let created_at = Utc::now();
        let OrderCreate {
            client_id,
            seller_id,
            draft,
            force,
        } = params;
        Self {
            id,
            client_id,
            seller_id,
            delivery_date: draft.delivery.resolve(created_at.date_naive()),
            lines: draft.lines,
            totals: draft.totals,
            notes: draft.notes,
            on_credit: draft.on_credit,
            forced: force,
            created_at,
            status: OrderStatus::Pending,
            reservations: Vec::new(),
            shortfalls: Vec::new(),
        }
    }

    pub fn confirmation(&self) -> OrderConfirmation {
        OrderConfirmation {
            order_id: self.id,
            created_at: self.created_at,
            delivery_date: self.delivery_date,
            shortfalls: self.shortfalls.clone(),
        }
    }
}

/// Payload for creating an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub client_id: ClientId,
    pub seller_id: SellerId,
    pub draft: OrderDraft,
    pub force: bool,
}

/// Payload for updating an order. Only pending orders accept updates.
#[derive(Debug, Clone, Default)]
pub struct OrderUpdate {
    pub notes: Option<String>,
}

/// One row of the delivery consolidation sheet: how much of a product the orders of one
/// delivery date need in total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedProduct {
    pub product_id: ProductId,
    pub name: String,
    pub unit: String,
    pub total_quantity: u32,
    pub orders: usize,
    pub stock: u32,
    pub min_stock: u32,
}
