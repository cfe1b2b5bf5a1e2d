//! Error types for the Order actor.

use crate::model::{ClientId, OrderStatus, ProductId, SellerId};
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Everything except [`OrderError::ActorCommunicationError`] is a business rejection whose
/// message is meant for the person entering the order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Unknown client: {0}")]
    InvalidClient(ClientId),

    #[error("Unknown seller: {0}")]
    InvalidSeller(SellerId),

    #[error("Unknown product: {0}")]
    InvalidProduct(ProductId),

    #[error("Client {0} cannot buy on credit")]
    CreditNotAllowed(ClientId),

    #[error("Order has no lines")]
    EmptyOrder,

    #[error("Invalid quantity for {0}")]
    InvalidQuantity(ProductId),

    #[error("Insufficient stock for {name}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        name: String,
        requested: u32,
        available: u32,
    },

    #[error("Cannot change order status from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Updates and deletes only apply to orders in the right state.
    #[error("Order {0} cannot be modified in its current state")]
    NotEditable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
