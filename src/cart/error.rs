//! Error types for cart mutations.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantities must be positive integers (and fit in a `u32`).
    #[error("Quantity must be greater than 0, got {0}")]
    InvalidQuantity(i64),
}
