//! Error types for the order builder.
//!
//! Every variant displays as a message fit for the person entering the order.

use crate::cart::CartError;
use crate::model::{ClientId, ProductId, SellerId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Select a client")]
    MissingClient,

    #[error("Select a seller")]
    MissingSeller,

    #[error("Add at least one product")]
    EmptyCart,

    #[error("Product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    #[error("Client {0} is not in the directory")]
    UnknownClient(ClientId),

    #[error("Seller {0} is not in the directory")]
    UnknownSeller(SellerId),

    #[error("This client cannot buy on credit")]
    CreditNotAllowed,

    #[error(transparent)]
    InvalidQuantity(#[from] CartError),

    /// Loading the catalog or the directories failed.
    #[error("{0}")]
    CatalogUnavailable(String),

    /// The dry-run stock check failed (not: found shortages).
    #[error("{0}")]
    ValidationFailed(String),

    /// The backend did not register the order. Holds the message shown to the user.
    #[error("{0}")]
    SubmissionFailed(String),
}
