//! The backend as the order builder sees it.
//!
//! Two implementations ship with the crate: the in-process actor backend
//! ([`crate::lifecycle::DeskSystem`]) and the HTTP adapter ([`crate::rest::RestBackend`]).
//! Tests use the `Mock*` types generated by `mockall`.

use crate::model::{
    Client, ClientId, OrderConfirmation, OrderDraft, Product, Seller, SellerId, StockRequest,
    StockShortage,
};
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The backend could not be reached or answered with something unreadable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the request, e.g. stock ran out after validation.
    #[error("Request rejected: {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected { message: Option<String> },
}

impl ServiceError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ServiceError::Rejected {
            message: Some(message.into()),
        }
    }

    /// The backend's own message when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[automock]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// All currently known products with price and stock.
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError>;
}

#[automock]
#[async_trait]
pub trait OrderSubmissionService: Send + Sync {
    /// Dry-run check. Returns one shortage per product that cannot be covered; empty means
    /// the order can go ahead.
    async fn validate_stock(
        &self,
        items: &[StockRequest],
    ) -> Result<Vec<StockShortage>, ServiceError>;

    /// Persists the order. `force` asks the backend to accept it despite shortages.
    async fn submit_order(
        &self,
        draft: OrderDraft,
        client_id: ClientId,
        seller_id: SellerId,
        force: bool,
    ) -> Result<OrderConfirmation, ServiceError>;
}

#[automock]
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError>;
}

#[automock]
#[async_trait]
pub trait SellerDirectory: Send + Sync {
    async fn list_sellers(&self) -> Result<Vec<Seller>, ServiceError>;
}

/// The set of collaborators an order builder session needs.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogProvider>,
    pub orders: Arc<dyn OrderSubmissionService>,
    pub clients: Arc<dyn ClientDirectory>,
    pub sellers: Arc<dyn SellerDirectory>,
}

impl Services {
    /// Uses one backend for every role.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CatalogProvider + OrderSubmissionService + ClientDirectory + SellerDirectory + 'static,
    {
        Self {
            catalog: backend.clone(),
            orders: backend.clone(),
            clients: backend.clone(),
            sellers: backend,
        }
    }
}
