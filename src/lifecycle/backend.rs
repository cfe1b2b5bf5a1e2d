//! The in-process actors seen through the service traits the order builder consumes.

use crate::clients::{
    ActorClient, ClientDirectoryClient, OrderClient, ProductClient, SellerDirectoryClient,
};
use crate::directory_actor::DirectoryError;
use crate::model::{
    Client, ClientId, OrderConfirmation, OrderCreate, OrderDraft, Product, Seller, SellerId,
    StockRequest, StockShortage,
};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::services::{
    CatalogProvider, ClientDirectory, OrderSubmissionService, SellerDirectory, ServiceError,
};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

/// Cheap to clone: every field is a channel sender.
///
/// Actors stop only once every clone is dropped, so builders holding a backend must be
/// dropped before [`DeskSystem::shutdown`](super::DeskSystem::shutdown) can finish.
#[derive(Clone)]
pub struct DeskBackend {
    pub products: ProductClient,
    pub clients: ClientDirectoryClient,
    pub sellers: SellerDirectoryClient,
    pub orders: OrderClient,
}

impl From<ProductError> for ServiceError {
    fn from(e: ProductError) -> Self {
        ServiceError::Unavailable(e.to_string())
    }
}

impl From<DirectoryError> for ServiceError {
    fn from(e: DirectoryError) -> Self {
        ServiceError::Unavailable(e.to_string())
    }
}

impl From<OrderError> for ServiceError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::ActorCommunicationError(_) => ServiceError::Unavailable(e.to_string()),
            rejection => ServiceError::rejected(rejection.to_string()),
        }
    }
}

#[async_trait]
impl CatalogProvider for DeskBackend {
    async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list().await?)
    }
}

#[async_trait]
impl ClientDirectory for DeskBackend {
    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError> {
        Ok(self.clients.list().await?)
    }
}

#[async_trait]
impl SellerDirectory for DeskBackend {
    async fn list_sellers(&self) -> Result<Vec<Seller>, ServiceError> {
        Ok(self.sellers.list().await?)
    }
}

#[async_trait]
impl OrderSubmissionService for DeskBackend {
    /// A product the catalog does not know counts as zero stock.
    #[instrument(skip(self, items), fields(items = items.len()))]
    async fn validate_stock(
        &self,
        items: &[StockRequest],
    ) -> Result<Vec<StockShortage>, ServiceError> {
        let mut shortages = Vec::new();
        for item in items {
            let available = match self.products.check_stock(item.product_id).await {
                Ok(level) => level,
                Err(ProductError::NotFound(_)) => 0,
                Err(e) => return Err(e.into()),
            };
            if let Some(shortage) = StockShortage::check(item.product_id, item.quantity, available)
            {
                shortages.push(shortage);
            }
        }
        if !shortages.is_empty() {
            warn!(count = shortages.len(), "Stock validation found shortages");
        }
        Ok(shortages)
    }

    #[instrument(skip(self, draft), fields(lines = draft.lines.len()))]
    async fn submit_order(
        &self,
        draft: OrderDraft,
        client_id: ClientId,
        seller_id: SellerId,
        force: bool,
    ) -> Result<OrderConfirmation, ServiceError> {
        let id = self
            .orders
            .create_order(OrderCreate {
                client_id,
                seller_id,
                draft,
                force,
            })
            .await?;
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::Unavailable(format!("{id} vanished after creation")))?;
        info!(order_id = %id, total = %order.totals.total, "Order registered");
        Ok(order.confirmation())
    }
}
