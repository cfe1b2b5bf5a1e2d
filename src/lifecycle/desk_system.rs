use super::backend::DeskBackend;
use crate::clients::{
    ActorClient, ClientDirectoryClient, OrderClient, ProductClient, SellerDirectoryClient,
};
use crate::directory_actor::{self, DirectoryError};
use crate::model::{
    ClientCreate, ClientId, ConsolidatedProduct, OrderId, OrderStatus, Product, ProductCreate,
    ProductId, SellerCreate, SellerId,
};
use crate::order_actor::{self, OrderContext, OrderError};
use crate::product_actor::{self, ProductError};
use crate::report;
use crate::services::Services;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Actor task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// The in-process backend: one actor per resource, wired together.
///
/// # Architecture
///
/// - **Product Actor**: catalog, stock and the shortfall ledger
/// - **Client / Seller Actors**: the directories
/// - **Order Actor**: registers orders; its `on_create` hook reads the directories and
///   reserves stock through the product actor
///
/// # Example
///
/// ```ignore
/// let system = DeskSystem::new(32);
/// let product = system.create_product(params).await?;
///
/// let builder = OrderBuilder::new(system.services(), &config);
/// // ... take orders ...
/// drop(builder);
///
/// system.shutdown().await?;
/// ```
pub struct DeskSystem {
    pub products: ProductClient,
    pub clients: ClientDirectoryClient,
    pub sellers: SellerDirectoryClient,
    pub orders: OrderClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DeskSystem {
    /// Spawns all actors. Must be called inside a Tokio runtime.
    pub fn new(mailbox_size: usize) -> Self {
        // 1. Create actors (no dependencies yet)
        let (product_actor, products) = product_actor::new(mailbox_size);
        let (client_actor, clients) = directory_actor::new_clients(mailbox_size);
        let (seller_actor, sellers) = directory_actor::new_sellers(mailbox_size);
        let (order_actor, orders) = order_actor::new(mailbox_size);

        // 2. Start actors with injected context
        let handles = vec![
            tokio::spawn(product_actor.run(())),
            tokio::spawn(client_actor.run(())),
            tokio::spawn(seller_actor.run(())),
            tokio::spawn(order_actor.run(OrderContext {
                clients: clients.clone(),
                sellers: sellers.clone(),
                products: products.clone(),
            })),
        ];
        info!(mailbox_size, "Desk system started");

        Self {
            products,
            clients,
            sellers,
            orders,
            handles,
        }
    }

    pub fn backend(&self) -> DeskBackend {
        DeskBackend {
            products: self.products.clone(),
            clients: self.clients.clone(),
            sellers: self.sellers.clone(),
            orders: self.orders.clone(),
        }
    }

    /// Service handles for an order builder session.
    pub fn services(&self) -> Services {
        Services::from_backend(Arc::new(self.backend()))
    }

    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, SystemError> {
        Ok(self.products.create_product(params).await?)
    }

    pub async fn create_client(&self, params: ClientCreate) -> Result<ClientId, SystemError> {
        Ok(self.clients.create_client(params).await?)
    }

    pub async fn create_seller(&self, params: SellerCreate) -> Result<SellerId, SystemError> {
        Ok(self.sellers.create_seller(params).await?)
    }

    pub async fn change_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, SystemError> {
        Ok(self.orders.change_status(id, status).await?)
    }

    /// Products with units promised by forced orders but not covered by stock.
    pub async fn shortfalls(&self) -> Result<Vec<Product>, SystemError> {
        let mut products = self.products.list().await?;
        products.retain(|p| p.shortfall > 0);
        Ok(products)
    }

    /// Clears the shortfall ledger, e.g. after a purchase order covered it. Returns how many
    /// products were cleared.
    pub async fn reset_shortfalls(&self) -> Result<usize, SystemError> {
        let pending = self.shortfalls().await?;
        for product in &pending {
            self.products.clear_shortfall(product.id).await?;
        }
        info!(cleared = pending.len(), "Shortfall ledger reset");
        Ok(pending.len())
    }

    /// Per-product totals for the orders to deliver on `date`.
    pub async fn consolidate(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ConsolidatedProduct>, SystemError> {
        let orders = self.orders.list().await?;
        let products = self.products.list().await?;
        Ok(report::consolidate(&orders, &products, date))
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Drops this system's clients and waits for every actor. Clones handed out through
    /// [`DeskSystem::backend`] or [`DeskSystem::services`] keep their actors alive, so drop
    /// them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // Dropping the senders makes each actor's `recv()` return `None`.
        drop(self.orders);
        drop(self.products);
        drop(self.clients);
        drop(self.sellers);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
