//! # Product Client
//!
//! High-level API over a `ResourceClient<Product>`: typed stock operations instead of raw
//! action enums.

use crate::clients::actor_client::{recover_entity_error, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, Reservation};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(
            e,
            ProductError::NotFound,
            ProductError::ActorCommunicationError,
        )
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes stock for an order line. See [`ProductAction::Reserve`] for `force`.
    #[instrument(skip(self))]
    pub async fn reserve_stock(
        &self,
        id: ProductId,
        quantity: u32,
        force: bool,
    ) -> Result<Reservation, ProductError> {
        debug!(quantity, force, "Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::Reserve { quantity, force })
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Reserve(reservation) => Ok(reservation),
            other => Err(unexpected(other)),
        }
    }

    /// Undoes a reservation. Returns the new stock level.
    #[instrument(skip(self))]
    pub async fn release_stock(
        &self,
        id: ProductId,
        reservation: Reservation,
    ) -> Result<u32, ProductError> {
        let action = ProductAction::Release {
            quantity: reservation.taken,
            shortfall: reservation.shortfall,
        };
        match self
            .inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Release(stock) => Ok(stock),
            other => Err(unexpected(other)),
        }
    }

    /// Zeroes the product's shortfall. Returns what it was.
    #[instrument(skip(self))]
    pub async fn clear_shortfall(&self, id: ProductId) -> Result<u32, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::ClearShortfall)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ClearShortfall(previous) => Ok(previous),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);
        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_reserve_stock_recovers_typed_error() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.reserve_stock(ProductId(1), 9, false).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(
            action,
            ProductAction::Reserve {
                quantity: 9,
                force: false
            }
        );
        let insufficient = ProductError::InsufficientStock {
            name: "Arroz".to_string(),
            requested: 9,
            available: 4,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(insufficient.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(insufficient));
    }

    #[tokio::test]
    async fn test_missing_product_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.check_stock(ProductId(7)).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Err(FrameworkError::NotFound("product_7".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound("product_7".to_string()))
        );
    }

    #[tokio::test]
    async fn test_mismatched_result_is_an_error_not_a_panic() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.clear_shortfall(ProductId(1)).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        responder
            .send(Ok(ProductActionResult::CheckStock(1)))
            .unwrap();

        assert!(matches!(
            task.await.unwrap(),
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
