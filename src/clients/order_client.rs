//! # Order Client
//!
//! High-level API over a `ResourceClient<Order>`. Party checks and stock reservation happen
//! inside the actor (`Order::on_create`), so creating an order is a single request.

use crate::clients::actor_client::{recover_entity_error, ActorClient};
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(
        skip(self, params),
        fields(client_id = %params.client_id, seller_id = %params.seller_id, force = params.force)
    )]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrderError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Marks an order delivered or cancelled. Returns the new status.
    #[instrument(skip(self))]
    pub async fn change_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<OrderStatus, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::ChangeStatus(status))
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::ChangeStatus(status) => Ok(status),
        }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        recover_entity_error(e, OrderError::NotFound, OrderError::ActorCommunicationError)
    }
}
