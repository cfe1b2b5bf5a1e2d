//! [`ActorEntity`] implementation for [`Order`].
//!
//! Orders are where the actors meet: `on_create` reads the client and seller directories and
//! reserves stock line by line through the product actor. Either every line is reserved or
//! none is.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use super::OrderContext;
use crate::clients::{ActorClient, ProductClient};
use crate::directory_actor::DirectoryError;
use crate::framework::ActorEntity;
use crate::model::{
    Order, OrderCreate, OrderId, OrderLine, OrderStatus, OrderUpdate, ProductId, StockRequest,
    StockShortage,
};
use crate::product_actor::{ProductError, Reservation};
use async_trait::async_trait;
use tracing::{debug, info, warn};

impl From<DirectoryError> for OrderError {
    fn from(e: DirectoryError) -> Self {
        OrderError::ActorCommunicationError(e.to_string())
    }
}

fn reservation_error(line: &OrderLine, e: ProductError) -> OrderError {
    match e {
        ProductError::InsufficientStock {
            name,
            requested,
            available,
        } => OrderError::InsufficientStock {
            product_id: line.product_id,
            name,
            requested,
            available,
        },
        ProductError::NotFound(_) => OrderError::InvalidProduct(line.product_id),
        ProductError::InvalidQuantity(_) => OrderError::InvalidQuantity(line.product_id),
        other => OrderError::ActorCommunicationError(other.to_string()),
    }
}

async fn release_all(products: &ProductClient, taken: &[(ProductId, Reservation)]) {
    for (product_id, reservation) in taken {
        if let Err(e) = products.release_stock(*product_id, *reservation).await {
            warn!(%product_id, error = %e, "Failed to release reservation");
        }
    }
}

impl Order {
    /// What this order took from each product, merged per product, for undoing it.
    fn reservations_by_product(&self) -> Vec<(ProductId, Reservation)> {
        let mut merged: Vec<(ProductId, Reservation)> = Vec::new();
        let taken = self.reservations.iter().map(|r| (r.product_id, r.quantity, 0));
        let missing = self.shortfalls.iter().map(|s| (s.product_id, 0, s.deficit));

        for (product_id, quantity, deficit) in taken.chain(missing) {
            match merged.iter_mut().find(|(id, _)| *id == product_id) {
                Some((_, r)) => {
                    r.taken += quantity;
                    r.shortfall += deficit;
                }
                None => merged.push((
                    product_id,
                    Reservation {
                        taken: quantity,
                        shortfall: deficit,
                    },
                )),
            }
        }
        merged
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.draft.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(line) = params.draft.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::InvalidQuantity(line.product_id));
        }
        Ok(Self::new(id, params))
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        debug!(
            order_id = %self.id,
            forced = self.forced,
            lines = self.lines.len(),
            "Placing order"
        );
        let client = ctx
            .clients
            .get(self.client_id)
            .await?
            .ok_or(OrderError::InvalidClient(self.client_id))?;
        if self.on_credit && !client.has_credit {
            return Err(OrderError::CreditNotAllowed(self.client_id));
        }
        ctx.sellers
            .get(self.seller_id)
            .await?
            .ok_or(OrderError::InvalidSeller(self.seller_id))?;

        let mut taken: Vec<(ProductId, Reservation)> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            match ctx
                .products
                .reserve_stock(line.product_id, line.quantity, self.forced)
                .await
            {
                Ok(reservation) => taken.push((line.product_id, reservation)),
                Err(e) => {
                    release_all(&ctx.products, &taken).await;
                    return Err(reservation_error(line, e));
                }
            }
        }

        for (line, (product_id, reservation)) in self.lines.iter().zip(&taken) {
            if reservation.taken > 0 {
                self.reservations.push(StockRequest {
                    product_id: *product_id,
                    quantity: reservation.taken,
                });
            }
            if reservation.shortfall > 0 {
                self.shortfalls.push(StockShortage {
                    product_id: *product_id,
                    requested: line.quantity,
                    available: reservation.taken,
                    deficit: reservation.shortfall,
                });
            }
        }
        if !self.shortfalls.is_empty() {
            info!(
                order_id = %self.id,
                count = self.shortfalls.len(),
                "Forced order booked shortfalls"
            );
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &OrderContext,
    ) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::NotEditable(self.id.to_string()));
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
        Ok(())
    }

    /// Pending orders hold stock; they must be cancelled, not deleted.
    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), OrderError> {
        if self.status == OrderStatus::Pending {
            return Err(OrderError::NotEditable(self.id.to_string()));
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::ChangeStatus(to) => {
                if self.status.is_terminal() || to == OrderStatus::Pending {
                    return Err(OrderError::InvalidTransition {
                        from: self.status.clone(),
                        to,
                    });
                }
                if matches!(to, OrderStatus::Cancelled { .. }) {
                    for (product_id, reservation) in self.reservations_by_product() {
                        ctx.products
                            .release_stock(product_id, reservation)
                            .await
                            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
                    }
                }
                self.status = to;
                Ok(OrderActionResult::ChangeStatus(self.status.clone()))
            }
        }
    }
}
