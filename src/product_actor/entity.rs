//! [`ActorEntity`] implementation for [`Product`].
//!
//! Stock never goes below zero. Forced reservations book what they cannot take on the
//! product's shortfall ledger instead.

use super::actions::{ProductAction, ProductActionResult, Reservation};
use super::error::ProductError;
use crate::framework::ActorEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if params.code.trim().is_empty() || params.name.trim().is_empty() {
            return Err(ProductError::InvalidProduct(
                "code and name are required".to_string(),
            ));
        }
        check_price(params.unit_price)?;
        Ok(Self::new(id, params))
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        if let Some(price) = update.unit_price {
            check_price(price)?;
            self.unit_price = price;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.stock)),
            ProductAction::Reserve { quantity, force } => {
                if quantity == 0 {
                    return Err(ProductError::InvalidQuantity(quantity));
                }
                if self.stock >= quantity {
                    self.stock -= quantity;
                    return Ok(ProductActionResult::Reserve(Reservation {
                        taken: quantity,
                        shortfall: 0,
                    }));
                }
                if !force {
                    return Err(ProductError::InsufficientStock {
                        name: self.name.clone(),
                        requested: quantity,
                        available: self.stock,
                    });
                }
                let reservation = Reservation {
                    taken: self.stock,
                    shortfall: quantity - self.stock,
                };
                self.stock = 0;
                self.shortfall = self.shortfall.saturating_add(reservation.shortfall);
                Ok(ProductActionResult::Reserve(reservation))
            }
            ProductAction::Release {
                quantity,
                shortfall,
            } => {
                if quantity == 0 && shortfall == 0 {
                    return Err(ProductError::InvalidQuantity(0));
                }
                self.stock = self.stock.saturating_add(quantity);
                self.shortfall = self.shortfall.saturating_sub(shortfall);
                Ok(ProductActionResult::Release(self.stock))
            }
            ProductAction::ClearShortfall => {
                let previous = std::mem::take(&mut self.shortfall);
                Ok(ProductActionResult::ClearShortfall(previous))
            }
        }
    }
}

fn check_price(price: Decimal) -> Result<(), ProductError> {
    if price.is_sign_negative() {
        return Err(ProductError::InvalidProduct(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}
