//! [`ActorEntity`] implementations for [`Client`] and [`Seller`].
//!
//! Neither has custom actions; the directories are plain CRUD.

use super::error::DirectoryError;
use crate::framework::ActorEntity;
use crate::model::{
    Client, ClientCreate, ClientId, ClientUpdate, Seller, SellerCreate, SellerId, SellerUpdate,
};
use async_trait::async_trait;

fn require(value: &str, field: &'static str) -> Result<(), DirectoryError> {
    if value.trim().is_empty() {
        return Err(DirectoryError::MissingField(field));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Client {
    type Id = ClientId;
    type Create = ClientCreate;
    type Update = ClientUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = DirectoryError;

    fn from_create_params(id: ClientId, params: ClientCreate) -> Result<Self, DirectoryError> {
        require(&params.business_name, "business_name")?;
        Ok(Self::new(id, params))
    }

    async fn on_update(&mut self, update: ClientUpdate, _ctx: &()) -> Result<(), DirectoryError> {
        if let Some(name) = update.business_name {
            require(&name, "business_name")?;
            self.business_name = name;
        }
        if let Some(contact) = update.contact_name {
            self.contact_name = contact;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(has_credit) = update.has_credit {
            self.has_credit = has_credit;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), DirectoryError> {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Seller {
    type Id = SellerId;
    type Create = SellerCreate;
    type Update = SellerUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = DirectoryError;

    fn from_create_params(id: SellerId, params: SellerCreate) -> Result<Self, DirectoryError> {
        require(&params.first_name, "first_name")?;
        require(&params.last_name, "last_name")?;
        Ok(Self::new(id, params))
    }

    async fn on_update(&mut self, update: SellerUpdate, _ctx: &()) -> Result<(), DirectoryError> {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), DirectoryError> {
        Ok(())
    }
}
