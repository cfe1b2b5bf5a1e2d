//! # Product Actor
//!
//! Owns the catalog: prices, stock and the shortfall ledger.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, products) = product_actor::new(32);
//! tokio::spawn(actor.run(()));
//!
//! let id = products.create_product(params).await?;
//! let reservation = products.reserve_stock(id, 5, false).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new Product actor and its client.
pub fn new(mailbox_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_size);
    (actor, ProductClient::new(generic_client))
}
