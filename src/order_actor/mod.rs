//! # Order Actor
//!
//! Persists submitted orders and keeps stock accounting consistent with them.
//!
//! The actor depends on the client, seller and product actors, injected at runtime:
//!
//! ```rust,ignore
//! let (order_actor, orders) = order_actor::new(32);
//! tokio::spawn(order_actor.run(OrderContext {
//!     clients: clients.clone(),
//!     sellers: sellers.clone(),
//!     products: products.clone(),
//! }));
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{ClientDirectoryClient, OrderClient, ProductClient, SellerDirectoryClient};
use crate::framework::ResourceActor;
use crate::model::Order;

/// Dependencies of the Order actor's hooks.
#[derive(Clone)]
pub struct OrderContext {
    pub clients: ClientDirectoryClient,
    pub sellers: SellerDirectoryClient,
    pub products: ProductClient,
}

/// Creates a new Order actor and its client.
pub fn new(mailbox_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_size);
    (actor, OrderClient::new(generic_client))
}
