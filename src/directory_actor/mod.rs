//! # Directory Actors
//!
//! Clients and sellers. No context dependencies (`Context = ()`), no custom actions; other
//! actors only read them to check that an order's parties exist.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{ClientDirectoryClient, SellerDirectoryClient};
use crate::framework::ResourceActor;
use crate::model::{Client, Seller};

/// Creates a new Client actor and its client.
pub fn new_clients(mailbox_size: usize) -> (ResourceActor<Client>, ClientDirectoryClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_size);
    (actor, ClientDirectoryClient::new(generic_client))
}

/// Creates a new Seller actor and its client.
pub fn new_sellers(mailbox_size: usize) -> (ResourceActor<Seller>, SellerDirectoryClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox_size);
    (actor, SellerDirectoryClient::new(generic_client))
}
