//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Each wrapper turns raw `ResourceRequest`s and action enums into plain async methods that
//! return the actor's own error type.

pub mod actor_client;
pub mod directory_client;
pub mod order_client;
pub mod product_client;

pub use actor_client::ActorClient;
pub use directory_client::*;
pub use order_client::*;
pub use product_client::*;
