//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the in-process backend.
//!
//! ## Dependency Injection via Context
//!
//! Actors are created without dependencies and receive them in `run(context)`. The order
//! actor is the only one with a context ([`OrderContext`](crate::order_actor::OrderContext));
//! products, clients and sellers run with `()`.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each mailbox
//! 2. **Actors detect closure** - `receiver.recv()` returns `None`
//! 3. **Await completion** - [`DeskSystem::shutdown`] joins every actor task
//!
//! The order actor holds clones of the other clients, which is fine as long as the
//! dependency graph stays acyclic: it stops first and releases them.

pub mod backend;
pub mod desk_system;
pub mod tracing;

pub use backend::*;
pub use desk_system::*;
pub use self::tracing::setup_tracing;
