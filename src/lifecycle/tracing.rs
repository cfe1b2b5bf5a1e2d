//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter. Module paths are
//! hidden (`with_target(false)`); actor logs carry an `entity_type` field instead.
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Full payloads: create_order logs its params once at debug level
//! RUST_LOG=debug cargo run
//!
//! # Only the builder
//! RUST_LOG=order_desk::builder=debug cargo run
//! ```
//!
//! A forced order with one uncovered line looks like this at `info`:
//!
//! ```text
//! INFO Sending create_order to actor
//! INFO Action ok entity_type="Product" id=product_1
//! INFO Forced order booked shortfalls order_id=order_1 count=1
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Order registered order_id=order_1 total=35.40
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `default_level` when set.
///
/// Call once, at startup.
pub fn setup_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
