//! Plain data structures shared by the order builder, the service traits and the actors.
//!
//! The Rust field names are the canonical schema. Wire-specific names live with the
//! transport that needs them (see [`crate::rest`]).

/// Declares a `u32` newtype id that the actor framework can allocate.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod client;
pub mod order;
pub mod product;
pub mod seller;
pub mod stock;

pub use client::*;
pub use order::*;
pub use product::*;
pub use seller::*;
pub use stock::*;

/// Case-insensitive substring match used by every search box.
/// An empty term matches everything.
pub(crate) fn matches_term(term: &str, fields: &[&str]) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&term))
}
