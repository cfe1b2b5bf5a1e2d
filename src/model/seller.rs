use crate::model::matches_term;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Sellers.
    SellerId,
    "seller"
);

/// A member of the sales staff an order is attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl Seller {
    pub fn new(id: SellerId, params: SellerCreate) -> Self {
        Self {
            id,
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
            phone: params.phone,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Search matches the first or last name.
    pub fn matches(&self, term: &str) -> bool {
        matches_term(term, &[&self.first_name, &self.last_name])
    }
}

/// Payload for registering a seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Payload for updating a seller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
}
