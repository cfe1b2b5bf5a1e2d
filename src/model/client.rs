use crate::model::matches_term;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Clients.
    ClientId,
    "client"
);

/// A business that places orders.
///
/// Managed by the directory actor; see [`crate::directory_actor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub business_name: String,
    pub contact_name: String,
    pub address: String,
    pub phone: String,
    /// Whether the client may buy on credit.
    pub has_credit: bool,
}

impl Client {
    pub fn new(id: ClientId, params: ClientCreate) -> Self {
        Self {
            id,
            business_name: params.business_name,
            contact_name: params.contact_name,
            address: params.address,
            phone: params.phone,
            has_credit: params.has_credit,
        }
    }

    /// Search matches the business name or the contact name.
    pub fn matches(&self, term: &str) -> bool {
        matches_term(term, &[&self.business_name, &self.contact_name])
    }
}

/// Payload for registering a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub business_name: String,
    pub contact_name: String,
    pub address: String,
    pub phone: String,
    pub has_credit: bool,
}

/// Payload for updating a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub business_name: Option<String>,
    pub contact_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub has_credit: Option<bool>,
}
