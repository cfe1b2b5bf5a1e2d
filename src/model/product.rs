use crate::model::matches_term;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Products.
    ProductId,
    "product"
);

/// A product in the catalog, with its price and stock.
///
/// # Actor Framework
/// This struct implements [`ActorEntity`](crate::framework::ActorEntity) in
/// [`crate::product_actor::entity`], which adds stock reservation actions on top of CRUD.
///
/// Prices are exact decimals; never `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    pub unit_price: Decimal,
    pub stock: u32,
    pub min_stock: u32,
    pub unit: String,
    /// Units promised by forced orders that stock could not cover.
    #[serde(default)]
    pub shortfall: u32,
}

impl Product {
    /// Builds a product from its creation payload.
    pub fn new(id: ProductId, params: ProductCreate) -> Self {
        Self {
            id,
            code: params.code,
            name: params.name,
            unit_price: params.unit_price,
            stock: params.stock,
            min_stock: params.min_stock,
            unit: params.unit,
            shortfall: 0,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Matches the order-entry search box: name or code.
    pub fn matches(&self, term: &str) -> bool {
        matches_term(term, &[&self.name, &self.code])
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub code: String,
    pub name: String,
    pub unit_price: Decimal,
    pub stock: u32,
    pub min_stock: u32,
    pub unit: String,
}

/// Payload for updating a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub unit_price: Option<Decimal>,
    pub stock: Option<u32>,
}
