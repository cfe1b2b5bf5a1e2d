use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// One `(product, requested quantity)` pair sent to the dry-run stock check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A product whose requested quantity exceeds what is available.
///
/// Shortages are ordinary values: an empty list means "go ahead".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortage {
    pub product_id: ProductId,
    pub requested: u32,
    pub available: u32,
    pub deficit: u32,
}

impl StockShortage {
    /// Returns a shortage only when `requested > available`.
    pub fn check(product_id: ProductId, requested: u32, available: u32) -> Option<Self> {
        (requested > available).then(|| Self {
            product_id,
            requested,
            available,
            deficit: requested - available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortage_only_when_deficit_is_positive() {
        assert_eq!(StockShortage::check(ProductId(1), 2, 2), None);
        assert_eq!(StockShortage::check(ProductId(1), 1, 9), None);
        assert_eq!(
            StockShortage::check(ProductId(1), 5, 2),
            Some(StockShortage {
                product_id: ProductId(1),
                requested: 5,
                available: 2,
                deficit: 3,
            })
        );
    }
}
