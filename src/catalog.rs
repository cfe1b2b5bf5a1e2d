//! Session-scoped read-through cache in front of a [`CatalogProvider`].
//!
//! One cache belongs to one builder session. Entries expire after a TTL and are invalidated
//! explicitly whenever the session knows stock has changed.

use crate::model::{Product, ProductId};
use crate::services::{CatalogProvider, ServiceError};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct Snapshot {
    fetched_at: Instant,
    products: Vec<Product>,
    stale: bool,
}

pub struct CachedCatalog {
    provider: Arc<dyn CatalogProvider>,
    ttl: Duration,
    snapshot: Option<Snapshot>,
}

impl CachedCatalog {
    pub fn new(provider: Arc<dyn CatalogProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            snapshot: None,
        }
    }

    /// Returns the cached list while fresh, otherwise fetches and caches a new one.
    ///
    /// A failed fetch keeps the previous snapshot around for lookups.
    pub async fn list_products(&mut self) -> Result<&[Product], ServiceError> {
        let fresh = self
            .snapshot
            .as_ref()
            .is_some_and(|s| !s.stale && s.fetched_at.elapsed() < self.ttl);

        if !fresh {
            let products = self.provider.list_products().await?;
            debug!(count = products.len(), "Catalog refreshed");
            self.snapshot = Some(Snapshot {
                fetched_at: Instant::now(),
                products,
                stale: false,
            });
        }

        Ok(self.products())
    }

    /// Forces the next [`CachedCatalog::list_products`] to fetch. The old list stays
    /// available to [`CachedCatalog::find`] and [`CachedCatalog::search`] until then.
    pub fn invalidate(&mut self) {
        if let Some(snapshot) = self.snapshot.as_mut() {
            snapshot.stale = true;
            debug!("Catalog cache invalidated");
        }
    }

    /// The last fetched list, fresh or not. Empty before the first fetch.
    pub fn products(&self) -> &[Product] {
        self.snapshot
            .as_ref()
            .map(|s| s.products.as_slice())
            .unwrap_or(&[])
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products().iter().find(|p| p.id == id)
    }

    /// Products offered in the order-entry list: in stock and matching `term` by name or code.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.in_stock() && p.matches(term))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MockCatalogProvider;
    use rust_decimal::Decimal;

    fn product(id: u32, code: &str, name: &str, stock: u32) -> Product {
        Product {
            id: ProductId(id),
            code: code.to_string(),
            name: name.to_string(),
            unit_price: Decimal::ONE,
            stock,
            min_stock: 0,
            unit: "unit".to_string(),
            shortfall: 0,
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product(1, "ARZ-01", "Arroz Extra", 10),
            product(2, "AZU-01", "Azucar Rubia", 0),
            product(3, "ACE-05", "Aceite Vegetal", 4),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_serves_from_cache_until_ttl() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_list_products()
            .times(2)
            .returning(|| Ok(sample()));

        let mut catalog = CachedCatalog::new(Arc::new(provider), Duration::from_secs(30));
        assert_eq!(catalog.list_products().await.unwrap().len(), 3);

        tokio::time::advance(Duration::from_secs(10)).await;
        catalog.list_products().await.unwrap();

        tokio::time::advance(Duration::from_secs(25)).await;
        catalog.list_products().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_list_products()
            .times(2)
            .returning(|| Ok(sample()));

        let mut catalog = CachedCatalog::new(Arc::new(provider), Duration::from_secs(300));
        catalog.list_products().await.unwrap();
        catalog.invalidate();
        assert_eq!(catalog.products().len(), 3);
        catalog.list_products().await.unwrap();
        catalog.list_products().await.unwrap();
    }

    #[tokio::test]
    async fn test_search_hides_out_of_stock_but_find_does_not() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_list_products().returning(|| Ok(sample()));

        let mut catalog = CachedCatalog::new(Arc::new(provider), Duration::from_secs(300));
        catalog.list_products().await.unwrap();

        let ids: Vec<_> = catalog.search("a").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId(1), ProductId(3)]);

        let by_code: Vec<_> = catalog.search("ace-").iter().map(|p| p.id).collect();
        assert_eq!(by_code, vec![ProductId(3)]);

        assert!(catalog.search("azucar").is_empty());
        assert_eq!(catalog.find(ProductId(2)).map(|p| p.stock), Some(0));
    }

    #[tokio::test]
    async fn test_failed_fetch_propagates() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_list_products()
            .returning(|| Err(ServiceError::Unavailable("timeout".into())));

        let mut catalog = CachedCatalog::new(Arc::new(provider), Duration::from_secs(30));
        assert!(catalog.list_products().await.is_err());
        assert!(catalog.products().is_empty());
    }
}
