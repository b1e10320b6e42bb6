//! In-memory caching using moka
//!
//! Holds the pricing catalog so quotes recomputed on every form change do
//! not hit the database. Catalog rows change rarely (price list updates), so
//! a single entry with a TTL plus a periodic refresh is enough.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::costing::{services, PricingCatalog};

const CATALOG_KEY: &str = "catalog";

/// Application cache holding the pricing catalog
#[derive(Clone)]
pub struct CatalogCache {
    catalog: Cache<&'static str, Arc<PricingCatalog>>,
}

impl CatalogCache {
    /// Create a new cache whose catalog entry expires after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            catalog: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    pub async fn get(&self) -> Option<Arc<PricingCatalog>> {
        self.catalog.get(CATALOG_KEY).await
    }

    pub async fn insert(&self, catalog: PricingCatalog) -> Arc<PricingCatalog> {
        let catalog = Arc::new(catalog);
        self.catalog.insert(CATALOG_KEY, catalog.clone()).await;
        catalog
    }

    /// Drop the cached catalog so the next read goes to the database
    pub async fn invalidate(&self) {
        self.catalog.invalidate(CATALOG_KEY).await;
        info!("Catalog cache invalidated");
    }

    /// Get cache statistics for monitoring
    pub async fn stats(&self) -> CacheStats {
        let catalog = self.get().await;
        CacheStats {
            catalog_cached: catalog.is_some(),
            packages: catalog.as_ref().map_or(0, |c| c.packages.len()),
            accommodations: catalog.as_ref().map_or(0, |c| c.accommodations.len()),
            venues: catalog.as_ref().map_or(0, |c| c.venues.len()),
        }
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(10 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub catalog_cached: bool,
    pub packages: usize,
    pub accommodations: usize,
    pub venues: usize,
}

/// Start background cache warmer
///
/// Loads the catalog on startup and reloads it every `every`.
pub async fn start_cache_warmer(cache: CatalogCache, db: PgPool, every: Duration) {
    let mut interval = interval(every);
    loop {
        // First tick completes immediately
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

async fn warm_cache(cache: &CatalogCache, db: &PgPool) {
    info!("Starting catalog warm-up...");

    match services::fetch_catalog(db).await {
        Ok(catalog) => {
            cache.insert(catalog).await;
            let stats = cache.stats().await;
            info!("Catalog warm-up complete. Stats: {:?}", stats);
        }
        Err(e) => warn!("Failed to warm catalog cache: {}", e),
    }
}
