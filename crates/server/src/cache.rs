//! Boundary memoization for recommendation queries.
//!
//! The scoring engine recomputes on every call; this cache sits in front of
//! it at the HTTP layer, keyed by product id, with FIFO eviction once
//! `max_entries` is reached. The catalog is immutable for the life of the
//! process, so entries never go stale.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use storefront_core::config::CacheConfig;
use storefront_core::Recommendation;
use tokio::sync::RwLock;

#[derive(Default)]
struct CacheEntries {
    by_product: HashMap<String, Arc<Recommendation>>,
    insertion_order: VecDeque<String>,
}

pub struct RecommendationCache {
    enabled: bool,
    max_entries: usize,
    entries: RwLock<CacheEntries>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub enabled: bool,
    pub entries: usize,
    pub max_entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl RecommendationCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_entries: config.max_entries,
            entries: RwLock::new(CacheEntries::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached recommendation for `product_id`, computing and
    /// storing it on a miss.
    pub async fn get_or_compute(
        &self,
        product_id: &str,
        compute: impl FnOnce() -> Recommendation,
    ) -> Arc<Recommendation> {
        if !self.enabled {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return Arc::new(compute());
        }

        if let Some(hit) = self.entries.read().await.by_product.get(product_id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let computed = Arc::new(compute());

        let mut entries = self.entries.write().await;
        if let Some(existing) = entries.by_product.get(product_id) {
            return Arc::clone(existing);
        }
        while entries.by_product.len() >= self.max_entries {
            let Some(oldest) = entries.insertion_order.pop_front() else {
                break;
            };
            entries.by_product.remove(&oldest);
        }
        entries.by_product.insert(product_id.to_owned(), Arc::clone(&computed));
        entries.insertion_order.push_back(product_id.to_owned());

        computed
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            enabled: self.enabled,
            entries: self.entries.read().await.by_product.len(),
            max_entries: self.max_entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use storefront_core::config::CacheConfig;
    use storefront_core::{Catalog, Recommendation, RecommendationService};

    use super::RecommendationCache;

    fn cache(max_entries: usize) -> RecommendationCache {
        RecommendationCache::new(&CacheConfig { enabled: true, max_entries })
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let cache = cache(8);
        let service = RecommendationService::new(Catalog::demo());
        let computations = AtomicUsize::new(0);

        let compute = || {
            computations.fetch_add(1, Ordering::SeqCst);
            service.get_recommendations("3")
        };
        let first = cache.get_or_compute("3", compute).await;
        let second = cache
            .get_or_compute("3", || {
                computations.fetch_add(1, Ordering::SeqCst);
                service.get_recommendations("3")
            })
            .await;

        assert_eq!(first, second);
        assert_eq!(computations.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 1, 1));
    }

    #[tokio::test]
    async fn oldest_entry_is_evicted_when_full() {
        let cache = cache(2);

        for id in ["a", "b", "c"] {
            cache.get_or_compute(id, Recommendation::empty).await;
        }

        let stats = cache.stats().await;
        assert_eq!(stats.entries, 2);

        // "a" was evicted, so it is recomputed
        cache.get_or_compute("a", Recommendation::empty).await;
        assert_eq!(cache.stats().await.misses, 4);
        cache.get_or_compute("c", Recommendation::empty).await;
        assert_eq!(cache.stats().await.hits, 1);
    }

    #[tokio::test]
    async fn disabled_cache_always_recomputes() {
        let cache = RecommendationCache::new(&CacheConfig { enabled: false, max_entries: 0 });

        cache.get_or_compute("1", Recommendation::empty).await;
        cache.get_or_compute("1", Recommendation::empty).await;

        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses, stats.entries), (0, 2, 0));
        assert!(!stats.enabled);
    }
}
