use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use storefront_core::RecommendationService;
use tracing::warn;

use crate::cache::{CacheStats, RecommendationCache};

#[derive(Clone)]
pub struct HealthState {
    service: Arc<RecommendationService>,
    cache: Arc<RecommendationCache>,
}

impl HealthState {
    pub fn new(service: Arc<RecommendationService>, cache: Arc<RecommendationCache>) -> Self {
        Self { service, cache }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub cache: CacheStats,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new().route("/health", get(health)).with_state(state)
}

pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(&state.service);
    let ready = catalog.status == "ready";
    if !ready {
        warn!(
            event_name = "system.health.degraded",
            correlation_id = "health",
            detail = %catalog.detail,
            "health check degraded"
        );
    }

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "storefront-server runtime initialized".to_string(),
        },
        catalog,
        cache: state.cache.stats().await,
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

fn catalog_check(service: &RecommendationService) -> HealthCheck {
    let catalog = service.catalog();
    if catalog.is_empty() {
        return HealthCheck {
            status: "degraded",
            detail: "catalog contains no products".to_string(),
        };
    }

    HealthCheck {
        status: "ready",
        detail: format!(
            "{} products across {} categories",
            catalog.len(),
            catalog.list_categories().len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, Json};
    use storefront_core::config::CacheConfig;
    use storefront_core::{Catalog, RecommendationService};

    use crate::cache::RecommendationCache;
    use crate::health::{health, HealthState};

    fn state(catalog: Catalog) -> HealthState {
        HealthState::new(
            Arc::new(RecommendationService::new(catalog)),
            Arc::new(RecommendationCache::new(&CacheConfig { enabled: false, max_entries: 0 })),
        )
    }

    #[tokio::test]
    async fn health_returns_ready_when_catalog_has_products() {
        let (status, Json(payload)) = health(State(state(Catalog::demo()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ready");
        assert_eq!(payload.catalog.status, "ready");
        assert_eq!(payload.catalog.detail, "12 products across 8 categories");
        assert!(!payload.cache.enabled);
    }

    #[tokio::test]
    async fn health_returns_service_unavailable_for_empty_catalog() {
        let (status, Json(payload)) = health(State(state(Catalog::default()))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, "degraded");
        assert_eq!(payload.catalog.status, "degraded");
        assert_eq!(payload.service.status, "ready");
    }
}
