use std::sync::Arc;

use storefront_core::config::{AppConfig, ConfigError};
use storefront_core::{ApplicationError, RecommendationService};
use thiserror::Error;
use tracing::info;

use crate::cache::RecommendationCache;

pub struct Application {
    pub config: AppConfig,
    pub service: Arc<RecommendationService>,
    pub cache: Arc<RecommendationCache>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog load failed: {0}")]
    Catalog(#[from] ApplicationError),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let service = RecommendationService::from_config(&config.catalog)?;
    let catalog = service.catalog();
    let catalog_source = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "demo".to_string());
    info!(
        event_name = "system.catalog.loaded",
        correlation_id = "bootstrap",
        source = %catalog_source,
        products = catalog.len(),
        categories = catalog.list_categories().len(),
        "product catalog loaded"
    );

    let cache = RecommendationCache::new(&config.cache);
    info!(
        event_name = "system.cache.configured",
        correlation_id = "bootstrap",
        enabled = config.cache.enabled,
        max_entries = config.cache.max_entries,
        "recommendation cache configured"
    );

    Ok(Application {
        config,
        service: Arc::new(service),
        cache: Arc::new(cache),
    })
}
