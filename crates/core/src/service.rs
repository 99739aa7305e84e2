use tracing::debug;

use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::domain::product::Product;
use crate::domain::recommendation::Recommendation;
use crate::errors::ApplicationError;
use crate::recommend::{QualityBreakdown, RecommendationLayout, ScoringEngine};

/// Query facade over a catalog: the operations exposed to the CLI and HTTP
/// layers. Synchronous and side-effect free apart from debug tracing.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    catalog: Catalog,
    engine: ScoringEngine,
}

impl RecommendationService {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_engine(catalog, ScoringEngine::default())
    }

    pub fn with_engine(catalog: Catalog, engine: ScoringEngine) -> Self {
        Self { catalog, engine }
    }

    /// Loads the configured catalog, or the demo catalog when no path is set.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ApplicationError> {
        Ok(Self::new(Catalog::from_config(config)?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn get_all_products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn get_all_categories(&self) -> Vec<String> {
        self.catalog.list_categories()
    }

    pub fn get_products_by_category(&self, category: &str) -> Vec<Product> {
        let products = self.catalog.filter_by_category(category);
        debug!(
            event_name = "catalog.category.filtered",
            category,
            matched = products.len(),
            "filtered catalog by category"
        );
        products
    }

    pub fn get_recommendations(&self, product_id: &str) -> Recommendation {
        let recommendation = self.engine.get_recommendations(&self.catalog, product_id);
        debug!(
            event_name = "recommend.query.completed",
            product_id,
            found = recommendation.product.is_some(),
            similar = recommendation.similar_products.len(),
            cross_category = recommendation.cross_category_products.len(),
            "recommendation query completed"
        );
        recommendation
    }

    pub fn explain_product(&self, product_id: &str) -> Option<QualityBreakdown> {
        self.catalog
            .find(product_id)
            .map(|product| QualityBreakdown::compute(self.engine.calculator(), product))
    }

    pub fn recommendation_layout(
        &self,
        product_id: &str,
        width: f64,
        height: f64,
    ) -> Option<RecommendationLayout> {
        RecommendationLayout::compute(&self.get_recommendations(product_id), width, height)
    }
}
