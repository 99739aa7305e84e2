pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod recommend;
pub mod service;

pub use catalog::Catalog;
pub use domain::product::{Product, ProductId};
pub use domain::recommendation::Recommendation;
pub use errors::{ApplicationError, CatalogError, InterfaceError};
pub use recommend::{
    normalize_price, normalize_purchases, normalize_rating, quality_score, similarity,
    QualityBreakdown, RecommendationLayout, ScoreCalculator, ScoringEngine, ScoringWeights,
};
pub use service::RecommendationService;
