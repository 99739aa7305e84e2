//! Product recommendation engine
//!
//! Ranks catalog products against a selected product using a single
//! composite quality score per product. Similarity between two products is
//! `1 - |Δscore|`, so products with very different ratings, sales, and prices
//! can still be "perfectly similar" when their composites coincide. That
//! collapse is part of the observable contract and is kept as is.

mod engine;
mod explain;
mod layout;
mod scoring;

pub use engine::ScoringEngine;
pub use explain::{
    similarity_label, similarity_percent, Factor, FactorContribution, QualityBreakdown,
};
pub use layout::{
    LayoutNode, NodeGroup, RecommendationLayout, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
};
pub use scoring::{
    normalize_price, normalize_purchases, normalize_rating, quality_score, similarity,
    ScoreCalculator, ScoringWeights,
};

/// Default scoring weights
pub const DEFAULT_WEIGHTS: ScoringWeights =
    ScoringWeights { rating: 0.40, purchases: 0.40, price: 0.20 };

/// Purchase count at which the normalized purchase factor saturates
pub const PURCHASE_REFERENCE: f64 = 3000.0;

/// Price at which the normalized price factor bottoms out at zero
pub const PRICE_REFERENCE: f64 = 1500.0;

/// Upper bound on the rating domain
pub const MAX_RATING: f64 = 5.0;

/// Maximum products returned per ranked list
pub const MAX_RECOMMENDATIONS: usize = 4;
