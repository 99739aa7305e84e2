//! Feature normalization and composite scoring

use crate::domain::product::Product;

use super::{MAX_RATING, PRICE_REFERENCE, PURCHASE_REFERENCE};

/// Weights for the composite quality score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Weight for the normalized rating (default: 0.40)
    pub rating: f64,
    /// Weight for the normalized purchase count (default: 0.40)
    pub purchases: f64,
    /// Weight for the inverted, normalized price (default: 0.20)
    pub price: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// Maps a rating onto `[0, 1]`. Out-of-domain ratings are scaled, not clamped.
pub fn normalize_rating(rating: f64) -> f64 {
    rating / MAX_RATING
}

/// Purchase volume relative to a fixed reference, saturating at 1.0.
pub fn normalize_purchases(purchases: u64) -> f64 {
    (purchases as f64 / PURCHASE_REFERENCE).min(1.0)
}

/// Affordability: cheaper products score higher, floor at 0.0.
pub fn normalize_price(price: f64) -> f64 {
    1.0 - (price / PRICE_REFERENCE).min(1.0)
}

/// Composite quality score with the default weights.
pub fn quality_score(product: &Product) -> f64 {
    ScoreCalculator::new().quality_score(product)
}

/// Similarity of two products with the default weights.
pub fn similarity(a: &Product, b: &Product) -> f64 {
    ScoreCalculator::new().similarity(a, b)
}

/// Score calculator for catalog products
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: ScoringWeights,
}

impl ScoreCalculator {
    /// Create a new score calculator with default weights
    pub fn new() -> Self {
        Self { weights: ScoringWeights::default() }
    }

    /// Create with custom weights
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    /// Weighted sum of the three normalized features
    pub fn quality_score(&self, product: &Product) -> f64 {
        normalize_rating(product.rating) * self.weights.rating
            + normalize_purchases(product.users_purchased) * self.weights.purchases
            + normalize_price(product.price) * self.weights.price
    }

    /// `1 - |quality(a) - quality(b)|`
    pub fn similarity(&self, a: &Product, b: &Product) -> f64 {
        let score_diff = (self.quality_score(a) - self.quality_score(b)).abs();
        1.0 - score_diff
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}
