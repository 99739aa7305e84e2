//! Ranking of similar and cross-category products

use std::cmp::Ordering;

use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::domain::recommendation::Recommendation;

use super::scoring::{ScoreCalculator, ScoringWeights};
use super::MAX_RECOMMENDATIONS;

/// Stateless ranking engine. Every call recomputes from the catalog it is
/// given; memoization belongs to callers.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    calculator: ScoreCalculator,
    limit: usize,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self { calculator: ScoreCalculator::new(), limit: MAX_RECOMMENDATIONS }
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { calculator: ScoreCalculator::with_weights(weights), limit: MAX_RECOMMENDATIONS }
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    /// Up to four products from the selected product's category, best first.
    pub fn rank_similar(&self, catalog: &Catalog, product_id: &str) -> Vec<Product> {
        match catalog.find(product_id) {
            Some(selected) => self.rank(catalog, selected, |candidate| {
                candidate.category == selected.category
            }),
            None => Vec::new(),
        }
    }

    /// Up to four products from any other category, pooled, best first.
    pub fn rank_cross_category(&self, catalog: &Catalog, product_id: &str) -> Vec<Product> {
        match catalog.find(product_id) {
            Some(selected) => self.rank(catalog, selected, |candidate| {
                candidate.category != selected.category
            }),
            None => Vec::new(),
        }
    }

    pub fn get_recommendations(&self, catalog: &Catalog, product_id: &str) -> Recommendation {
        let Some(selected) = catalog.find(product_id) else {
            return Recommendation::empty();
        };

        Recommendation {
            product: Some(selected.clone()),
            similar_products: self.rank(catalog, selected, |candidate| {
                candidate.category == selected.category
            }),
            cross_category_products: self.rank(catalog, selected, |candidate| {
                candidate.category != selected.category
            }),
        }
    }

    fn rank(
        &self,
        catalog: &Catalog,
        selected: &Product,
        include: impl Fn(&Product) -> bool,
    ) -> Vec<Product> {
        let mut ranked: Vec<Product> = catalog
            .products()
            .iter()
            .filter(|candidate| candidate.id != selected.id && include(candidate))
            .map(|candidate| {
                candidate.with_similarity_score(self.calculator.similarity(selected, candidate))
            })
            .collect();

        // sort_by is stable: equal scores keep catalog order
        ranked.sort_by(|a, b| {
            b.similarity_score.partial_cmp(&a.similarity_score).unwrap_or(Ordering::Equal)
        });
        ranked.truncate(self.limit);
        ranked
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductId;

    fn product(id: &str, category: &str, rating: f64, users_purchased: u64, price: f64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Product {id}"),
            category: category.to_string(),
            rating,
            users_purchased,
            price,
            image_src: String::new(),
            similarity_score: None,
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|product| product.id.as_str()).collect()
    }

    fn assert_descending(products: &[Product]) {
        for pair in products.windows(2) {
            let (a, b) = (pair[0].similarity_score, pair[1].similarity_score);
            assert!(a >= b, "expected descending scores, got {a:?} then {b:?}");
        }
    }

    #[test]
    fn similar_products_share_category_and_exclude_selection() {
        let catalog = Catalog::demo();
        let engine = ScoringEngine::new();

        let similar = engine.rank_similar(&catalog, "8");

        assert_eq!(similar.len(), 2);
        assert!(similar.iter().all(|product| product.category == "Electronics"));
        assert!(similar.iter().all(|product| product.id.as_str() != "8"));
        assert!(similar.iter().all(|product| product.similarity_score.is_some()));
        assert_descending(&similar);
    }

    #[test]
    fn similar_products_follow_score_order() {
        let catalog = Catalog::demo();
        let engine = ScoringEngine::new();

        // tablet 0.6827, laptop 0.6507, speaker 0.8253
        let similar = engine.rank_similar(&catalog, "8");

        assert_eq!(ids(&similar), vec!["11", "9"]);
        assert!((similar[0].similarity_score.unwrap_or_default() - 0.968).abs() < 1e-3);
    }

    #[test]
    fn cross_category_products_pool_other_categories() {
        let catalog = Catalog::demo();
        let engine = ScoringEngine::new();

        let cross = engine.rank_cross_category(&catalog, "1");

        assert_eq!(cross.len(), MAX_RECOMMENDATIONS);
        assert!(cross.iter().all(|product| product.category != "Watches"));
        assert!(cross.iter().all(|product| product.id.as_str() != "1"));
        assert_descending(&cross);
    }

    #[test]
    fn single_member_category_has_no_similar_products() {
        let catalog = Catalog::demo();

        assert!(ScoringEngine::new().rank_similar(&catalog, "1").is_empty());
    }

    #[test]
    fn short_categories_are_not_padded() {
        let catalog = Catalog::new(vec![
            product("a", "Kitchen", 4.0, 100, 20.0),
            product("b", "Kitchen", 3.0, 50, 10.0),
            product("c", "Garden", 5.0, 10, 5.0),
        ]);

        let similar = ScoringEngine::new().rank_similar(&catalog, "a");

        assert_eq!(ids(&similar), vec!["b"]);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            product("sel", "Shoes", 4.0, 1000, 100.0),
            product("t1", "Shoes", 3.0, 500, 50.0),
            product("t2", "Shoes", 3.0, 500, 50.0),
            product("best", "Shoes", 4.0, 1000, 100.0),
            product("t3", "Shoes", 3.0, 500, 50.0),
            product("t4", "Shoes", 3.0, 500, 50.0),
        ]);

        let similar = ScoringEngine::new().rank_similar(&catalog, "sel");

        assert_eq!(ids(&similar), vec!["best", "t1", "t2", "t3"]);
        assert_eq!(similar[0].similarity_score, Some(1.0));
    }

    #[test]
    fn unknown_product_yields_empty_lists() {
        let catalog = Catalog::demo();
        let engine = ScoringEngine::new();

        assert!(engine.rank_similar(&catalog, "missing").is_empty());
        assert!(engine.rank_cross_category(&catalog, "missing").is_empty());
        assert_eq!(engine.get_recommendations(&catalog, "missing"), Recommendation::empty());
    }

    #[test]
    fn recommendations_compose_both_rankings() {
        let catalog = Catalog::demo();
        let engine = ScoringEngine::new();

        let recommendation = engine.get_recommendations(&catalog, "6");

        let selected = recommendation.product.as_ref().expect("selected product");
        assert_eq!(selected.id.as_str(), "6");
        assert_eq!(selected.similarity_score, None);
        assert_eq!(recommendation.similar_products, engine.rank_similar(&catalog, "6"));
        assert_eq!(
            recommendation.cross_category_products,
            engine.rank_cross_category(&catalog, "6")
        );
    }

    #[test]
    fn catalog_records_are_not_mutated() {
        let catalog = Catalog::demo();
        let before = catalog.clone();

        let _ = ScoringEngine::new().get_recommendations(&catalog, "9");

        assert_eq!(catalog, before);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let catalog = Catalog::demo();
        let engine = ScoringEngine::new();

        let first = serde_json::to_string(&engine.get_recommendations(&catalog, "4"))
            .expect("serialize first");
        let second = serde_json::to_string(&engine.get_recommendations(&catalog, "4"))
            .expect("serialize second");

        assert_eq!(first, second);
    }

    #[test]
    fn two_product_scenario_scores_cross_category_pair() {
        let catalog = Catalog::new(vec![
            product("1", "Watches", 4.8, 1200, 299.99),
            product("2", "Eyewear", 4.5, 850, 149.99),
        ]);

        let cross = ScoringEngine::new().rank_cross_category(&catalog, "1");

        assert_eq!(ids(&cross), vec!["2"]);
        let score = cross[0].similarity_score.expect("score attached");
        assert!((score - 0.9493).abs() < 1e-3);
    }
}
