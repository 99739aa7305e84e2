//! Per-factor breakdown of a product's quality score

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

use super::scoring::{normalize_price, normalize_purchases, normalize_rating, ScoreCalculator};

/// One input to the composite quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Rating,
    Purchases,
    Price,
}

impl Factor {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Factor::Rating => "Highly rated by customers",
            Factor::Purchases => "Popular with many buyers",
            Factor::Price => "Affordable for its quality",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: Factor,
    /// Raw product field the factor was derived from
    pub raw: f64,
    pub normalized: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Breakdown of a product's composite score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityBreakdown {
    pub product_id: String,
    pub product_name: String,
    pub factors: Vec<FactorContribution>,
    pub total: f64,
}

impl QualityBreakdown {
    pub fn compute(calculator: &ScoreCalculator, product: &Product) -> Self {
        let weights = calculator.weights();
        let factors = vec![
            contribution(
                Factor::Rating,
                product.rating,
                normalize_rating(product.rating),
                weights.rating,
            ),
            contribution(
                Factor::Purchases,
                product.users_purchased as f64,
                normalize_purchases(product.users_purchased),
                weights.purchases,
            ),
            contribution(
                Factor::Price,
                product.price,
                normalize_price(product.price),
                weights.price,
            ),
        ];

        Self {
            product_id: product.id.0.clone(),
            product_name: product.name.clone(),
            factors,
            total: calculator.quality_score(product),
        }
    }

    /// Factor with the largest weighted contribution; the earliest wins ties.
    pub fn dominant_factor(&self) -> Option<Factor> {
        self.factors
            .iter()
            .fold(None::<&FactorContribution>, |best, current| match best {
                Some(best) if best.contribution >= current.contribution => Some(best),
                _ => Some(current),
            })
            .map(|contribution| contribution.factor)
    }
}

fn contribution(factor: Factor, raw: f64, normalized: f64, weight: f64) -> FactorContribution {
    FactorContribution { factor, raw, normalized, weight, contribution: normalized * weight }
}

/// Similarity as a whole percentage, rounded half up.
pub fn similarity_percent(score: f64) -> i64 {
    (score * 100.0 + 0.5).floor() as i64
}

/// Card label such as `"Similarity: 95%"`.
pub fn similarity_label(score: f64) -> String {
    format!("Similarity: {}%", similarity_percent(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn breakdown_total_equals_quality_score() {
        let calculator = ScoreCalculator::new();

        for product in Catalog::demo().products() {
            let breakdown = QualityBreakdown::compute(&calculator, product);
            let summed: f64 = breakdown.factors.iter().map(|factor| factor.contribution).sum();

            assert!((breakdown.total - calculator.quality_score(product)).abs() < 1e-12);
            assert!((summed - breakdown.total).abs() < 1e-9);
        }
    }

    #[test]
    fn breakdown_reports_normalized_inputs() {
        let catalog = Catalog::demo();
        let watch = catalog.find("1").expect("watch in demo catalog");

        let breakdown = QualityBreakdown::compute(&ScoreCalculator::new(), watch);

        assert_eq!(breakdown.product_id, "1");
        assert_eq!(breakdown.factors.len(), 3);
        assert!((breakdown.factors[0].normalized - 0.96).abs() < 1e-12);
        assert!((breakdown.factors[1].normalized - 0.4).abs() < 1e-12);
        assert!((breakdown.factors[2].normalized - 0.80000667).abs() < 1e-6);
        assert_eq!(breakdown.dominant_factor(), Some(Factor::Rating));
    }

    #[test]
    fn smartphone_is_dominated_by_purchases() {
        let catalog = Catalog::demo();
        let phone = catalog.find("5").expect("phone in demo catalog");

        let breakdown = QualityBreakdown::compute(&ScoreCalculator::new(), phone);

        // 3000 buyers saturates to 0.4, rating gives 0.392
        assert_eq!(breakdown.dominant_factor(), Some(Factor::Purchases));
    }

    #[test]
    fn similarity_label_rounds_to_whole_percent() {
        assert_eq!(similarity_percent(0.9493), 95);
        assert_eq!(similarity_percent(1.0), 100);
        assert_eq!(similarity_percent(0.004), 0);
        assert_eq!(similarity_label(0.8827), "Similarity: 88%");
    }
}
