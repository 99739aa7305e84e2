use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Result of a recommendation query for one selected product.
///
/// An unknown product id yields [`Recommendation::empty`], not an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub product: Option<Product>,
    pub similar_products: Vec<Product>,
    pub cross_category_products: Vec<Product>,
}

impl Recommendation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.product.is_none()
            && self.similar_products.is_empty()
            && self.cross_category_products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Recommendation;

    #[test]
    fn empty_recommendation_serializes_with_null_product() {
        let json = serde_json::to_value(Recommendation::empty()).expect("serialize");

        assert!(json["product"].is_null());
        assert_eq!(json["similarProducts"], serde_json::json!([]));
        assert_eq!(json["crossCategoryProducts"], serde_json::json!([]));
        assert!(Recommendation::empty().is_empty());
    }
}
