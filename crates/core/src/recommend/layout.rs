//! Radial layout of a recommendation: the selected product in the center,
//! same-category products fanned across the left half-circle (angles
//! between π/2 and 3π/2) and cross-category products across the right one.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::recommendation::Recommendation;

pub const DEFAULT_CANVAS_WIDTH: f64 = 400.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 300.0;

const SELECTED_LABEL_CHARS: usize = 10;
const NEIGHBOR_LABEL_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeGroup {
    Selected,
    SameCategory,
    CrossCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub product_id: String,
    pub label: String,
    pub group: NodeGroup,
    pub x: f64,
    pub y: f64,
    pub similarity_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLayout {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub nodes: Vec<LayoutNode>,
}

impl RecommendationLayout {
    /// Returns `None` when the recommendation has no selected product.
    pub fn compute(recommendation: &Recommendation, width: f64, height: f64) -> Option<Self> {
        let selected = recommendation.product.as_ref()?;
        let (center_x, center_y) = (width / 2.0, height / 2.0);
        let radius = width.min(height) / 4.0;

        let mut nodes = Vec::with_capacity(
            1 + recommendation.similar_products.len()
                + recommendation.cross_category_products.len(),
        );
        nodes.push(LayoutNode {
            product_id: selected.id.0.clone(),
            label: truncate_label(&selected.name, SELECTED_LABEL_CHARS),
            group: NodeGroup::Selected,
            x: center_x,
            y: center_y,
            similarity_score: None,
        });

        let arcs = [
            (&recommendation.similar_products, PI / 2.0, NodeGroup::SameCategory),
            (&recommendation.cross_category_products, PI * 3.0 / 2.0, NodeGroup::CrossCategory),
        ];
        for (products, start_angle, group) in arcs {
            nodes.extend(arc_nodes(products, start_angle, group, (center_x, center_y), radius));
        }

        Some(Self { width, height, radius, nodes })
    }

    pub fn nodes_in(&self, group: NodeGroup) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(move |node| node.group == group)
    }
}

fn arc_nodes(
    products: &[Product],
    start_angle: f64,
    group: NodeGroup,
    (center_x, center_y): (f64, f64),
    radius: f64,
) -> Vec<LayoutNode> {
    let angle_step = PI / (products.len() as f64 + 1.0);

    products
        .iter()
        .enumerate()
        .map(|(index, product)| {
            let angle = start_angle + angle_step * (index as f64 + 1.0);
            LayoutNode {
                product_id: product.id.0.clone(),
                label: truncate_label(&product.name, NEIGHBOR_LABEL_CHARS),
                group,
                x: center_x + radius * angle.cos(),
                y: center_y + radius * angle.sin(),
                similarity_score: product.similarity_score,
            }
        })
        .collect()
}

fn truncate_label(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::recommend::ScoringEngine;

    fn layout_for(product_id: &str) -> RecommendationLayout {
        let recommendation = ScoringEngine::new().get_recommendations(&Catalog::demo(), product_id);
        RecommendationLayout::compute(&recommendation, DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
            .expect("layout for known product")
    }

    #[test]
    fn unknown_product_has_no_layout() {
        let layout = RecommendationLayout::compute(&Recommendation::empty(), 400.0, 300.0);

        assert!(layout.is_none());
    }

    #[test]
    fn selected_node_sits_in_the_center_with_short_label() {
        let layout = layout_for("2");
        let selected = &layout.nodes[0];

        assert_eq!(selected.group, NodeGroup::Selected);
        assert_eq!((selected.x, selected.y), (200.0, 150.0));
        assert_eq!(selected.label, "Designer S");
        assert_eq!(layout.radius, 75.0);
    }

    #[test]
    fn single_similar_node_lands_straight_left() {
        // one node: angle = pi/2 + pi/2 = pi
        let layout = layout_for("6");
        let similar: Vec<_> = layout.nodes_in(NodeGroup::SameCategory).collect();

        assert_eq!(similar.len(), 1);
        assert!((similar[0].x - 125.0).abs() < 1e-9);
        assert!((similar[0].y - 150.0).abs() < 1e-9);
        assert_eq!(similar[0].label, "Dress Sh");
        assert!(similar[0].similarity_score.is_some());
    }

    #[test]
    fn every_neighbor_is_on_the_circle() {
        let layout = layout_for("8");

        assert_eq!(layout.nodes_in(NodeGroup::CrossCategory).count(), 4);
        for node in layout.nodes.iter().skip(1) {
            let distance = ((node.x - 200.0).powi(2) + (node.y - 150.0).powi(2)).sqrt();
            assert!((distance - layout.radius).abs() < 1e-9);
        }
    }

    #[test]
    fn same_category_fans_left_and_cross_category_fans_right() {
        let layout = layout_for("8");
        let center_x = DEFAULT_CANVAS_WIDTH / 2.0;

        assert!(layout.nodes_in(NodeGroup::SameCategory).all(|node| node.x < center_x));
        assert!(layout.nodes_in(NodeGroup::CrossCategory).all(|node| node.x > center_x));
    }

    #[test]
    fn labels_truncate_on_characters_not_bytes() {
        assert_eq!(truncate_label("Über Ständer", 8), "Über Stä");
        assert_eq!(truncate_label("Bag", 8), "Bag");
    }
}
