use storefront_core::recommend::similarity_label;
use storefront_core::{Product, Recommendation};

use crate::commands::{format_price, load_service, CommandResult};

pub fn run(product_id: &str, json_output: bool) -> CommandResult {
    let service = match load_service("recommend") {
        Ok(service) => service,
        Err(result) => return result,
    };

    let recommendation = service.get_recommendations(product_id);
    let message = match &recommendation.product {
        Some(product) => format!(
            "{} similar and {} cross-category product(s) for `{}`",
            recommendation.similar_products.len(),
            recommendation.cross_category_products.len(),
            product.id
        ),
        None => format!("no product found for id `{product_id}`"),
    };

    if json_output {
        return CommandResult::success_with_data("recommend", message, &recommendation);
    }

    CommandResult { exit_code: 0, output: render_human(product_id, &recommendation) }
}

pub fn render_human(product_id: &str, recommendation: &Recommendation) -> String {
    let Some(selected) = &recommendation.product else {
        return format!("no product found for id `{product_id}`");
    };

    let mut lines = vec![format!(
        "recommendations for {} ({}, {}, {})",
        selected.id,
        selected.name,
        selected.category,
        format_price(selected.price)
    )];

    lines.push("same category:".to_string());
    push_ranked(&mut lines, &recommendation.similar_products);
    lines.push("cross category:".to_string());
    push_ranked(&mut lines, &recommendation.cross_category_products);

    lines.join("\n")
}

fn push_ranked(lines: &mut Vec<String>, products: &[Product]) {
    if products.is_empty() {
        lines.push("  (none)".to_string());
        return;
    }

    for (rank, product) in products.iter().enumerate() {
        let label = product.similarity_score.map(similarity_label).unwrap_or_default();
        lines.push(format!(
            "  {}. {} [{}] {} - {}",
            rank + 1,
            product.name,
            product.category,
            format_price(product.price),
            label
        ));
    }
}
