use serde::Serialize;
use storefront_core::QualityBreakdown;

use crate::commands::{load_service, CommandResult};

#[derive(Debug, Serialize)]
struct ExplainReport {
    product: Option<QualityBreakdown>,
    dominant_factor: Option<&'static str>,
}

pub fn run(product_id: &str) -> CommandResult {
    let service = match load_service("explain") {
        Ok(service) => service,
        Err(result) => return result,
    };

    let breakdown = service.explain_product(product_id);
    let message = match &breakdown {
        Some(breakdown) => {
            format!("quality score {:.4} for `{}`", breakdown.total, breakdown.product_id)
        }
        None => format!("no product found for id `{product_id}`"),
    };
    let dominant_factor = breakdown
        .as_ref()
        .and_then(QualityBreakdown::dominant_factor)
        .map(|factor| factor.description());

    CommandResult::success_with_data(
        "explain",
        message,
        &ExplainReport { product: breakdown, dominant_factor },
    )
}
