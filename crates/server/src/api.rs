//! JSON API over the recommendation service.
//!
//! - `GET /api/v1/products`                                  — full catalog
//! - `GET /api/v1/categories`                                — distinct categories
//! - `GET /api/v1/categories/{category}/products`            — exact category match
//! - `GET /api/v1/products/{product_id}/score`               — quality breakdown
//! - `GET /api/v1/recommendations/{product_id}`              — similar + cross-category
//! - `GET /api/v1/recommendations/{product_id}/layout`       — radial diagram geometry
//!
//! Unknown product ids on the recommendations route return an empty
//! recommendation with `200 OK`; the score and layout routes answer `404`.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use storefront_core::recommend::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use storefront_core::{
    InterfaceError, Product, QualityBreakdown, Recommendation, RecommendationLayout,
    RecommendationService,
};
use tracing::info;
use uuid::Uuid;

use crate::cache::RecommendationCache;

#[derive(Clone)]
pub struct ApiState {
    service: Arc<RecommendationService>,
    cache: Arc<RecommendationCache>,
}

impl ApiState {
    pub fn new(service: Arc<RecommendationService>, cache: Arc<RecommendationCache>) -> Self {
        Self { service, cache }
    }

    async fn recommendation(&self, product_id: &str) -> Arc<Recommendation> {
        self.cache.get_or_compute(product_id, || self.service.get_recommendations(product_id)).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
    pub correlation_id: String,
}

impl From<&InterfaceError> for ApiError {
    fn from(error: &InterfaceError) -> Self {
        Self {
            error: error.to_string(),
            message: error.user_message().to_string(),
            correlation_id: error.correlation_id().to_string(),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Default, Deserialize)]
pub struct LayoutQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/categories", get(list_categories))
        .route("/api/v1/categories/{category}/products", get(products_by_category))
        .route("/api/v1/products/{product_id}/score", get(product_score))
        .route("/api/v1/recommendations/{product_id}", get(recommendations))
        .route("/api/v1/recommendations/{product_id}/layout", get(recommendation_layout))
        .with_state(state)
}

pub async fn list_products(State(state): State<ApiState>) -> Json<Vec<Product>> {
    Json(state.service.get_all_products().to_vec())
}

pub async fn list_categories(State(state): State<ApiState>) -> Json<Vec<String>> {
    Json(state.service.get_all_categories())
}

pub async fn products_by_category(
    Path(category): Path<String>,
    State(state): State<ApiState>,
) -> Json<Vec<Product>> {
    Json(state.service.get_products_by_category(&category))
}

pub async fn recommendations(
    Path(product_id): Path<String>,
    State(state): State<ApiState>,
) -> Json<Recommendation> {
    let correlation_id = Uuid::new_v4().to_string();
    let recommendation = state.recommendation(&product_id).await;

    info!(
        event_name = "api.recommendations.served",
        correlation_id = %correlation_id,
        product_id = %product_id,
        found = recommendation.product.is_some(),
        similar = recommendation.similar_products.len(),
        cross_category = recommendation.cross_category_products.len(),
        "recommendations served"
    );

    Json(Recommendation::clone(&recommendation))
}

pub async fn recommendation_layout(
    Path(product_id): Path<String>,
    query: Result<Query<LayoutQuery>, QueryRejection>,
    State(state): State<ApiState>,
) -> ApiResult<RecommendationLayout> {
    let correlation_id = Uuid::new_v4().to_string();
    let Query(query) = query.map_err(|rejection| {
        reject(
            InterfaceError::bad_request(format!("invalid layout query: {}", rejection.body_text()))
                .with_correlation_id(correlation_id.clone()),
        )
    })?;
    let width = query.width.unwrap_or(DEFAULT_CANVAS_WIDTH);
    let height = query.height.unwrap_or(DEFAULT_CANVAS_HEIGHT);

    if !is_valid_dimension(width) || !is_valid_dimension(height) {
        return Err(reject(
            InterfaceError::bad_request("width and height must be positive finite numbers")
                .with_correlation_id(correlation_id),
        ));
    }

    let recommendation = state.recommendation(&product_id).await;
    match RecommendationLayout::compute(&recommendation, width, height) {
        Some(layout) => {
            info!(
                event_name = "api.layout.served",
                correlation_id = %correlation_id,
                product_id = %product_id,
                nodes = layout.nodes.len(),
                "recommendation layout served"
            );
            Ok(Json(layout))
        }
        None => Err(not_found(&product_id, correlation_id)),
    }
}

pub async fn product_score(
    Path(product_id): Path<String>,
    State(state): State<ApiState>,
) -> ApiResult<QualityBreakdown> {
    let correlation_id = Uuid::new_v4().to_string();

    match state.service.explain_product(&product_id) {
        Some(breakdown) => Ok(Json(breakdown)),
        None => Err(not_found(&product_id, correlation_id)),
    }
}

fn is_valid_dimension(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn not_found(product_id: &str, correlation_id: String) -> (StatusCode, Json<ApiError>) {
    info!(
        event_name = "api.product.not_found",
        correlation_id = %correlation_id,
        product_id = %product_id,
        "product not found"
    );
    reject(
        InterfaceError::not_found(format!("product `{product_id}` not found"))
            .with_correlation_id(correlation_id),
    )
}

fn reject(error: InterfaceError) -> (StatusCode, Json<ApiError>) {
    let status = match &error {
        InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError::from(&error)))
}
