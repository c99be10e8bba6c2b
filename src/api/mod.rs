pub mod category;
pub mod health;
pub mod ingredient;
pub mod order;
pub mod product;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware::from_fn,
    response::Response,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::middleware::logging::{logging_middleware, to_response, ApiError};
use crate::services::ServiceError;
use category::category_router;
use health::health_router;
use ingredient::ingredient_router;
use order::order_router;
use product::product_router;

pub fn create_api_router(shared_db: Arc<DatabaseConnection>) -> Router {
    let api = Router::new()
        .merge(product_router(shared_db.clone()))
        .merge(category_router(shared_db.clone()))
        .merge(ingredient_router(shared_db.clone()))
        .merge(order_router(shared_db));

    Router::new()
        .nest("/api", api)
        .merge(health_router())
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// CORS policy for the ordering and kitchen front-ends.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| {
            // A wildcard cannot be combined with credentials.
            let wildcard = origin.trim() == "*";
            if wildcard {
                warn!("Ignoring wildcard CORS origin, list explicit origins instead");
            }
            !wildcard
        })
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}

pub(crate) fn status_code_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::OrderNotFound(_) => StatusCode::NOT_FOUND,
        err if err.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders `{"error": ...}` with the public message and hands the full
/// diagnostic to the logging middleware.
pub(crate) fn service_error_response(operation: &'static str, err: ServiceError) -> Response {
    to_response(
        (
            status_code_for(&err),
            Json(json!({
                "error": err.public_message()
            })),
        ),
        Err(ApiError::from_service(operation, &err)),
    )
}
