use axum::{http::StatusCode, response::Response, routing::get, Json, Router};
use serde_json::json;

use crate::middleware::logging::to_response;

pub fn health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Response {
    to_response(
        (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "message": "Burger house backend is running"
            })),
        ),
        Ok(()),
    )
}
