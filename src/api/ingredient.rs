use axum::{extract::Extension, http::StatusCode, response::Response, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;

use crate::api::service_error_response;
use crate::entities::ingredient;
use crate::middleware::logging::to_response;
use crate::services::catalog;

pub fn ingredient_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/ingredients", get(get_ingredients))
        .layer(Extension(db))
}

async fn get_ingredients(Extension(db): Extension<Arc<DatabaseConnection>>) -> Response {
    match catalog::list_ingredients(db.as_ref()).await {
        Ok(ingredients) => {
            let response: Vec<IngredientResponse> =
                ingredients.into_iter().map(IngredientResponse::new).collect();
            to_response((StatusCode::OK, Json(response)), Ok(()))
        }
        Err(err) => service_error_response("list_ingredients", err),
    }
}

#[derive(Serialize)]
struct IngredientResponse {
    id: i32,
    name: String,
    price: Decimal,
    category: String,
    is_available: bool,
    created_at: DateTime<Utc>,
}

impl IngredientResponse {
    fn new(value: ingredient::Model) -> IngredientResponse {
        IngredientResponse {
            id: value.id,
            name: value.name,
            price: value.price.round_dp(2),
            category: value.category,
            is_available: value.is_available,
            created_at: value.created_at,
        }
    }
}
