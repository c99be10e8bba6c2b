use axum::{extract::Extension, http::StatusCode, response::Response, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;

use crate::api::{category::CategoryResponse, service_error_response};
use crate::entities::{category, product};
use crate::middleware::logging::to_response;
use crate::services::catalog;

pub fn product_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/products", get(get_products))
        .layer(Extension(db))
}

async fn get_products(Extension(db): Extension<Arc<DatabaseConnection>>) -> Response {
    match catalog::list_products(db.as_ref()).await {
        Ok(products) => {
            let response: Vec<ProductResponse> = products
                .into_iter()
                .map(|(prod, categ)| ProductResponse::new(prod, categ))
                .collect();
            to_response((StatusCode::OK, Json(response)), Ok(()))
        }
        Err(err) => service_error_response("list_products", err),
    }
}

/// Product as rendered to clients. The `Default` value is the zeroed
/// record shown for order lines whose product no longer exists.
#[derive(Serialize, Debug, Default)]
pub(crate) struct ProductResponse {
    id: i32,
    name: String,
    description: Option<String>,
    price: Decimal,
    category_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CategoryResponse>,
    image_url: Option<String>,
    is_available: bool,
    created_at: DateTime<Utc>,
}

impl ProductResponse {
    pub(crate) fn new(value: product::Model, category: Option<category::Model>) -> ProductResponse {
        ProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price.round_dp(2),
            category_id: value.category_id,
            category: category.map(CategoryResponse::new),
            image_url: value.image_url,
            is_available: value.is_available,
            created_at: value.created_at,
        }
    }
}
