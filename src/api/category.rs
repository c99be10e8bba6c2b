use axum::{extract::Extension, http::StatusCode, response::Response, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;

use crate::api::service_error_response;
use crate::entities::category;
use crate::middleware::logging::to_response;
use crate::services::catalog;

pub fn category_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .layer(Extension(db))
}

async fn get_categories(Extension(db): Extension<Arc<DatabaseConnection>>) -> Response {
    match catalog::list_categories(db.as_ref()).await {
        Ok(categories) => {
            let response: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::new).collect();
            to_response((StatusCode::OK, Json(response)), Ok(()))
        }
        Err(err) => service_error_response("list_categories", err),
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct CategoryResponse {
    id: i32,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl CategoryResponse {
    pub(crate) fn new(value: category::Model) -> CategoryResponse {
        CategoryResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            created_at: value.created_at,
        }
    }
}
