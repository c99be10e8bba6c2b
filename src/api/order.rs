use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::api::{product::ProductResponse, service_error_response};
use crate::entities::{order, order_item, product};
use crate::middleware::logging::to_response;
use crate::services::{
    order_reader::{self, OrderDetails},
    order_writer::{self, CreateOrderRequest},
    parse_order_id, status_updater, ServiceError,
};

//ROUTERS
pub fn order_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/orders", get(get_orders).post(create_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", put(update_order_status))
        .layer(Extension(db))
}

//ROUTES
async fn create_order(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return service_error_response(
                "create_order",
                ServiceError::Validation(rejection.body_text()),
            )
        }
    };

    match order_writer::create_order(db.as_ref(), payload).await {
        Ok(created) => to_response(
            (
                StatusCode::CREATED,
                Json(json!({
                    "message": "Order created successfully",
                    "order_id": created.order_id,
                    "total_amount": created.total_amount
                })),
            ),
            Ok(()),
        ),
        Err(err) => service_error_response("create_order", err),
    }
}

async fn get_orders(
    Query(params): Query<OrdersQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Response {
    match order_reader::list_orders(db.as_ref(), params.status.as_deref()).await {
        Ok(orders) => {
            let response: Vec<OrderResponse> = orders
                .into_iter()
                .map(|ord| OrderResponse::new(ord, None))
                .collect();
            to_response((StatusCode::OK, Json(response)), Ok(()))
        }
        Err(err) => service_error_response("list_orders", err),
    }
}

async fn get_order(
    Path(id): Path<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Response {
    let order_id = match parse_order_id(&id) {
        Ok(order_id) => order_id,
        Err(err) => return service_error_response("get_order_details", err),
    };

    match order_reader::get_order_details(db.as_ref(), order_id).await {
        Ok(OrderDetails { order, items }) => {
            let items = items
                .into_iter()
                .map(|(item, prod)| OrderItemResponse::new(item, prod))
                .collect();
            to_response(
                (StatusCode::OK, Json(OrderResponse::new(order, Some(items)))),
                Ok(()),
            )
        }
        Err(err) => service_error_response("get_order_details", err),
    }
}

async fn update_order_status(
    Path(id): Path<String>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Response {
    let order_id = match parse_order_id(&id) {
        Ok(order_id) => order_id,
        Err(err) => return service_error_response("update_status", err),
    };
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return service_error_response(
                "update_status",
                ServiceError::Validation(rejection.body_text()),
            )
        }
    };

    match status_updater::update_status(db.as_ref(), order_id, &payload.status).await {
        Ok(_) => to_response(
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Status updated successfully"
                })),
            ),
            Ok(()),
        ),
        Err(err) => service_error_response("update_status", err),
    }
}

//Structs
#[derive(Deserialize)]
struct OrdersQuery {
    status: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct UpdateStatusRequest {
    status: String,
}

#[derive(Serialize)]
struct OrderResponse {
    id: i32,
    customer_name: Option<String>,
    table_number: Option<i32>,
    total_amount: Decimal,
    status: order::Status,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<Vec<OrderItemResponse>>,
}

impl OrderResponse {
    fn new(value: order::Model, items: Option<Vec<OrderItemResponse>>) -> OrderResponse {
        OrderResponse {
            id: value.id,
            customer_name: value.customer_name,
            table_number: value.table_number,
            total_amount: value.total_amount.round_dp(2),
            status: value.status,
            notes: value.notes,
            created_at: value.created_at,
            updated_at: value.updated_at,
            items,
        }
    }
}

#[derive(Serialize)]
struct OrderItemResponse {
    id: i32,
    order_id: i32,
    product_id: i32,
    product: ProductResponse,
    ingredients: Option<String>,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl OrderItemResponse {
    fn new(value: order_item::Model, prod: Option<product::Model>) -> OrderItemResponse {
        OrderItemResponse {
            id: value.id,
            order_id: value.order_id,
            product_id: value.product_id,
            // Left join: a deleted product renders as a zeroed record.
            product: prod
                .map(|prod| ProductResponse::new(prod, None))
                .unwrap_or_default(),
            ingredients: value.ingredients,
            quantity: value.quantity,
            unit_price: value.unit_price.round_dp(2),
            total_price: value.total_price.round_dp(2),
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}
