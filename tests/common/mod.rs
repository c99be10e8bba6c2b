#![allow(dead_code)]

use chrono::Utc;
use hamburgueria::api::{cors_layer, create_api_router};
use hamburgueria::entities::{order, order_item, product, seed_catalog, setup_schema};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Set,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const FRONTEND_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub address: String,
    pub db: Arc<DatabaseConnection>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_order(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/orders"))
            .json(body)
            .send()
            .await
            .expect("Failed to send create order request")
    }

    pub async fn put_status(&self, order_id: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(&format!("/api/orders/{}/status", order_id)))
            .json(body)
            .send()
            .await
            .expect("Failed to send update status request")
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send get request");
        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .expect("Failed to parse response JSON");
        (status, body)
    }

    pub async fn order_count(&self) -> u64 {
        order::Entity::find()
            .count(self.db.as_ref())
            .await
            .expect("Failed to count orders")
    }

    pub async fn order_item_count(&self) -> u64 {
        order_item::Entity::find()
            .count(self.db.as_ref())
            .await
            .expect("Failed to count order items")
    }

    /// Adds an available product outside the seeded menu.
    pub async fn insert_product(&self, name: &str, cents: i64) -> i32 {
        product::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(None),
            price: Set(Decimal::new(cents, 2)),
            category_id: Set(None),
            image_url: Set(None),
            is_available: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .expect("Failed to insert product")
        .id
    }
}

/// Serves the full router on an ephemeral port, backed by a fresh
/// in-memory database with the starter catalog.
pub async fn spawn_app() -> TestApp {
    // One connection: every pooled connection would otherwise get its own
    // empty in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");
    seed_catalog(&db).await.expect("Failed to seed catalog");

    let db = Arc::new(db);
    let app = create_api_router(db.clone()).layer(cors_layer(&[FRONTEND_ORIGIN.to_owned()]));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    TestApp {
        address,
        db,
        client: reqwest::Client::new(),
    }
}
