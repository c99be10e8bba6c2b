use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, EntityTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::entities::{
    order::{self, Entity as OrderEntity},
    order_item::{self, Entity as OrderItemEntity},
    product::Entity as ProductEntity,
};
use crate::services::ServiceError;

/// Reserved product id for build-your-own burgers.
pub const CUSTOM_BUILD_PRODUCT_ID: i32 = 1;

/// Flat price of a custom build. The ingredients payload is never priced.
pub const CUSTOM_BUILD_UNIT_PRICE: Decimal = Decimal::from_parts(1500, 0, 0, false, 2);

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateOrderRequest {
    pub customer_name: Option<String>,
    pub table_number: Option<i32>,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OrderItemRequest {
    pub product_id: i32,
    pub ingredients: Option<String>,
    #[validate(range(min = 1, message = "Quantity should be greater than 0"))]
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CreatedOrder {
    pub order_id: i32,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Copy)]
struct PricedLine {
    unit_price: Decimal,
    total_price: Decimal,
}

/// Creates an order and all of its lines in one transaction.
///
/// The transaction is rolled back when it is dropped uncommitted, so every
/// early return below leaves no trace in the store.
pub async fn create_order<C>(db: &C, request: CreateOrderRequest) -> Result<CreatedOrder, ServiceError>
where
    C: TransactionTrait,
{
    request
        .validate()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let txn = db.begin().await.map_err(|err| {
        warn!(operation = "create_order", error = %err, "Failed to begin transaction");
        ServiceError::Transaction(err)
    })?;

    let mut lines = Vec::with_capacity(request.items.len());
    for item in &request.items {
        let unit_price = unit_price_for(&txn, item.product_id).await?;
        lines.push(PricedLine {
            unit_price,
            total_price: line_total(unit_price, item.quantity),
        });
    }
    let total_amount: Decimal = lines.iter().map(|line| line.total_price).sum();

    let now = Utc::now();
    let new_order = order::ActiveModel {
        customer_name: Set(request.customer_name),
        table_number: Set(request.table_number),
        total_amount: Set(total_amount),
        status: Set(order::Status::Pending),
        notes: Set(request.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let order_id = OrderEntity::insert(new_order)
        .exec(&txn)
        .await
        .map_err(|err| {
            warn!(operation = "create_order", error = %err, "Failed to insert order");
            ServiceError::Storage(err)
        })?
        .last_insert_id;

    for (item, line) in request.items.into_iter().zip(lines) {
        let product_id = item.product_id;
        let new_item = order_item::ActiveModel {
            order_id: Set(order_id),
            product_id: Set(product_id),
            ingredients: Set(item.ingredients),
            quantity: Set(item.quantity),
            unit_price: Set(line.unit_price),
            total_price: Set(line.total_price),
            notes: Set(item.notes),
            created_at: Set(now),
            ..Default::default()
        };
        OrderItemEntity::insert(new_item)
            .exec(&txn)
            .await
            .map_err(|err| {
                warn!(order_id, product_id, error = %err, "Failed to insert order item");
                ServiceError::ItemInsert(err)
            })?;
    }

    txn.commit().await.map_err(|err| {
        warn!(order_id, error = %err, "Failed to commit order");
        ServiceError::Commit(err)
    })?;

    info!(order_id, total_amount = %total_amount, "Order created");
    Ok(CreatedOrder {
        order_id,
        total_amount: total_amount.round_dp(2),
    })
}

/// Custom builds take the placeholder price; everything else is read from
/// the catalog through the caller's transaction.
async fn unit_price_for<C: ConnectionTrait>(db: &C, product_id: i32) -> Result<Decimal, ServiceError> {
    if product_id == CUSTOM_BUILD_PRODUCT_ID {
        return Ok(CUSTOM_BUILD_UNIT_PRICE);
    }

    let product = ProductEntity::find_by_id(product_id)
        .one(db)
        .await
        .map_err(|err| {
            warn!(operation = "create_order", product_id, error = %err, "Failed to look up product price");
            ServiceError::Storage(err)
        })?;

    match product {
        Some(product) => Ok(product.price.round_dp(2)),
        None => {
            warn!(product_id, "Order references unknown product");
            Err(ServiceError::ProductNotFound(product_id))
        }
    }
}

fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    (unit_price * Decimal::from(quantity)).round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i32, quantity: i32) -> OrderItemRequest {
        OrderItemRequest {
            product_id,
            ingredients: None,
            quantity,
            notes: None,
        }
    }

    fn request(items: Vec<OrderItemRequest>) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_name: Some("Ana".to_owned()),
            table_number: Some(4),
            notes: None,
            items,
        }
    }

    #[test]
    fn line_totals_are_exact() {
        let ten = Decimal::new(1000, 2);
        let five_fifty = Decimal::new(550, 2);
        let total = line_total(ten, 2) + line_total(five_fifty, 1);
        assert_eq!(total, Decimal::new(2550, 2));
        assert_eq!(line_total(Decimal::new(10, 2), 3), Decimal::new(30, 2));
    }

    #[test]
    fn custom_build_price_is_fifteen() {
        assert_eq!(CUSTOM_BUILD_UNIT_PRICE, Decimal::new(1500, 2));
        assert_eq!(line_total(CUSTOM_BUILD_UNIT_PRICE, 2), Decimal::new(3000, 2));
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(request(vec![item(1, 1), item(2, 3)]).validate().is_ok());
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let err = request(vec![]).validate().unwrap_err();
        assert!(err.field_errors().contains_key("items"));
        assert!(err.to_string().contains("at least one item"));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        assert!(request(vec![item(2, 0)]).validate().is_err());
        assert!(request(vec![item(2, 1), item(3, -1)]).validate().is_err());
    }

    #[test]
    fn unknown_and_missing_fields_are_rejected() {
        let unknown = serde_json::json!({
            "items": [{"product_id": 2, "quantity": 1}],
            "total_amount": 1.0
        });
        assert!(serde_json::from_value::<CreateOrderRequest>(unknown).is_err());

        let missing_quantity = serde_json::json!({"items": [{"product_id": 2}]});
        assert!(serde_json::from_value::<CreateOrderRequest>(missing_quantity).is_err());

        let missing_items = serde_json::json!({"customer_name": "Ana"});
        assert!(serde_json::from_value::<CreateOrderRequest>(missing_items).is_err());
    }

    #[test]
    fn optional_fields_default_to_none() {
        let body = serde_json::json!({"items": [{"product_id": 1, "quantity": 2}]});
        let parsed: CreateOrderRequest = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.customer_name, None);
        assert_eq!(parsed.items[0].ingredients, None);
        assert_eq!(parsed.items[0].quantity, 2);
    }
}
