use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, error};

use crate::entities::{
    order::{self, Entity as OrderEntity},
    order_item::{self, Entity as OrderItemEntity},
    product::{self, Entity as ProductEntity},
};
use crate::services::ServiceError;

#[derive(Debug, Clone)]
pub struct OrderDetails {
    pub order: order::Model,
    /// Each line with its product, `None` when the product row is gone.
    pub items: Vec<(order_item::Model, Option<product::Model>)>,
}

/// Orders newest first. A missing or empty filter lists everything; any
/// other value is compared for equality with the persisted status.
pub async fn list_orders<C: ConnectionTrait>(
    db: &C,
    status_filter: Option<&str>,
) -> Result<Vec<order::Model>, ServiceError> {
    let mut query = OrderEntity::find();

    match status_filter.filter(|raw| !raw.is_empty()) {
        None => {}
        Some(raw) => match raw.parse::<order::Status>() {
            Ok(status) => query = query.filter(order::Column::Status.eq(status)),
            // Nothing outside the vocabulary is ever persisted.
            Err(_) => {
                debug!(status = raw, "Status filter matches no order");
                return Ok(Vec::new());
            }
        },
    }

    query
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(|err| {
            error!(operation = "list_orders", error = %err, "Order query failed");
            ServiceError::Storage(err)
        })
}

pub async fn get_order_details<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
) -> Result<OrderDetails, ServiceError> {
    let order = OrderEntity::find_by_id(order_id)
        .one(db)
        .await
        .map_err(|err| {
            error!(operation = "get_order_details", order_id, error = %err, "Order query failed");
            ServiceError::Storage(err)
        })?
        .ok_or(ServiceError::OrderNotFound(order_id))?;

    let items = OrderItemEntity::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .find_also_related(ProductEntity)
        .order_by_asc(order_item::Column::Id)
        .all(db)
        .await
        .map_err(|err| {
            error!(operation = "get_order_details", order_id, error = %err, "Order items query failed");
            ServiceError::Storage(err)
        })?;

    Ok(OrderDetails { order, items })
}
