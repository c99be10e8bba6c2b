use chrono::Utc;
use sea_orm::{sea_query::Expr, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use tracing::{error, info};

use crate::entities::order::{self, Entity as OrderEntity};
use crate::services::ServiceError;

/// Moves an order to `new_status` and touches `updated_at`.
///
/// The status is checked against the vocabulary before the store is
/// reached. An id that matches no row is reported as
/// [`ServiceError::OrderNotFound`].
pub async fn update_status<C: ConnectionTrait>(
    db: &C,
    order_id: i32,
    new_status: &str,
) -> Result<order::Status, ServiceError> {
    let status = new_status
        .parse::<order::Status>()
        .map_err(ServiceError::InvalidStatus)?;

    let result = OrderEntity::update_many()
        .col_expr(order::Column::Status, Expr::value(status))
        .col_expr(order::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(order::Column::Id.eq(order_id))
        .exec(db)
        .await
        .map_err(|err| {
            error!(operation = "update_status", order_id, error = %err, "Status update failed");
            ServiceError::Storage(err)
        })?;

    if result.rows_affected == 0 {
        return Err(ServiceError::OrderNotFound(order_id));
    }

    info!(order_id, status = %status, "Order status updated");
    Ok(status)
}
