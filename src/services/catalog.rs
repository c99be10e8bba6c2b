use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use tracing::error;

use crate::entities::{
    category::{self, Entity as CategoryEntity},
    ingredient::{self, Entity as IngredientEntity},
    product::{self, Entity as ProductEntity},
};
use crate::services::ServiceError;

/// Available products, newest first, each with its category when it has one.
pub async fn list_products<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<(product::Model, Option<category::Model>)>, ServiceError> {
    ProductEntity::find()
        .filter(product::Column::IsAvailable.eq(true))
        .find_also_related(CategoryEntity)
        .order_by_desc(product::Column::CreatedAt)
        .order_by_desc(product::Column::Id)
        .all(db)
        .await
        .map_err(|err| {
            error!(operation = "list_products", error = %err, "Catalog query failed");
            ServiceError::Storage(err)
        })
}

pub async fn list_categories<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<category::Model>, ServiceError> {
    CategoryEntity::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(|err| {
            error!(operation = "list_categories", error = %err, "Catalog query failed");
            ServiceError::Storage(err)
        })
}

/// Available ingredients grouped by their tag, then by name.
pub async fn list_ingredients<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<ingredient::Model>, ServiceError> {
    IngredientEntity::find()
        .filter(ingredient::Column::IsAvailable.eq(true))
        .order_by_asc(ingredient::Column::Category)
        .order_by_asc(ingredient::Column::Name)
        .all(db)
        .await
        .map_err(|err| {
            error!(operation = "list_ingredients", error = %err, "Catalog query failed");
            ServiceError::Storage(err)
        })
}
