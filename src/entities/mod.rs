pub mod category;
pub mod ingredient;
pub mod order;
pub mod order_item;
pub mod product;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, PaginatorTrait, Schema, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entities::{
    category::Entity as Category, ingredient::Entity as Ingredient, order::Entity as Order,
    order_item::Entity as OrderItem, product::Entity as Product,
};
use crate::services::order_writer::{CUSTOM_BUILD_PRODUCT_ID, CUSTOM_BUILD_UNIT_PRICE};

/// Creates every table that does not exist yet. Tables are created in
/// foreign key order so postgres accepts the references.
pub async fn setup_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, Category).await?;
    create_table(db, Product).await?;
    create_table(db, Ingredient).await?;
    create_table(db, Order).await?;
    create_table(db, OrderItem).await?;
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await.map(|_| ())
}

/// Inserts the starter menu when the products table is empty.
///
/// The custom-build product is written with [`CUSTOM_BUILD_PRODUCT_ID`]
/// even when the table was emptied after earlier inserts, so order lines
/// that reference it satisfy the `order_items.product_id` foreign key.
/// Returns `true` when rows were written.
pub async fn seed_catalog<C>(db: &C) -> Result<bool, DbErr>
where
    C: ConnectionTrait + TransactionTrait,
{
    if Product::find().count(db).await? > 0 {
        return Ok(false);
    }

    let now = Utc::now();
    let txn = db.begin().await?;

    let burgers = new_category("Burgers", "House burgers and the build-your-own option")
        .insert(&txn)
        .await?;
    let sides = new_category("Sides", "Fries, rings and other companions")
        .insert(&txn)
        .await?;
    let drinks = new_category("Drinks", "Sodas and juices").insert(&txn).await?;

    let custom = product::ActiveModel {
        id: Set(CUSTOM_BUILD_PRODUCT_ID),
        name: Set("Build your own burger".to_owned()),
        description: Set(Some(
            "Pick your bun, patty, cheese and sauces".to_owned(),
        )),
        price: Set(CUSTOM_BUILD_UNIT_PRICE),
        category_id: Set(Some(burgers.id)),
        image_url: Set(None),
        is_available: Set(true),
        created_at: Set(now),
    };
    Product::insert(custom).exec(&txn).await?;
    if txn.get_database_backend() == DbBackend::Postgres {
        // An explicit id does not advance the serial sequence.
        txn.execute_unprepared(
            "SELECT setval(pg_get_serial_sequence('products', 'id'), \
             (SELECT MAX(id) FROM products))",
        )
        .await?;
    }

    let products = [
        ("Classic Burger", "Beef patty, cheddar, lettuce and tomato", 2290, burgers.id),
        ("Cheese Bacon", "Double cheddar with crispy bacon", 2750, burgers.id),
        ("French Fries", "Crispy potato fries", 1200, sides.id),
        ("Onion Rings", "Battered onion rings", 1400, sides.id),
        ("Soda", "Can, 350ml", 650, drinks.id),
        ("Natural Juice", "Orange or lemon, 500ml", 900, drinks.id),
    ]
    .into_iter()
    .map(|(name, description, cents, category_id)| product::ActiveModel {
        name: Set(name.to_owned()),
        description: Set(Some(description.to_owned())),
        price: Set(Decimal::new(cents, 2)),
        category_id: Set(Some(category_id)),
        image_url: Set(None),
        is_available: Set(true),
        created_at: Set(now),
        ..Default::default()
    });
    Product::insert_many(products).exec(&txn).await?;

    let ingredients = [
        ("Brioche bun", 300, "bun"),
        ("Sesame bun", 250, "bun"),
        ("Beef patty", 800, "patty"),
        ("Chicken patty", 700, "patty"),
        ("Cheddar", 350, "cheese"),
        ("Mozzarella", 300, "cheese"),
        ("House sauce", 200, "sauce"),
        ("Barbecue sauce", 200, "sauce"),
        ("Lettuce", 100, "vegetable"),
        ("Tomato", 100, "vegetable"),
    ]
    .into_iter()
    .map(|(name, cents, tag)| ingredient::ActiveModel {
        name: Set(name.to_owned()),
        price: Set(Decimal::new(cents, 2)),
        category: Set(tag.to_owned()),
        is_available: Set(true),
        created_at: Set(now),
        ..Default::default()
    });
    Ingredient::insert_many(ingredients).exec(&txn).await?;

    txn.commit().await?;
    info!("Seeded starter catalog");
    Ok(true)
}

fn new_category(name: &str, description: &str) -> category::ActiveModel {
    category::ActiveModel {
        name: Set(name.to_owned()),
        description: Set(Some(description.to_owned())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}
