use crate::auth::{ROLE_ADMIN, ROLE_OPERATOR, hash_password};
use crate::models::{location, product, product_location, stock, store, user, user_profile};
use rust_decimal::Decimal;
use sea_orm::*;

/// Seed a demo dataset: the central godown, two display shops, an admin and
/// a counter operator, a small catalog with shelf locations and opening
/// godown stock. Skipped entirely when any store already exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if store::Entity::find().one(db).await?.is_some() {
        tracing::info!("Stores already present, skipping demo seed");
        return Ok(());
    }

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    // 1. Stores
    let godown = store::ActiveModel {
        name: Set("Central Godown".to_owned()),
        store_type: Set(store::STORE_TYPE_GODOWN.to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let silwani = store::ActiveModel {
        name: Set("Silwani".to_owned()),
        store_type: Set(store::STORE_TYPE_DISPLAY.to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    store::ActiveModel {
        name: Set("Gairatganj".to_owned()),
        store_type: Set(store::STORE_TYPE_DISPLAY.to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 2. Users: one admin (no store), one operator bound to Silwani
    let admin_password = hash_password("admin").map_err(DbErr::Custom)?;
    let operator_password = hash_password("operator").map_err(DbErr::Custom)?;

    let admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        password_hash: Set(admin_password),
        role: Set(ROLE_ADMIN.to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    user_profile::ActiveModel {
        user_id: Set(admin.id),
        store_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let operator = user::ActiveModel {
        username: Set("operator".to_owned()),
        password_hash: Set(operator_password),
        role: Set(ROLE_OPERATOR.to_owned()),
        created_at: Set(now.clone()),
        updated_at: Set(now.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    user_profile::ActiveModel {
        user_id: Set(operator.id),
        store_id: Set(Some(silwani.id)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 3. Locations
    let front_rack = location::ActiveModel {
        name: Set("Front Display Rack".to_owned()),
        description: Set("Customer-facing rack at the entrance".to_owned()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let shelf_a2 = location::ActiveModel {
        name: Set("Back Godown Shelf A2".to_owned()),
        description: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 4. Products with opening stock
    let catalog = [
        ("Glossy White Tile", "TILES", "2x2", "sqft", "500"),
        ("Makrana Marble Slab", "MARBLE", "7x4", "sqft", "120"),
        ("Granite Counter Black", "GRANITE", "6x2", "sqft", "80.5"),
        ("Wall Basin Compact", "SANITARY", "std", "pcs", "25"),
    ];

    for (name, category, size, unit, quantity) in catalog {
        let product = product::ActiveModel {
            name: Set(name.to_owned()),
            category: Set(category.to_owned()),
            size: Set(size.to_owned()),
            unit: Set(unit.to_owned()),
            description: Set(None),
            image_path: Set(None),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        let link = product_location::ActiveModel {
            product_id: Set(product.id),
            location_id: Set(if category == "TILES" {
                front_rack.id
            } else {
                shelf_a2.id
            }),
        };
        product_location::Entity::insert(link).exec(db).await?;

        let quantity: Decimal = quantity
            .parse()
            .map_err(|_| DbErr::Custom(format!("bad seed quantity {quantity}")))?;
        stock::ActiveModel {
            product_id: Set(product.id),
            store_id: Set(godown.id),
            quantity: Set(quantity),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(())
}
