use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::models::product::{self, Entity as Product};
use crate::models::product_location::{self, Entity as ProductLocation};

#[derive(Deserialize)]
pub struct CreateProductRequest {
    name: String,
    category: Option<String>,
    size: String,
    unit: Option<String>,
    description: Option<String>,
    image_path: Option<String>,
    #[serde(default)]
    location_ids: Vec<i32>,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    name: Option<String>,
    category: Option<String>,
    size: Option<String>,
    unit: Option<String>,
    description: Option<String>,
    image_path: Option<String>,
    /// When present, replaces the product's location assignments
    location_ids: Option<Vec<i32>>,
}

pub async fn list_products(
    State(db): State<DatabaseConnection>,
    _claims: Claims,
) -> impl IntoResponse {
    match Product::find()
        .order_by_asc(product::Column::Category)
        .order_by_asc(product::Column::Name)
        .all(&db)
        .await
    {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}

pub async fn get_product(
    State(db): State<DatabaseConnection>,
    _claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let product = match Product::find_by_id(id).one(&db).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Product not found" })),
            )
                .into_response();
        }
        Err(e) => return super::service_error_response(e.into()),
    };

    let location_ids: Vec<i32> = match ProductLocation::find()
        .filter(product_location::Column::ProductId.eq(id))
        .all(&db)
        .await
    {
        Ok(links) => links.into_iter().map(|l| l.location_id).collect(),
        Err(e) => return super::service_error_response(e.into()),
    };

    (
        StatusCode::OK,
        Json(json!({ "product": product, "location_ids": location_ids })),
    )
        .into_response()
}

pub async fn create_product(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateProductRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let model = product::ActiveModel {
        name: Set(payload.name),
        category: Set(payload.category.unwrap_or_else(|| "TILES".to_string())),
        size: Set(payload.size),
        unit: Set(payload.unit.unwrap_or_else(|| "sqft".to_string())),
        description: Set(payload.description),
        image_path: Set(payload.image_path),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = match model.insert(&db).await {
        Ok(p) => p,
        Err(e) => return super::service_error_response(e.into()),
    };

    if let Err(e) = set_locations(&db, saved.id, &payload.location_ids).await {
        return super::service_error_response(e.into());
    }

    (StatusCode::CREATED, Json(saved)).into_response()
}

pub async fn update_product(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let existing = match Product::find_by_id(id).one(&db).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Product not found" })),
            )
                .into_response();
        }
        Err(e) => return super::service_error_response(e.into()),
    };

    let mut active: product::ActiveModel = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(size) = payload.size {
        active.size = Set(size);
    }
    if let Some(unit) = payload.unit {
        active.unit = Set(unit);
    }
    if payload.description.is_some() {
        active.description = Set(payload.description);
    }
    if payload.image_path.is_some() {
        active.image_path = Set(payload.image_path);
    }
    active.updated_at = Set(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string());

    let saved = match active.update(&db).await {
        Ok(p) => p,
        Err(e) => return super::service_error_response(e.into()),
    };

    if let Some(location_ids) = payload.location_ids {
        if let Err(e) = ProductLocation::delete_many()
            .filter(product_location::Column::ProductId.eq(id))
            .exec(&db)
            .await
        {
            return super::service_error_response(e.into());
        }
        if let Err(e) = set_locations(&db, id, &location_ids).await {
            return super::service_error_response(e.into());
        }
    }

    (StatusCode::OK, Json(saved)).into_response()
}

pub async fn delete_product(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    match Product::delete_by_id(id).exec(&db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Product deleted" })),
        )
            .into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}

async fn set_locations(
    db: &DatabaseConnection,
    product_id: i32,
    location_ids: &[i32],
) -> Result<(), DbErr> {
    for location_id in location_ids {
        let link = product_location::ActiveModel {
            product_id: Set(product_id),
            location_id: Set(*location_id),
        };
        ProductLocation::insert(link).exec(db).await?;
    }
    Ok(())
}
