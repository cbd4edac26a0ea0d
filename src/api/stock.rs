use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::models::product::Entity as Product;
use crate::models::stock::{self, Entity as Stock};
use crate::models::store::{self, Entity as Store, STORE_TYPE_GODOWN};

#[derive(Deserialize)]
pub struct SetStockRequest {
    product_id: i32,
    store_id: i32,
    quantity: Decimal,
}

/// GET /api/stock - Current stock rows with product and store names.
/// Staff only.
pub async fn list_stock(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let rows = match Stock::find().find_also_related(Product).all(&db).await {
        Ok(rows) => rows,
        Err(e) => return super::service_error_response(e.into()),
    };

    let stores = match Store::find().all(&db).await {
        Ok(s) => s,
        Err(e) => return super::service_error_response(e.into()),
    };

    let result: Vec<serde_json::Value> = rows
        .into_iter()
        .map(|(s, product)| {
            let store_name = stores
                .iter()
                .find(|st| st.id == s.store_id)
                .map(|st| st.name.clone());
            json!({
                "id": s.id,
                "product_id": s.product_id,
                "product_name": product.as_ref().map(|p| p.name.clone()),
                "unit": product.as_ref().map(|p| p.unit.clone()),
                "store_id": s.store_id,
                "store_name": store_name,
                "quantity": s.quantity,
            })
        })
        .collect();

    (StatusCode::OK, Json(result)).into_response()
}

/// POST /api/stock - Set the quantity for a (product, store) pair, creating
/// the row if needed. Stock can only be maintained for the central godown.
pub async fn set_stock(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<SetStockRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    if payload.quantity < Decimal::ZERO {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Quantity cannot be negative" })),
        )
            .into_response();
    }

    let target_store = match Store::find_by_id(payload.store_id).one(&db).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Store not found" })),
            )
                .into_response();
        }
        Err(e) => return super::service_error_response(e.into()),
    };

    if target_store.store_type != STORE_TYPE_GODOWN {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Stock can only be maintained for the central godown." })),
        )
            .into_response();
    }

    match Product::find_by_id(payload.product_id).one(&db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Product not found" })),
            )
                .into_response();
        }
        Err(e) => return super::service_error_response(e.into()),
    }

    let existing = match Stock::find()
        .filter(stock::Column::ProductId.eq(payload.product_id))
        .filter(stock::Column::StoreId.eq(payload.store_id))
        .one(&db)
        .await
    {
        Ok(row) => row,
        Err(e) => return super::service_error_response(e.into()),
    };

    let saved = match existing {
        Some(row) => {
            let mut active: stock::ActiveModel = row.into();
            active.quantity = Set(payload.quantity);
            active.update(&db).await
        }
        None => stock::ActiveModel {
            product_id: Set(payload.product_id),
            store_id: Set(payload.store_id),
            quantity: Set(payload.quantity),
            ..Default::default()
        }
        .insert(&db)
        .await,
    };

    match saved {
        Ok(row) => (StatusCode::OK, Json(row)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}
