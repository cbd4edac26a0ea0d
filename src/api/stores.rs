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
use crate::models::store::{self, Entity as Store, STORE_TYPE_DISPLAY, STORE_TYPE_GODOWN};

#[derive(Deserialize)]
pub struct CreateStoreRequest {
    name: String,
    store_type: String,
}

pub async fn list_stores(
    State(db): State<DatabaseConnection>,
    _claims: Claims,
) -> impl IntoResponse {
    match Store::find()
        .order_by_asc(store::Column::Name)
        .all(&db)
        .await
    {
        Ok(stores) => (StatusCode::OK, Json(stores)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}

pub async fn create_store(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateStoreRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    if payload.store_type != STORE_TYPE_DISPLAY && payload.store_type != STORE_TYPE_GODOWN {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "store_type must be 'DISPLAY' or 'GODOWN'" })),
        )
            .into_response();
    }

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let model = store::ActiveModel {
        name: Set(payload.name),
        store_type: Set(payload.store_type),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match model.insert(&db).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}

pub async fn delete_store(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    match Store::delete_by_id(id).exec(&db).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "message": "Store deleted" }))).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}
