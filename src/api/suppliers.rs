use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use serde::Deserialize;

use crate::auth::Claims;
use crate::models::supplier::{self, Entity as Supplier};

#[derive(Deserialize)]
pub struct CreateSupplierRequest {
    name: String,
    contact: Option<String>,
    address: Option<String>,
}

/// Staff only: the supplier book is not exposed to counter operators.
pub async fn list_suppliers(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    match Supplier::find()
        .order_by_asc(supplier::Column::Name)
        .all(&db)
        .await
    {
        Ok(suppliers) => (StatusCode::OK, Json(suppliers)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}

pub async fn create_supplier(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateSupplierRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let model = supplier::ActiveModel {
        name: Set(payload.name),
        contact: Set(payload.contact.unwrap_or_default()),
        address: Set(payload.address.unwrap_or_default()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    match model.insert(&db).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}
