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
use crate::models::location::{self, Entity as Location};

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    name: String,
    description: Option<String>,
}

pub async fn list_locations(
    State(db): State<DatabaseConnection>,
    _claims: Claims,
) -> impl IntoResponse {
    match Location::find()
        .order_by_asc(location::Column::Name)
        .all(&db)
        .await
    {
        Ok(locations) => (StatusCode::OK, Json(locations)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}

pub async fn create_location(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateLocationRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let model = location::ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description.unwrap_or_default()),
        ..Default::default()
    };

    match model.insert(&db).await {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}

pub async fn delete_location(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    match Location::delete_by_id(id).exec(&db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Location deleted" })),
        )
            .into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}
