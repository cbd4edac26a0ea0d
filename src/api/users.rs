use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{Claims, ROLE_ADMIN, ROLE_OPERATOR, hash_password};
use crate::models::user::{self, Entity as User};
use crate::models::user_profile::{self, Entity as UserProfile};

#[derive(Deserialize)]
pub struct CreateUserRequest {
    username: String,
    password: String,
    role: Option<String>,
    store_id: Option<i32>,
}

#[derive(Deserialize)]
pub struct AssignStoreRequest {
    store_id: Option<i32>,
}

pub async fn list_users(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let users = match User::find().all(&db).await {
        Ok(u) => u,
        Err(e) => return super::service_error_response(e.into()),
    };

    let profiles = match UserProfile::find().all(&db).await {
        Ok(p) => p,
        Err(e) => return super::service_error_response(e.into()),
    };

    let result: Vec<serde_json::Value> = users
        .into_iter()
        .map(|u| {
            let store_id = profiles
                .iter()
                .find(|p| p.user_id == u.id)
                .and_then(|p| p.store_id);
            json!({
                "id": u.id,
                "username": u.username,
                "role": u.role,
                "store_id": store_id,
            })
        })
        .collect();

    (StatusCode::OK, Json(result)).into_response()
}

pub async fn create_user(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let role = payload.role.unwrap_or_else(|| ROLE_OPERATOR.to_string());
    if role != ROLE_ADMIN && role != ROLE_OPERATOR {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Unknown role '{}'", role) })),
        )
            .into_response();
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response();
        }
    };

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let saved = match (user::ActiveModel {
        username: Set(payload.username),
        password_hash: Set(password_hash),
        role: Set(role),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    })
    .insert(&db)
    .await
    {
        Ok(u) => u,
        Err(e) => return super::service_error_response(e.into()),
    };

    let profile = user_profile::ActiveModel {
        user_id: Set(saved.id),
        store_id: Set(payload.store_id),
        ..Default::default()
    };
    if let Err(e) = profile.insert(&db).await {
        return super::service_error_response(e.into());
    }

    (StatusCode::CREATED, Json(saved)).into_response()
}

/// PUT /api/users/:id/store - Bind (or unbind) the store a user operates.
pub async fn assign_store(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Path(id): Path<i32>,
    Json(payload): Json<AssignStoreRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    match User::find_by_id(id).one(&db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "User not found" })),
            )
                .into_response();
        }
        Err(e) => return super::service_error_response(e.into()),
    }

    let existing = match UserProfile::find()
        .filter(user_profile::Column::UserId.eq(id))
        .one(&db)
        .await
    {
        Ok(p) => p,
        Err(e) => return super::service_error_response(e.into()),
    };

    let saved = match existing {
        Some(profile) => {
            let mut active: user_profile::ActiveModel = profile.into();
            active.store_id = Set(payload.store_id);
            active.update(&db).await
        }
        None => user_profile::ActiveModel {
            user_id: Set(id),
            store_id: Set(payload.store_id),
            ..Default::default()
        }
        .insert(&db)
        .await,
    };

    match saved {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(e) => super::service_error_response(e.into()),
    }
}
