use crate::auth::{Claims, ROLE_ADMIN, ROLE_OPERATOR, create_jwt, hash_password, verify_password};
use crate::models::user::{self, Entity as User};
use crate::models::user_profile;
use crate::services::{ServiceError, store_service};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for user: {}", payload.username);

    let user = match user::Entity::find()
        .filter(user::Column::Username.eq(&payload.username))
        .one(&db)
        .await
    {
        Ok(Some(u)) => u,
        _ => {
            tracing::warn!("User not found: {}", payload.username);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response();
        }
    };

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => match create_jwt(&user.username, &user.role) {
            Ok(token) => (StatusCode::OK, Json(json!({ "token": token }))).into_response(),
            Err(e) => {
                tracing::error!("Failed to issue token: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        },
        _ => {
            tracing::warn!("Password verification failed for user: {}", user.username);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid credentials" })),
            )
                .into_response()
        }
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    username: String,
    password: String,
    /// 'admin' or 'operator'; defaults to operator
    role: Option<String>,
    /// Display store the new user will record sales for
    store_id: Option<i32>,
}

/// Bootstrap helper to create users. The very first registration creates an
/// admin regardless of the requested role.
pub async fn register(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let existing = User::find().count(&db).await.unwrap_or(0);

    let role = if existing == 0 {
        ROLE_ADMIN.to_string()
    } else {
        match payload.role.as_deref() {
            None | Some(ROLE_OPERATOR) => ROLE_OPERATOR.to_string(),
            Some(ROLE_ADMIN) => ROLE_ADMIN.to_string(),
            Some(other) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("Unknown role '{}'", other) })),
                )
                    .into_response();
            }
        }
    };

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
    let user = user::ActiveModel {
        username: Set(payload.username),
        password_hash: Set(password_hash),
        role: Set(role),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = match user.insert(&db).await {
        Ok(u) => u,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let profile = user_profile::ActiveModel {
        user_id: Set(saved.id),
        store_id: Set(payload.store_id),
        ..Default::default()
    };
    if let Err(e) = profile.insert(&db).await {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    (
        StatusCode::CREATED,
        Json(json!({ "message": "User created", "user": saved })),
    )
        .into_response()
}

/// Current identity plus the store the operator is bound to, if any.
pub async fn get_me(State(db): State<DatabaseConnection>, claims: Claims) -> impl IntoResponse {
    let store = match store_service::assigned_store(&db, &claims.sub).await {
        Ok(store) => Some(store),
        Err(ServiceError::InvalidState(_)) => None,
        Err(e) => return super::service_error_response(e),
    };

    (
        StatusCode::OK,
        Json(json!({
            "username": claims.sub,
            "role": claims.role,
            "store": store,
        })),
    )
        .into_response()
}
