pub mod auth;
pub mod dashboard;
pub mod health;
pub mod locations;
pub mod products;
pub mod purchases;
pub mod reports;
pub mod sales;
pub mod stock;
pub mod stores;
pub mod suppliers;
pub mod users;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::services::ServiceError;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::get_me))
        // Dashboard entry point
        .route("/admin_dashboard", get(dashboard::admin_dashboard))
        // Sales
        .route(
            "/sales/new",
            get(sales::sale_entry_context).post(sales::create_sale),
        )
        .route("/sales/summary", get(reports::sales_summary))
        // Purchases
        .route(
            "/purchase/new",
            get(purchases::purchase_entry_context).post(purchases::create_purchase),
        )
        // Catalog administration
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/stores",
            get(stores::list_stores).post(stores::create_store),
        )
        .route("/stores/:id", axum::routing::delete(stores::delete_store))
        .route(
            "/locations",
            get(locations::list_locations).post(locations::create_location),
        )
        .route(
            "/locations/:id",
            axum::routing::delete(locations::delete_location),
        )
        .route(
            "/suppliers",
            get(suppliers::list_suppliers).post(suppliers::create_supplier),
        )
        // Godown stock administration
        .route("/stock", get(stock::list_stock).post(stock::set_stock))
        // Users and store assignment
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:id/store", put(users::assign_store))
        .with_state(db)
}

/// Map a service error onto an HTTP response. Validation and business-rule
/// failures carry their human-readable message; database errors stay generic.
pub(crate) fn service_error_response(e: ServiceError) -> Response {
    match e {
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Not found" })),
        )
            .into_response(),
        ServiceError::InvalidInput(msg) | ServiceError::InvalidState(msg) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": msg })),
        )
            .into_response(),
        ServiceError::Database(msg) => {
            tracing::error!("Database error: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}
