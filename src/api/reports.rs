use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::DatabaseConnection;

use crate::auth::Claims;
use crate::services::report_service;

/// GET /api/sales/summary - Today's aggregate figures and per-store detail.
/// Staff only. Profit is sales minus purchase spend, nothing fancier.
pub async fn sales_summary(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    match report_service::daily_summary(&db).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => super::service_error_response(e),
    }
}
