use axum::response::Redirect;

use crate::auth::Claims;

/// Staff land on the admin area; counter operators go straight to sale entry.
pub async fn admin_dashboard(claims: Claims) -> Redirect {
    if claims.is_admin() {
        Redirect::to("/admin/")
    } else {
        Redirect::to("/api/sales/new")
    }
}
