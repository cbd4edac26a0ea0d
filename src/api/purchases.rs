use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::auth::Claims;
use crate::models::product::{self, Entity as Product};
use crate::models::purchase::{self, Entity as Purchase};
use crate::models::supplier::{self, Entity as Supplier};
use crate::services::purchase_service::{self, PurchaseDraft};

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    pub supplier_name: String,
    pub invoice_number: Option<String>,
    pub product: i32,
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// POST /api/purchase/new - Record a supplier purchase and add the quantity
/// to godown stock. Staff only.
pub async fn create_purchase(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreatePurchaseRequest>,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let draft = PurchaseDraft {
        supplier_name: payload.supplier_name,
        invoice_number: payload.invoice_number,
        product_id: payload.product,
        quantity: payload.quantity,
        rate: payload.rate,
    };

    match purchase_service::record_purchase(&db, draft).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": format!(
                    "Purchase recorded! Stock added to Godown. Purchase ID: {}",
                    receipt.purchase.id
                ),
                "purchase": receipt.purchase,
                "item": receipt.item,
                "supplier": receipt.supplier,
            })),
        )
            .into_response(),
        Err(e) => super::service_error_response(e),
    }
}

/// GET /api/purchase/new - Context for the purchase entry form: the catalog,
/// known suppliers and the ten most recent purchases. Staff only.
pub async fn purchase_entry_context(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    if let Err(rejection) = claims.require_admin() {
        return rejection.into_response();
    }

    let products = match Product::find()
        .order_by_asc(product::Column::Name)
        .all(&db)
        .await
    {
        Ok(p) => p,
        Err(e) => return super::service_error_response(e.into()),
    };

    let suppliers = match Supplier::find()
        .order_by_asc(supplier::Column::Name)
        .all(&db)
        .await
    {
        Ok(s) => s,
        Err(e) => return super::service_error_response(e.into()),
    };

    let recent = match Purchase::find()
        .order_by_desc(purchase::Column::Date)
        .order_by_desc(purchase::Column::Id)
        .limit(10)
        .find_also_related(Supplier)
        .all(&db)
        .await
    {
        Ok(p) => p,
        Err(e) => return super::service_error_response(e.into()),
    };

    let recent_purchases: Vec<serde_json::Value> = recent
        .into_iter()
        .map(|(p, s)| {
            json!({
                "id": p.id,
                "supplier_name": s.map(|s| s.name),
                "date": p.date,
                "invoice_number": p.invoice_number,
                "total_amount": p.total_amount,
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "products": products,
            "suppliers": suppliers,
            "recent_purchases": recent_purchases,
        })),
    )
        .into_response()
}
