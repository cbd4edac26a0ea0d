use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rust_decimal::Decimal;
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::auth::Claims;
use crate::models::location::Entity as Location;
use crate::models::product::{self, Entity as Product};
use crate::models::product_location::Entity as ProductLocation;
use crate::models::stock::{self, Entity as Stock};
use crate::services::sale_service::{self, SaleDraft};
use crate::services::{report_service, store_service};

/// Request body for recording a sale. Items come as parallel arrays; a
/// single-item fallback (`product`/`quantity`/`rate`) is accepted when the
/// arrays are absent.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub customer_name: String,
    #[serde(default)]
    pub customer_mobiles: Vec<String>,
    pub paid_amount: Decimal,
    #[serde(default)]
    pub product_ids: Vec<i32>,
    #[serde(default)]
    pub quantities: Vec<Decimal>,
    #[serde(default)]
    pub rates: Vec<Decimal>,
    #[serde(default)]
    pub locations: Vec<Option<i32>>,
    pub product: Option<i32>,
    pub quantity: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub location: Option<i32>,
}

/// POST /api/sales/new - Record a sale for the operator's assigned store
pub async fn create_sale(
    State(db): State<DatabaseConnection>,
    claims: Claims,
    Json(payload): Json<CreateSaleRequest>,
) -> impl IntoResponse {
    let store = match store_service::assigned_store(&db, &claims.sub).await {
        Ok(store) => store,
        Err(e) => return super::service_error_response(e),
    };

    // Fall back to the single-item fields when arrays were not provided
    let (product_ids, quantities, rates, locations) = if payload.product_ids.is_empty() {
        match (payload.product, payload.quantity, payload.rate) {
            (Some(p), Some(q), Some(r)) => (vec![p], vec![q], vec![r], vec![payload.location]),
            _ => (vec![], vec![], vec![], vec![]),
        }
    } else {
        (
            payload.product_ids,
            payload.quantities,
            payload.rates,
            payload.locations,
        )
    };

    let draft = SaleDraft {
        store_id: store.id,
        customer_name: payload.customer_name,
        mobiles: payload.customer_mobiles,
        paid_amount: payload.paid_amount,
        product_ids,
        quantities,
        rates,
        locations,
    };

    match sale_service::record_sale(&db, draft).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": format!("Sale recorded successfully! Invoice #{}", receipt.invoice.id),
                "invoice": receipt.invoice,
                "items": receipt.items,
            })),
        )
            .into_response(),
        Err(e) => super::service_error_response(e),
    }
}

/// GET /api/sales/new - Everything the sale entry form needs: the catalog
/// with godown stock levels and pick locations, the operator's store, and
/// that store's figures for today.
pub async fn sale_entry_context(
    State(db): State<DatabaseConnection>,
    claims: Claims,
) -> impl IntoResponse {
    let products = match Product::find()
        .order_by_asc(product::Column::Category)
        .order_by_asc(product::Column::Name)
        .all(&db)
        .await
    {
        Ok(p) => p,
        Err(e) => return super::service_error_response(e.into()),
    };

    let locations = match Location::find().all(&db).await {
        Ok(l) => l,
        Err(e) => return super::service_error_response(e.into()),
    };

    // Godown stock per product; an unconfigured godown just means zero stock
    // everywhere on this read-only view
    let mut stock_map: HashMap<i32, Decimal> = HashMap::new();
    if let Ok(godown) = store_service::find_godown(&db).await {
        let stocks = match Stock::find()
            .filter(stock::Column::StoreId.eq(godown.id))
            .all(&db)
            .await
        {
            Ok(s) => s,
            Err(e) => return super::service_error_response(e.into()),
        };
        for s in stocks {
            stock_map.insert(s.product_id, s.quantity);
        }
    }

    // Assigned locations per product
    let mut location_map: HashMap<i32, Vec<i32>> = HashMap::new();
    match ProductLocation::find().all(&db).await {
        Ok(links) => {
            for link in links {
                location_map
                    .entry(link.product_id)
                    .or_default()
                    .push(link.location_id);
            }
        }
        Err(e) => return super::service_error_response(e.into()),
    }

    let product_rows: Vec<serde_json::Value> = products
        .into_iter()
        .map(|p| {
            let stock_quantity = stock_map.get(&p.id).copied().unwrap_or(Decimal::ZERO);
            let location_ids = location_map.get(&p.id).cloned().unwrap_or_default();
            json!({
                "id": p.id,
                "name": p.name,
                "category": p.category,
                "size": p.size,
                "unit": p.unit,
                "stock_quantity": stock_quantity,
                "location_ids": location_ids,
            })
        })
        .collect();

    // Operators without a store still see the page; posting a sale fails
    let user_store = store_service::assigned_store(&db, &claims.sub).await.ok();

    let stats = match &user_store {
        Some(store) => match report_service::store_today_stats(&db, store.id).await {
            Ok(stats) => stats,
            Err(e) => return super::service_error_response(e),
        },
        None => report_service::StoreTodayStats {
            today_sales: Decimal::ZERO,
            today_received: Decimal::ZERO,
            today_due: Decimal::ZERO,
        },
    };

    (
        StatusCode::OK,
        Json(json!({
            "products": product_rows,
            "locations": locations,
            "user_store": user_store,
            "today_sales": stats.today_sales,
            "today_received": stats.today_received,
            "today_due": stats.today_due,
        })),
    )
        .into_response()
}
