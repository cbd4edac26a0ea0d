//! Sale Service - validates a multi-line sale against godown stock, then
//! atomically decrements stock and persists the invoice with its line items
//! and contact numbers.

use chrono::Local;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::models::invoice;
use crate::models::invoice_contact;
use crate::models::invoice_item;
use crate::models::location::Entity as Location;
use crate::models::product::{self, Entity as Product};
use crate::models::stock::{self, Entity as Stock};

use super::{ServiceError, store_service};

/// A sale as submitted from the entry form: parallel arrays of product ids,
/// quantities, rates and optional pick locations.
#[derive(Debug, Clone)]
pub struct SaleDraft {
    pub store_id: i32,
    pub customer_name: String,
    pub mobiles: Vec<String>,
    pub paid_amount: Decimal,
    pub product_ids: Vec<i32>,
    pub quantities: Vec<Decimal>,
    pub rates: Vec<Decimal>,
    pub locations: Vec<Option<i32>>,
}

/// One validated line, resolved against the catalog.
#[derive(Debug)]
struct SaleLine {
    product: product::Model,
    quantity: Decimal,
    rate: Decimal,
    location_id: Option<i32>,
}

#[derive(Debug, serde::Serialize)]
pub struct SaleReceipt {
    pub invoice: invoice::Model,
    pub items: Vec<invoice_item::Model>,
}

/// Record a sale. All-or-nothing: any validation failure or write error
/// rolls back the whole transaction; no partial stock decrement, no partial
/// invoice.
pub async fn record_sale(
    db: &DatabaseConnection,
    draft: SaleDraft,
) -> Result<SaleReceipt, ServiceError> {
    let txn = db.begin().await?;

    match record_sale_in(&txn, draft).await {
        Ok(receipt) => {
            txn.commit().await?;
            Ok(receipt)
        }
        Err(e) => {
            txn.rollback().await?;
            Err(e)
        }
    }
}

async fn record_sale_in(
    txn: &DatabaseTransaction,
    draft: SaleDraft,
) -> Result<SaleReceipt, ServiceError> {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let godown = store_service::find_godown(txn).await?;

    if draft.product_ids.is_empty()
        || draft.product_ids.len() != draft.quantities.len()
        || draft.product_ids.len() != draft.rates.len()
    {
        return Err(ServiceError::InvalidInput(
            "Invalid sale items submitted.".to_string(),
        ));
    }

    // Pre-check every line before any write
    let mut total_amount = Decimal::ZERO;
    let mut lines: Vec<SaleLine> = Vec::with_capacity(draft.product_ids.len());

    for (idx, product_id) in draft.product_ids.iter().enumerate() {
        let quantity = draft.quantities[idx];
        let rate = draft.rates[idx];

        if quantity <= Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Quantity must be greater than zero.".to_string(),
            ));
        }
        if rate < Decimal::ZERO {
            return Err(ServiceError::InvalidInput(
                "Rate cannot be negative.".to_string(),
            ));
        }

        let product = Product::find_by_id(*product_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                ServiceError::InvalidInput(format!("Unknown product id {}.", product_id))
            })?;

        let available = godown_quantity(txn, product.id, godown.id).await?;
        if available < quantity {
            return Err(insufficient_stock(&product.name, available));
        }

        // An unknown location id is deliberately treated as "no location"
        let location_id = match draft.locations.get(idx).copied().flatten() {
            Some(id) => Location::find_by_id(id).one(txn).await?.map(|l| l.id),
            None => None,
        };

        total_amount += quantity * rate;
        lines.push(SaleLine {
            product,
            quantity,
            rate,
            location_id,
        });
    }

    let primary_mobile = draft.mobiles.iter().find(|m| !m.is_empty()).cloned();

    let saved_invoice = invoice::ActiveModel {
        store_id: Set(draft.store_id),
        customer_name: Set(draft.customer_name),
        customer_mobile: Set(primary_mobile),
        date: Set(now),
        total_amount: Set(total_amount),
        paid_amount: Set(draft.paid_amount),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    for mobile in &draft.mobiles {
        if !mobile.is_empty() {
            invoice_contact::ActiveModel {
                invoice_id: Set(saved_invoice.id),
                mobile: Set(mobile.clone()),
                ..Default::default()
            }
            .insert(txn)
            .await?;
        }
    }

    // Deduct stock and create invoice items. The decrement is conditional on
    // sufficient quantity so a concurrent sale cannot drive stock negative;
    // zero rows affected means the pre-check result is stale.
    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let res = Stock::update_many()
            .col_expr(
                stock::Column::Quantity,
                Expr::col(stock::Column::Quantity).sub(line.quantity),
            )
            .filter(stock::Column::ProductId.eq(line.product.id))
            .filter(stock::Column::StoreId.eq(godown.id))
            .filter(stock::Column::Quantity.gte(line.quantity))
            .exec(txn)
            .await?;

        if res.rows_affected == 0 {
            let available = godown_quantity(txn, line.product.id, godown.id).await?;
            return Err(insufficient_stock(&line.product.name, available));
        }

        let item = invoice_item::ActiveModel {
            invoice_id: Set(saved_invoice.id),
            product_id: Set(line.product.id),
            quantity: Set(line.quantity),
            rate: Set(line.rate),
            location_id: Set(line.location_id),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        items.push(item);
    }

    Ok(SaleReceipt {
        invoice: saved_invoice,
        items,
    })
}

async fn godown_quantity(
    txn: &DatabaseTransaction,
    product_id: i32,
    godown_id: i32,
) -> Result<Decimal, ServiceError> {
    let row = Stock::find()
        .filter(stock::Column::ProductId.eq(product_id))
        .filter(stock::Column::StoreId.eq(godown_id))
        .one(txn)
        .await?;
    Ok(row.map(|s| s.quantity).unwrap_or(Decimal::ZERO))
}

fn insufficient_stock(product_name: &str, available: Decimal) -> ServiceError {
    ServiceError::InvalidState(format!(
        "Insufficient stock for {}. Available: {}",
        product_name, available
    ))
}
