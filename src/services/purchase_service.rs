//! Purchase Service - records a supplier purchase line and atomically
//! increments godown stock.

use chrono::Local;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::models::product::Entity as Product;
use crate::models::purchase;
use crate::models::purchase_item;
use crate::models::stock::{self, Entity as Stock};
use crate::models::supplier::{self, Entity as Supplier};

use super::{ServiceError, store_service};

#[derive(Debug, Clone)]
pub struct PurchaseDraft {
    pub supplier_name: String,
    pub invoice_number: Option<String>,
    pub product_id: i32,
    pub quantity: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, serde::Serialize)]
pub struct PurchaseReceipt {
    pub purchase: purchase::Model,
    pub item: purchase_item::Model,
    pub supplier: supplier::Model,
}

/// Record a purchase. Same all-or-nothing semantics as the sale transaction:
/// any error aborts all writes.
pub async fn record_purchase(
    db: &DatabaseConnection,
    draft: PurchaseDraft,
) -> Result<PurchaseReceipt, ServiceError> {
    let txn = db.begin().await?;

    match record_purchase_in(&txn, draft).await {
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

async fn record_purchase_in(
    txn: &DatabaseTransaction,
    draft: PurchaseDraft,
) -> Result<PurchaseReceipt, ServiceError> {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    if draft.supplier_name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "Supplier name is required.".to_string(),
        ));
    }
    if draft.quantity <= Decimal::ZERO {
        return Err(ServiceError::InvalidInput(
            "Quantity must be greater than zero.".to_string(),
        ));
    }
    if draft.rate < Decimal::ZERO {
        return Err(ServiceError::InvalidInput(
            "Rate cannot be negative.".to_string(),
        ));
    }

    let product = Product::find_by_id(draft.product_id)
        .one(txn)
        .await?
        .ok_or_else(|| {
            ServiceError::InvalidInput(format!("Unknown product id {}.", draft.product_id))
        })?;

    // Absent or ambiguous godown is a configuration error, fatal to the request
    let godown = store_service::find_godown(txn).await?;

    // 1. Get or create supplier by exact name
    let supplier = match Supplier::find()
        .filter(supplier::Column::Name.eq(&draft.supplier_name))
        .one(txn)
        .await?
    {
        Some(s) => s,
        None => {
            supplier::ActiveModel {
                name: Set(draft.supplier_name.clone()),
                contact: Set(String::new()),
                address: Set(String::new()),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            }
            .insert(txn)
            .await?
        }
    };

    // 2. Create purchase record
    let total_amount = draft.quantity * draft.rate;
    let saved_purchase = purchase::ActiveModel {
        supplier_id: Set(Some(supplier.id)),
        date: Set(now),
        invoice_number: Set(draft.invoice_number.unwrap_or_default()),
        total_amount: Set(total_amount),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    // 3. Create purchase item
    let item = purchase_item::ActiveModel {
        purchase_id: Set(saved_purchase.id),
        product_id: Set(product.id),
        quantity: Set(draft.quantity),
        rate: Set(draft.rate),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    // 4. Add stock to the godown, creating the row if this product has never
    // been stocked there before
    let res = Stock::update_many()
        .col_expr(
            stock::Column::Quantity,
            Expr::col(stock::Column::Quantity).add(draft.quantity),
        )
        .filter(stock::Column::ProductId.eq(product.id))
        .filter(stock::Column::StoreId.eq(godown.id))
        .exec(txn)
        .await?;

    if res.rows_affected == 0 {
        stock::ActiveModel {
            product_id: Set(product.id),
            store_id: Set(godown.id),
            quantity: Set(draft.quantity),
            ..Default::default()
        }
        .insert(txn)
        .await?;
    }

    Ok(PurchaseReceipt {
        purchase: saved_purchase,
        item,
        supplier,
    })
}
