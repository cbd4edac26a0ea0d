//! Report Service - read-only aggregation of today's sales and purchases.
//! Profit here is naive (sales minus purchase spend, not cost of goods);
//! that matches the business's own bookkeeping and is kept as-is.

use chrono::Local;
use rust_decimal::Decimal;
use sea_orm::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::invoice::{self, Entity as Invoice};
use crate::models::invoice_item::{self, Entity as InvoiceItem};
use crate::models::product::{self, Entity as Product};
use crate::models::purchase::{self, Entity as Purchase};
use crate::models::store::{self, Entity as Store, STORE_TYPE_DISPLAY};

use super::ServiceError;

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLine {
    pub product_name: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub item_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub customer_name: String,
    pub customer_mobile: Option<String>,
    pub date: String,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub balance_due: Decimal,
    pub items: Vec<InvoiceLine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreSales {
    pub store_id: i32,
    pub name: String,
    pub sales: Decimal,
    pub invoices: Vec<InvoiceDetail>,
}

/// Aggregate figures for today across all stores, with a per-display-store
/// breakdown.
#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub date: String,
    pub total_sales: Decimal,
    pub total_paid: Decimal,
    pub total_due: Decimal,
    pub total_invoices: u64,
    pub total_purchases: Decimal,
    pub net_profit: Decimal,
    pub store_stats: Vec<StoreSales>,
}

/// Today's figures for one store, shown on the sale entry page.
#[derive(Debug, Serialize)]
pub struct StoreTodayStats {
    pub today_sales: Decimal,
    pub today_received: Decimal,
    pub today_due: Decimal,
}

fn today_prefix() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

pub async fn daily_summary(db: &DatabaseConnection) -> Result<DailySummary, ServiceError> {
    let today = today_prefix();

    let invoices = Invoice::find()
        .filter(invoice::Column::Date.like(format!("{today}%").as_str()))
        .order_by_desc(invoice::Column::Date)
        .all(db)
        .await?;

    let total_sales: Decimal = invoices.iter().map(|i| i.total_amount).sum();
    let total_paid: Decimal = invoices.iter().map(|i| i.paid_amount).sum();
    let total_invoices = invoices.len() as u64;

    let purchases = Purchase::find()
        .filter(purchase::Column::Date.like(format!("{today}%").as_str()))
        .all(db)
        .await?;
    let total_purchases: Decimal = purchases.iter().map(|p| p.total_amount).sum();

    // Line items for today's invoices, with product names
    let invoice_ids: Vec<i32> = invoices.iter().map(|i| i.id).collect();
    let mut items_by_invoice: HashMap<i32, Vec<InvoiceLine>> = HashMap::new();

    if !invoice_ids.is_empty() {
        let items = InvoiceItem::find()
            .filter(invoice_item::Column::InvoiceId.is_in(invoice_ids))
            .all(db)
            .await?;

        let product_ids: Vec<i32> = items.iter().map(|i| i.product_id).collect();
        let mut product_names: HashMap<i32, String> = HashMap::new();
        if !product_ids.is_empty() {
            for p in Product::find()
                .filter(product::Column::Id.is_in(product_ids))
                .all(db)
                .await?
            {
                product_names.insert(p.id, p.name);
            }
        }

        for item in items {
            let product_name = product_names
                .get(&item.product_id)
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string());
            items_by_invoice
                .entry(item.invoice_id)
                .or_default()
                .push(InvoiceLine {
                    product_name,
                    quantity: item.quantity,
                    rate: item.rate,
                    item_total: item.quantity * item.rate,
                });
        }
    }

    // Per display store breakdown with invoice details
    let stores = Store::find()
        .filter(store::Column::StoreType.eq(STORE_TYPE_DISPLAY))
        .order_by_asc(store::Column::Name)
        .all(db)
        .await?;

    let store_stats = stores
        .into_iter()
        .map(|s| {
            let store_invoices: Vec<InvoiceDetail> = invoices
                .iter()
                .filter(|i| i.store_id == s.id)
                .map(|i| InvoiceDetail {
                    id: i.id,
                    customer_name: i.customer_name.clone(),
                    customer_mobile: i.customer_mobile.clone(),
                    date: i.date.clone(),
                    total_amount: i.total_amount,
                    paid_amount: i.paid_amount,
                    balance_due: i.balance_due(),
                    items: items_by_invoice.get(&i.id).cloned().unwrap_or_default(),
                })
                .collect();

            StoreSales {
                store_id: s.id,
                name: s.name,
                sales: store_invoices.iter().map(|i| i.total_amount).sum(),
                invoices: store_invoices,
            }
        })
        .collect();

    Ok(DailySummary {
        date: today,
        total_sales,
        total_paid,
        total_due: total_sales - total_paid,
        total_invoices,
        total_purchases,
        net_profit: total_sales - total_purchases,
        store_stats,
    })
}

pub async fn store_today_stats(
    db: &DatabaseConnection,
    store_id: i32,
) -> Result<StoreTodayStats, ServiceError> {
    let today = today_prefix();

    let invoices = Invoice::find()
        .filter(invoice::Column::StoreId.eq(store_id))
        .filter(invoice::Column::Date.like(format!("{today}%").as_str()))
        .all(db)
        .await?;

    let today_sales: Decimal = invoices.iter().map(|i| i.total_amount).sum();
    let today_received: Decimal = invoices.iter().map(|i| i.paid_amount).sum();

    Ok(StoreTodayStats {
        today_sales,
        today_received,
        today_due: today_sales - today_received,
    })
}
