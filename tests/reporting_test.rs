use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use tilemart::db;
use tilemart::models::{invoice, product, purchase, stock, store};
use tilemart::services::report_service;
use tilemart::services::sale_service::{self, SaleDraft};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

async fn create_store(db: &DatabaseConnection, name: &str, store_type: &str) -> i32 {
    let store = store::ActiveModel {
        name: Set(name.to_string()),
        store_type: Set(store_type.to_string()),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    };
    store.insert(db).await.expect("Failed to create store").id
}

async fn create_product(db: &DatabaseConnection, name: &str) -> i32 {
    let product = product::ActiveModel {
        name: Set(name.to_string()),
        category: Set("TILES".to_string()),
        size: Set("2x2".to_string()),
        unit: Set("sqft".to_string()),
        description: Set(None),
        image_path: Set(None),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    };
    product
        .insert(db)
        .await
        .expect("Failed to create product")
        .id
}

async fn create_stock(db: &DatabaseConnection, product_id: i32, store_id: i32, quantity: Decimal) {
    let row = stock::ActiveModel {
        product_id: Set(product_id),
        store_id: Set(store_id),
        quantity: Set(quantity),
        ..Default::default()
    };
    row.insert(db).await.expect("Failed to create stock");
}

async fn record_sale(
    db: &DatabaseConnection,
    store_id: i32,
    product_id: i32,
    quantity: Decimal,
    rate: Decimal,
    paid: Decimal,
) -> invoice::Model {
    sale_service::record_sale(
        db,
        SaleDraft {
            store_id,
            customer_name: "Walk-in".to_string(),
            mobiles: vec![],
            paid_amount: paid,
            product_ids: vec![product_id],
            quantities: vec![quantity],
            rates: vec![rate],
            locations: vec![],
        },
    )
    .await
    .expect("Sale should succeed")
    .invoice
}

async fn record_purchase_row(db: &DatabaseConnection, total: Decimal) {
    purchase::ActiveModel {
        supplier_id: Set(None),
        date: Set(now()),
        invoice_number: Set(String::new()),
        total_amount: Set(total),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create purchase");
}

#[tokio::test]
async fn test_daily_summary_totals_and_naive_profit() {
    let db = setup_test_db().await;
    let godown = create_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    let silwani = create_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;
    let gairatganj = create_store(&db, "Gairatganj", store::STORE_TYPE_DISPLAY).await;

    let tile = create_product(&db, "Glossy White Tile").await;
    create_stock(&db, tile, godown, dec!(1000)).await;

    record_sale(&db, silwani, tile, dec!(5), dec!(100), dec!(400)).await;
    record_sale(&db, gairatganj, tile, dec!(2), dec!(50), dec!(100)).await;
    record_purchase_row(&db, dec!(250)).await;

    let summary = report_service::daily_summary(&db)
        .await
        .expect("Summary should succeed");

    assert_eq!(summary.total_sales, dec!(600));
    assert_eq!(summary.total_paid, dec!(500));
    assert_eq!(summary.total_due, dec!(100));
    assert_eq!(summary.total_invoices, 2);
    assert_eq!(summary.total_purchases, dec!(250));
    // Purchase spend subtracted from gross sales, not cost of goods sold
    assert_eq!(summary.net_profit, dec!(350));

    // Only display stores appear in the breakdown, sorted by name
    assert_eq!(summary.store_stats.len(), 2);
    assert_eq!(summary.store_stats[0].name, "Gairatganj");
    assert_eq!(summary.store_stats[0].sales, dec!(100));
    assert_eq!(summary.store_stats[1].name, "Silwani");
    assert_eq!(summary.store_stats[1].sales, dec!(500));

    let silwani_invoices = &summary.store_stats[1].invoices;
    assert_eq!(silwani_invoices.len(), 1);
    assert_eq!(silwani_invoices[0].balance_due, dec!(100));
    assert_eq!(silwani_invoices[0].items.len(), 1);
    assert_eq!(silwani_invoices[0].items[0].product_name, "Glossy White Tile");
    assert_eq!(silwani_invoices[0].items[0].item_total, dec!(500));
}

#[tokio::test]
async fn test_daily_summary_on_empty_day_is_all_zeros() {
    let db = setup_test_db().await;
    create_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    create_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;

    let summary = report_service::daily_summary(&db)
        .await
        .expect("Summary should succeed");

    assert_eq!(summary.total_sales, Decimal::ZERO);
    assert_eq!(summary.total_paid, Decimal::ZERO);
    assert_eq!(summary.total_due, Decimal::ZERO);
    assert_eq!(summary.total_invoices, 0);
    assert_eq!(summary.net_profit, Decimal::ZERO);
    assert_eq!(summary.store_stats.len(), 1);
    assert!(summary.store_stats[0].invoices.is_empty());
}

#[tokio::test]
async fn test_store_today_stats_only_count_that_store() {
    let db = setup_test_db().await;
    let godown = create_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    let silwani = create_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;
    let gairatganj = create_store(&db, "Gairatganj", store::STORE_TYPE_DISPLAY).await;

    let tile = create_product(&db, "Glossy White Tile").await;
    create_stock(&db, tile, godown, dec!(1000)).await;

    record_sale(&db, silwani, tile, dec!(5), dec!(100), dec!(400)).await;
    record_sale(&db, gairatganj, tile, dec!(2), dec!(50), dec!(100)).await;

    let stats = report_service::store_today_stats(&db, silwani)
        .await
        .expect("Stats should succeed");

    assert_eq!(stats.today_sales, dec!(500));
    assert_eq!(stats.today_received, dec!(400));
    assert_eq!(stats.today_due, dec!(100));
}

#[tokio::test]
async fn test_yesterdays_figures_are_excluded() {
    let db = setup_test_db().await;
    let godown = create_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    let silwani = create_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;

    let tile = create_product(&db, "Glossy White Tile").await;
    create_stock(&db, tile, godown, dec!(1000)).await;

    // A sale stamped yesterday must not show up in today's summary
    let yesterday = (chrono::Local::now() - chrono::Duration::days(1))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    invoice::ActiveModel {
        store_id: Set(silwani),
        customer_name: Set("Old Customer".to_string()),
        customer_mobile: Set(None),
        date: Set(yesterday),
        total_amount: Set(dec!(900)),
        paid_amount: Set(dec!(900)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to create invoice");

    record_sale(&db, silwani, tile, dec!(1), dec!(100), dec!(100)).await;

    let summary = report_service::daily_summary(&db)
        .await
        .expect("Summary should succeed");
    assert_eq!(summary.total_sales, dec!(100));
    assert_eq!(summary.total_invoices, 1);
}
