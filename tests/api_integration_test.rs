use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::util::ServiceExt; // for `oneshot`

use tilemart::models::{product, stock, store, user, user_profile};
use tilemart::{api, auth, db};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn test_app(db: DatabaseConnection) -> Router {
    api::api_router(db)
}

fn now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

async fn create_test_store(db: &DatabaseConnection, name: &str, store_type: &str) -> i32 {
    let store = store::ActiveModel {
        name: Set(name.to_string()),
        store_type: Set(store_type.to_string()),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    };
    store.insert(db).await.expect("Failed to create store").id
}

async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
    role: &str,
    store_id: Option<i32>,
) -> i32 {
    let password_hash = auth::hash_password("pass1234").expect("Failed to hash password");
    let user = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        created_at: Set(now()),
        updated_at: Set(now()),
        ..Default::default()
    };
    let saved = user.insert(db).await.expect("Failed to create user");

    let profile = user_profile::ActiveModel {
        user_id: Set(saved.id),
        store_id: Set(store_id),
        ..Default::default()
    };
    profile.insert(db).await.expect("Failed to create profile");
    saved.id
}

async fn create_test_product(db: &DatabaseConnection, name: &str) -> i32 {
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

fn get_token(username: &str, role: &str) -> String {
    auth::create_jwt(username, role).expect("Failed to create token")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let req = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "tilemart");
}

#[tokio::test]
async fn test_login_flow_and_me() {
    let db = setup_test_db().await;
    let shop = create_test_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;
    create_test_user(&db, "counter1", auth::ROLE_OPERATOR, Some(shop)).await;
    let app = test_app(db);

    // Wrong password is rejected
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "username": "counter1", "password": "wrong" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Correct password yields a token
    let req = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "username": "counter1", "password": "pass1234" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token in response");

    // The token identifies the user and their assigned store
    let req = Request::builder()
        .uri("/auth/me")
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "counter1");
    assert_eq!(json["store"]["name"], "Silwani");
}

#[tokio::test]
async fn test_first_registered_user_becomes_admin() {
    let db = setup_test_db().await;
    let app = test_app(db);

    let req = Request::builder()
        .uri("/auth/register")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "username": "owner",
                "password": "pass1234",
                "role": "operator"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "admin");
}

#[tokio::test]
async fn test_create_sale_over_http() {
    let db = setup_test_db().await;
    let godown = create_test_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    let shop = create_test_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;
    create_test_user(&db, "counter1", auth::ROLE_OPERATOR, Some(shop)).await;

    let tile = create_test_product(&db, "Glossy White Tile").await;
    stock::ActiveModel {
        product_id: Set(tile),
        store_id: Set(godown),
        quantity: Set(dec!(100)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to create stock");

    let app = test_app(db);
    let token = get_token("counter1", auth::ROLE_OPERATOR);

    let payload = serde_json::json!({
        "customer_name": "Ramesh Kumar",
        "customer_mobiles": ["9876543210"],
        "paid_amount": "400",
        "product_ids": [tile],
        "quantities": ["5"],
        "rates": ["100"],
    });

    let req = Request::builder()
        .uri("/sales/new")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("Sale recorded successfully! Invoice #"));
    assert_eq!(json["invoice"]["total_amount"], "500");
}

#[tokio::test]
async fn test_single_item_fallback_fields() {
    let db = setup_test_db().await;
    let godown = create_test_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    let shop = create_test_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;
    create_test_user(&db, "counter1", auth::ROLE_OPERATOR, Some(shop)).await;

    let tile = create_test_product(&db, "Glossy White Tile").await;
    stock::ActiveModel {
        product_id: Set(tile),
        store_id: Set(godown),
        quantity: Set(dec!(100)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to create stock");

    let app = test_app(db);
    let token = get_token("counter1", auth::ROLE_OPERATOR);

    let payload = serde_json::json!({
        "customer_name": "Ramesh Kumar",
        "paid_amount": "50",
        "product": tile,
        "quantity": "2",
        "rate": "25",
    });

    let req = Request::builder()
        .uri("/sales/new")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["invoice"]["total_amount"], "50");
    assert_eq!(json["invoice"]["paid_amount"], "50");
}

#[tokio::test]
async fn test_record_purchase_over_http() {
    let db = setup_test_db().await;
    create_test_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    create_test_user(&db, "boss", auth::ROLE_ADMIN, None).await;
    let slab = create_test_product(&db, "Makrana Marble Slab").await;

    let app = test_app(db);
    let token = get_token("boss", auth::ROLE_ADMIN);

    let payload = serde_json::json!({
        "supplier_name": "Agrawal Marbles",
        "invoice_number": "SUP-0042",
        "product": slab,
        "quantity": "20",
        "rate": "30",
    });

    let req = Request::builder()
        .uri("/purchase/new")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(payload.to_string()))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let message = json["message"].as_str().unwrap();
    assert!(message.starts_with("Purchase recorded! Stock added to Godown. Purchase ID:"));
}

#[tokio::test]
async fn test_sale_entry_context_lists_catalog_with_stock() {
    let db = setup_test_db().await;
    let godown = create_test_store(&db, "Central Godown", store::STORE_TYPE_GODOWN).await;
    let shop = create_test_store(&db, "Silwani", store::STORE_TYPE_DISPLAY).await;
    create_test_user(&db, "counter1", auth::ROLE_OPERATOR, Some(shop)).await;

    let tile = create_test_product(&db, "Glossy White Tile").await;
    stock::ActiveModel {
        product_id: Set(tile),
        store_id: Set(godown),
        quantity: Set(dec!(100)),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("Failed to create stock");

    let app = test_app(db);
    let token = get_token("counter1", auth::ROLE_OPERATOR);

    let req = Request::builder()
        .uri("/sales/new")
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["products"][0]["name"], "Glossy White Tile");
    assert_eq!(json["products"][0]["stock_quantity"], "100");
    assert_eq!(json["user_store"]["name"], "Silwani");
}
