//! End-to-end checks through a real Postgres. They run only when
//! `TEST_DATABASE_URL` (or `DATABASE_URL`) is set and are skipped otherwise.

use super::router;
use crate::{
    modules::{auth, category, menu_item, order, restaurant, table, user},
    types::{Config, Context, ToContext},
};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bigdecimal::BigDecimal;
use serde_json::{json, Value};
use std::{str::FromStr, sync::Arc};
use tower::ServiceExt;
use ulid::Ulid;

fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
}

struct Fixture {
    ctx: Arc<Context>,
    router: Router,
    owner_token: String,
    restaurant_id: String,
    qr_code: String,
    menu_item_id: String,
}

async fn owner_token(ctx: &Arc<Context>) -> String {
    let owner = user::repository::create(
        &ctx.db_conn.pool,
        user::repository::CreateUserPayload {
            email: format!("{}@owners.test", Ulid::new().to_string().to_lowercase()),
            password_hash: "not-a-real-hash".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Owner".to_string(),
        },
    )
    .await
    .unwrap();

    auth::service::create_session(ctx.clone(), owner.id)
        .await
        .unwrap()
        .access_token
}

/// A fresh owner with one restaurant, one table and a single menu item.
async fn fixture(price: &str) -> Option<Fixture> {
    let Some(url) = database_url() else {
        eprintln!("no database configured, skipping");
        return None;
    };

    let config = Config::from_lookup(|name| match name {
        "DATABASE_URL" => Some(url.clone()),
        _ => None,
    })
    .unwrap();
    let ctx = Arc::new(config.to_context().await.unwrap());
    let pool = &ctx.db_conn.pool;
    let owner_token = owner_token(&ctx).await;
    let owner = auth::service::verify_access_token(ctx.clone(), owner_token.clone())
        .await
        .unwrap();

    let restaurant = restaurant::repository::create(
        pool,
        restaurant::repository::CreateRestaurantPayload {
            name: format!("Bistro {}", Ulid::new()),
            description: String::new(),
            address: "1 Harbour Road".to_string(),
            phone: "555-0100".to_string(),
            email: "bistro@example.com".to_string(),
            logo: None,
            is_active: true,
            owner_id: owner.user_id,
        },
    )
    .await
    .unwrap();

    let table = table::repository::create(
        pool,
        table::repository::CreateTablePayload {
            restaurant_id: restaurant.id.clone(),
            table_number: "1".to_string(),
            capacity: 4,
            is_active: true,
        },
    )
    .await
    .unwrap();

    let category = category::repository::create(
        pool,
        category::repository::CreateCategoryPayload {
            restaurant_id: restaurant.id.clone(),
            name: "Pizza".to_string(),
            description: String::new(),
            order_index: 0,
            is_active: true,
        },
    )
    .await
    .unwrap();

    let item = menu_item::repository::create(
        pool,
        menu_item::repository::CreateMenuItemPayload {
            restaurant_id: restaurant.id.clone(),
            category_id: category.id,
            name: "Margherita Pizza".to_string(),
            description: String::new(),
            price: BigDecimal::from_str(price).unwrap(),
            image: None,
            ingredients: String::new(),
            allergens: String::new(),
            is_available: true,
            is_vegetarian: true,
            is_vegan: false,
            preparation_time: 15,
            order_index: 1,
        },
    )
    .await
    .unwrap();

    Some(Fixture {
        router: router(ctx.clone()),
        ctx,
        owner_token,
        restaurant_id: restaurant.id,
        qr_code: table.qr_code,
        menu_item_id: item.id,
    })
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn order_count(fixture: &Fixture) -> i64 {
    order::repository::count_by_restaurant_id(
        &fixture.ctx.db_conn.pool,
        fixture.restaurant_id.clone(),
        &order::repository::Filters::default(),
    )
    .await
    .unwrap()
}

async fn place_order(fixture: &Fixture, quantity: i32) -> (StatusCode, Value) {
    send(
        &fixture.router,
        Method::POST,
        &format!("/api/qr/{}/order", fixture.qr_code),
        None,
        Some(json!({
            "customer_name": "Alice",
            "items": [{"menu_item_id": fixture.menu_item_id, "quantity": quantity}]
        })),
    )
    .await
}

#[tokio::test]
async fn placed_order_keeps_its_price_snapshot() {
    let Some(fixture) = fixture("12.50").await else {
        return;
    };

    let (status, placed) = place_order(&fixture, 2).await;
    assert_eq!(status, StatusCode::CREATED, "{}", placed);
    assert_eq!(placed["status"], "pending");
    assert_eq!(placed["total_amount"], "25.00");
    assert_eq!(placed["items"][0]["unit_price"], "12.50");
    assert_eq!(placed["items"][0]["subtotal"], "25.00");
    assert_eq!(placed["items"][0]["menu_item"]["price"], "12.50");

    menu_item::repository::update_by_id_and_restaurant_id(
        &fixture.ctx.db_conn.pool,
        fixture.menu_item_id.clone(),
        fixture.restaurant_id.clone(),
        menu_item::repository::UpdateMenuItemPayload {
            price: Some(BigDecimal::from_str("15.00").unwrap()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let order_id = placed["id"].as_str().unwrap();
    let (status, fetched) = send(
        &fixture.router,
        Method::GET,
        &format!("/api/orders/{}", order_id),
        Some(&fixture.owner_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["total_amount"], "25.00");
    assert_eq!(fetched["items"][0]["unit_price"], "12.50");
    assert_eq!(fetched["items"][0]["menu_item"]["price"], "15.00");
}

#[tokio::test]
async fn rejected_orders_leave_no_rows() {
    let Some(fixture) = fixture("12.50").await else {
        return;
    };
    let uri = format!("/api/qr/{}/order", fixture.qr_code);

    let (status, body) = send(
        &fixture.router,
        Method::POST,
        &uri,
        None,
        Some(json!({
            "customer_name": "Alice",
            "items": [
                {"menu_item_id": fixture.menu_item_id, "quantity": 1},
                {"menu_item_id": "01NOSUCHITEM", "quantity": 1}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["items"][0]["code"], "UNKNOWN_MENU_ITEM");

    let (status, _) = send(
        &fixture.router,
        Method::POST,
        &uri,
        None,
        Some(json!({"customer_name": "Alice", "items": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(order_count(&fixture).await, 0);
}

#[tokio::test]
async fn oversized_totals_are_rejected_before_insert() {
    let Some(fixture) = fixture("99999999.99").await else {
        return;
    };

    let (status, body) = place_order(&fixture, 2).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["items"][0]["code"], "TOTAL_TOO_LARGE");
    assert_eq!(order_count(&fixture).await, 0);
}

#[tokio::test]
async fn status_updates_are_scoped_to_the_owner() {
    let Some(fixture) = fixture("12.50").await else {
        return;
    };
    let (_, placed) = place_order(&fixture, 1).await;
    let uri = format!("/api/orders/{}/status", placed["id"].as_str().unwrap());
    let stranger = owner_token(&fixture.ctx).await;

    let (status, body) = send(
        &fixture.router,
        Method::PATCH,
        &uri,
        Some(&stranger),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");

    let (status, _) = send(
        &fixture.router,
        Method::PATCH,
        &uri,
        Some(&fixture.owner_token),
        Some(json!({"status": "delivered"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = send(
        &fixture.router,
        Method::PATCH,
        &uri,
        Some(&fixture.owner_token),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "confirmed");
    assert_eq!(updated["total_amount"], "12.50");
}

#[tokio::test]
async fn deactivated_tables_look_like_unknown_codes() {
    let Some(fixture) = fixture("12.50").await else {
        return;
    };
    let menu_uri = format!("/api/qr/{}/menu", fixture.qr_code);

    let (status, menu) = send(&fixture.router, Method::GET, &menu_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["menu"][0]["items"][0]["price"], "12.50");

    let tables = table::repository::find_many_by_restaurant_id(
        &fixture.ctx.db_conn.pool,
        fixture.restaurant_id.clone(),
    )
    .await
    .unwrap();
    table::repository::update_by_id_and_restaurant_id(
        &fixture.ctx.db_conn.pool,
        tables[0].id.clone(),
        fixture.restaurant_id.clone(),
        table::repository::UpdateTablePayload {
            table_number: None,
            capacity: None,
            is_active: Some(false),
        },
    )
    .await
    .unwrap();

    let (status, body) = send(&fixture.router, Method::GET, &menu_uri, None, None).await;
    let (_, unknown) = send(
        &fixture.router,
        Method::GET,
        "/api/qr/01NOSUCHCODE/menu",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, unknown);
    assert_eq!(body["error"], "Invalid QR code");
}
