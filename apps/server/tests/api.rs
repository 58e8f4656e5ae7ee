//! End-to-end route tests.
//!
//! Each test builds the full router over an in-memory database and drives
//! it with `tower::ServiceExt::oneshot`, asserting on status codes and the
//! `{success, message, ...}` envelope.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vendo_db::{Database, DbConfig};
use vendo_server::{build_router, AppState};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    build_router(AppState::new(db))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn item_payload(code: &str, name: &str, price: f64, quantity: i64) -> Value {
    json!({
        "itemCode": code,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "quantity": quantity,
    })
}

/// Creates an item and returns its ID.
async fn seed_item(app: &Router, code: &str, name: &str, price: f64, quantity: i64) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/inventory",
            item_payload(code, name, price, quantity),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["item"]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = test_app().await;

    seed_item(&app, "A1", "Sugar 1kg", 150.0, 40).await;

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["items"], 1);
    assert_eq!(body["migrations"]["applied"], body["migrations"]["total"]);
    assert!(body["migrations"]["total"].as_u64().unwrap() >= 1);
}

// =============================================================================
// Inventory
// =============================================================================

#[tokio::test]
async fn test_create_and_list_items() {
    let app = test_app().await;

    seed_item(&app, "A1", "Sugar 1kg", 150.0, 40).await;

    let response = app.oneshot(get_request("/inventory")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["itemCode"], "A1");
    assert_eq!(items[0]["price"], 150.0);
    assert_eq!(items[0]["quantity"], 40);
}

#[tokio::test]
async fn test_duplicate_item_code_conflict() {
    let app = test_app().await;

    seed_item(&app, "AB1", "Rice", 99.0, 10).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/inventory",
            item_payload("ab1", "Other Rice", 95.0, 5),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_invalid_item_rejected() {
    let app = test_app().await;

    // Negative price
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/inventory",
            item_payload("A1", "Broken", -1.0, 5),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Item code too long
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/inventory",
            item_payload("TOOLONG", "Broken", 1.0, 5),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_item() {
    let app = test_app().await;

    let id = seed_item(&app, "C3", "Soap", 25.0, 12).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/inventory/{id}"),
            item_payload("C3", "Soap Bar", 27.5, 20),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["item"]["name"], "Soap Bar");
    assert_eq!(body["item"]["price"], 27.5);
    assert_eq!(body["item"]["quantity"], 20);
}

#[tokio::test]
async fn test_update_missing_item() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/inventory/no-such-id",
            item_payload("C3", "Ghost", 1.0, 1),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_item() {
    let app = test_app().await;

    let id = seed_item(&app, "E5", "Salt", 8.0, 6).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/inventory/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/inventory")).await.unwrap();
    let body = body_json(response).await;
    assert!(body["items"].as_array().unwrap().is_empty());
}

// =============================================================================
// Bills
// =============================================================================

#[tokio::test]
async fn test_create_bill_and_decrement_stock() {
    let app = test_app().await;

    // 100.00 each, 5 in stock; sell 2, pay in full
    let item_id = seed_item(&app, "A1", "Widget", 100.0, 5).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bills",
            json!({
                "customerName": "Walk-in",
                "items": [{ "itemId": item_id, "quantity": 2 }],
                "totalPaid": 200.0,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["bill"]["subtotal"], 200.0);
    assert_eq!(body["bill"]["totalAmount"], 200.0);
    assert_eq!(body["bill"]["totalPaid"], 200.0);
    assert_eq!(body["bill"]["dueAmount"], 0.0);
    assert_eq!(body["bill"]["items"][0]["name"], "Widget");
    assert!(body["billId"].is_string());

    // Stock went 5 → 3
    let response = app.oneshot(get_request("/inventory")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_bill_insufficient_stock() {
    let app = test_app().await;

    let item_id = seed_item(&app, "A1", "Widget", 100.0, 5).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bills",
            json!({ "items": [{ "itemId": item_id, "quantity": 10 }] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("Widget"));

    // Stock untouched
    let response = app.oneshot(get_request("/inventory")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["items"][0]["quantity"], 5);
}

#[tokio::test]
async fn test_bill_with_percentage_discount() {
    let app = test_app().await;

    // Subtotal 1000.00 at 10% → total 900.00, paid 400 → due 500
    let item_id = seed_item(&app, "A1", "Widget", 1000.0, 5).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/bills",
            json!({
                "items": [{ "itemId": item_id, "quantity": 1 }],
                "discountType": "percentage",
                "discountValue": 10.0,
                "totalPaid": 400.0,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["bill"]["discountType"], "percentage");
    assert_eq!(body["bill"]["discountValue"], 10.0);
    assert_eq!(body["bill"]["discountAmount"], 100.0);
    assert_eq!(body["bill"]["totalAmount"], 900.0);
    assert_eq!(body["bill"]["dueAmount"], 500.0);
}

#[tokio::test]
async fn test_bill_overpayment_rejected() {
    let app = test_app().await;

    let item_id = seed_item(&app, "A1", "Widget", 300.0, 5).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/bills",
            json!({
                "items": [{ "itemId": item_id, "quantity": 1 }],
                "totalPaid": 400.0,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_bill_empty_cart_rejected() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/bills", json!({ "items": [] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bill_unknown_item() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/bills",
            json!({ "items": [{ "itemId": "no-such-item", "quantity": 1 }] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_bill_by_id() {
    let app = test_app().await;

    let item_id = seed_item(&app, "A1", "Widget", 50.0, 5).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bills",
            json!({ "items": [{ "itemId": item_id, "quantity": 1 }], "totalPaid": 50.0 }),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let bill_id = body["billId"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/bills/{bill_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["bill"]["id"], bill_id.as_str());
    assert_eq!(body["bill"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_missing_bill() {
    let app = test_app().await;

    let response = app
        .oneshot(get_request("/bills/no-such-bill"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Bill not found");
}

#[tokio::test]
async fn test_list_bills() {
    let app = test_app().await;

    let item_id = seed_item(&app, "A1", "Widget", 10.0, 10).await;

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/bills",
                json!({ "items": [{ "itemId": item_id, "quantity": 1 }] }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get_request("/bills")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["bills"].as_array().unwrap().len(), 2);
}
