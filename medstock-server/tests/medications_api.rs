//! Router-level tests against the in-memory backend

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use medstock_server::db::MemoryRepo;
use medstock_server::models::{Category, Supplier};
use medstock_server::{build_router, Inventory};

fn app_with(repo: Arc<MemoryRepo>) -> Router {
    build_router(Inventory::new(repo), false)
}

fn app() -> Router {
    app_with(Arc::new(MemoryRepo::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create(app: &Router, name: &str, quantity: i64) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/medications",
        Some(json!({ "sku": format!("SKU-{name}"), "name": name, "price": 5, "quantity": quantity })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn health_endpoint() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_assigns_id() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/medications",
        Some(json!({ "sku": "A1", "name": "Paracetamol", "price": 5, "quantity": 10 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "Paracetamol");
    assert_eq!(body["quantity"], 10);
}

#[tokio::test]
async fn create_rejects_negative_price_and_quantity() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/medications",
        Some(json!({ "sku": "A1", "name": "Paracetamol", "price": -1, "quantity": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "price must not be less than 0");

    let (status, _) = send(
        &app,
        "POST",
        "/medications",
        Some(json!({ "sku": "A1", "name": "Paracetamol", "price": 1, "quantity": -5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/medications", None).await;
    assert_eq!(list["pagination"]["totalItems"], 0);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/medications",
        Some(json!({ "name": "Paracetamol", "price": "cheap" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn list_paginates_and_searches() {
    let app = app();
    for name in ["Paracetamol", "Ibuprofen", "Paracetamol Forte", "Aspirin", "Cetirizine"] {
        create(&app, name, 1).await;
    }

    let (status, body) = send(&app, "GET", "/medications?page=2&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 2,
            "totalPages": 3,
            "totalItems": 5,
            "itemsPerPage": 2,
            "hasNextPage": true,
            "hasPrevPage": true
        })
    );

    let (_, body) = send(&app, "GET", "/medications?name=PARA", None).await;
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Paracetamol", "Paracetamol Forte"]);
    assert_eq!(body["pagination"]["totalItems"], 2);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], false);
}

#[tokio::test]
async fn list_rejects_bad_page_and_limit() {
    let app = app();
    for uri in [
        "/medications?page=0",
        "/medications?limit=0",
        "/medications?page=-2",
        "/medications?limit=ten",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].as_str().unwrap().contains("positive integer"));
    }
}

#[tokio::test]
async fn malformed_query_string_is_json_400() {
    let (status, body) = send(&app(), "GET", "/medications?page=1&page=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn oversized_page_window_is_400() {
    let app = app();

    let (status, body) = send(&app, "GET", "/medications?page=4294967296", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "page must not be greater than 4294967295");

    let uri = "/medications?page=4294967295&limit=4294967295";
    let (status, body) = send(&app, "GET", uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "page must not be greater than 2147483649");
}

#[tokio::test]
async fn empty_list_has_zero_pages() {
    let (status, body) = send(&app(), "GET", "/medications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["totalPages"], 0);
    assert_eq!(body["pagination"]["itemsPerPage"], 10);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

#[tokio::test]
async fn get_by_id_joins_category_and_supplier() {
    let repo = Arc::new(MemoryRepo::new());
    repo.insert_category(Category {
        id: 1,
        name: "Analgesics".into(),
    })
    .await;
    repo.insert_supplier(Supplier {
        id: 2,
        name: "Kimia Farma".into(),
        email: Some("orders@example.com".into()),
        phone: None,
    })
    .await;
    let app = app_with(repo);

    let (_, created) = send(
        &app,
        "POST",
        "/medications",
        Some(json!({
            "sku": "A1", "name": "Paracetamol", "price": 5, "quantity": 10,
            "category_id": 1, "supplier_id": 2
        })),
    )
    .await;

    let uri = format!("/medications/{}", created["id"]);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"], json!({ "id": 1, "name": "Analgesics" }));
    assert_eq!(body["suppliers"]["email"], "orders@example.com");
}

#[tokio::test]
async fn unknown_id_is_404() {
    let (status, body) = send(&app(), "GET", "/medications/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "medication '999' not found");
}

#[tokio::test]
async fn malformed_id_is_400() {
    let (status, _) = send(&app(), "GET", "/medications/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_changes_fields_and_validates() {
    let app = app();
    let created = create(&app, "Aspirin", 3).await;
    let uri = format!("/medications/{}", created["id"]);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "quantity": 8 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 8);
    assert_eq!(body["name"], "Aspirin");

    let (status, _) = send(&app, "PUT", &uri, Some(json!({ "price": -3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/medications/999", Some(json!({ "quantity": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = app();
    let created = create(&app, "Aspirin", 3).await;
    let uri = format!("/medications/{}", created["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Deleted successfully" }));

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn total_sums_quantities() {
    let app = app();
    create(&app, "Aspirin", 3).await;
    create(&app, "Ibuprofen", 7).await;

    let (status, body) = send(&app, "GET", "/medications/total", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "totalQuantity": 10 }));
}
