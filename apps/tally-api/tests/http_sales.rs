//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tally_api::{app, AppState};
use tally_db::{Database, DbConfig};

async fn setup() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.products().insert("Martelo de Thor", 10).await.unwrap();
    db.products().insert("Traje de encolhimento", 20).await.unwrap();
    (app(AppState::new(db.clone())), db)
}

async fn post_sales(router: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/sales")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn created_sale_returns_201_with_items() {
    let (router, db) = setup().await;

    let (status, body) = post_sales(
        router,
        r#"[{"productId":1,"quantity":1},{"productId":2,"quantity":5}]"#,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "itemsSold": [
                { "productId": 1, "quantity": 1 },
                { "productId": 2, "quantity": 5 }
            ]
        })
    );
    assert_eq!(db.sales().get_lines(1).await.unwrap().len(), 2);
}

#[tokio::test]
async fn errors_map_to_status_and_message() {
    let cases = [
        (r#"[{"quantity":1}]"#, StatusCode::BAD_REQUEST, "\"productId\" is required"),
        (r#"[{"productId":1}]"#, StatusCode::BAD_REQUEST, "\"quantity\" is required"),
        (
            r#"[{"productId":"A","quantity":1}]"#,
            StatusCode::BAD_REQUEST,
            "\"productId\" must be a number",
        ),
        (
            r#"[{"productId":1,"quantity":"A"}]"#,
            StatusCode::BAD_REQUEST,
            "\"quantity\" must be a number",
        ),
        (
            r#"[{"productId":1,"quantity":0}]"#,
            StatusCode::UNPROCESSABLE_ENTITY,
            "\"quantity\" must be greater than or equal to 1",
        ),
        (
            r#"[{"productId":100,"quantity":1}]"#,
            StatusCode::NOT_FOUND,
            "Product not found",
        ),
    ];

    for (request_body, expected_status, message) in cases {
        let (router, _db) = setup().await;
        let (status, body) = post_sales(router, request_body).await;

        assert_eq!(status, expected_status, "body: {request_body}");
        assert_eq!(body, json!({ "message": message }), "body: {request_body}");
    }
}

#[tokio::test]
async fn unreadable_json_is_bad_request() {
    let (router, db) = setup().await;

    let (status, body) = post_sales(router, "[{").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert_eq!(db.sales().count().await.unwrap(), 0);
}

#[tokio::test]
async fn health_reports_database_state() {
    let (router, db) = setup().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    db.close().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
