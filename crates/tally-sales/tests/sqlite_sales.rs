//! End-to-end sale creation against an in-memory SQLite database.

use serde_json::json;
use tally_db::{Database, DbConfig};
use tally_sales::{Reply, SalesService, ServiceError};

async fn setup() -> Database {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    for (name, quantity) in [
        ("Martelo de Thor", 10),
        ("Traje de encolhimento", 20),
        ("Escudo do Capitão América", 30),
    ] {
        db.products().insert(name, quantity).await.unwrap();
    }
    db
}

#[tokio::test]
async fn records_sale_and_lines() {
    let db = setup().await;
    let sales = SalesService::from_database(&db);

    let sale = sales
        .add_sale(&json!([{ "productId": 1, "quantity": 1 }, { "productId": 2, "quantity": 5 }]))
        .await
        .unwrap();

    assert!(db.sales().get_by_id(sale.id).await.unwrap().is_some());

    let lines = db.sales().get_lines(sale.id).await.unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.sale_id == sale.id));
    assert_eq!((lines[0].product_id, lines[0].quantity), (1, 1));
    assert_eq!((lines[1].product_id, lines[1].quantity), (2, 5));

    // stock is not adjusted by sale creation
    let product = db.products().get_by_id(2).await.unwrap().unwrap();
    assert_eq!(product.quantity, 20);
}

#[tokio::test]
async fn identical_requests_create_distinct_sales() {
    let db = setup().await;
    let sales = SalesService::from_database(&db);
    let body = json!([{ "productId": 3, "quantity": 2 }]);

    let first = sales.add_sale(&body).await.unwrap();
    let second = sales.add_sale(&body).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(db.sales().count().await.unwrap(), 2);
}

#[tokio::test]
async fn rejected_requests_write_nothing() {
    let db = setup().await;
    let sales = SalesService::from_database(&db);

    let cases = [
        (json!([{ "quantity": 1 }]), 400, "\"productId\" is required"),
        (json!([{ "productId": 1 }]), 400, "\"quantity\" is required"),
        (json!([{ "productId": "A", "quantity": 1 }]), 400, "\"productId\" must be a number"),
        (json!([{ "productId": 1, "quantity": "A" }]), 400, "\"quantity\" must be a number"),
        (
            json!([{ "productId": 1, "quantity": 0 }]),
            422,
            "\"quantity\" must be greater than or equal to 1",
        ),
        (json!([{ "productId": 100, "quantity": 1 }]), 404, "Product not found"),
    ];

    for (body, code, message) in cases {
        let err = sales.add_sale(&body).await.unwrap_err();
        assert_eq!(err, ServiceError::new(code, message), "body: {body}");
    }

    assert_eq!(db.sales().count().await.unwrap(), 0);
}

#[tokio::test]
async fn failed_line_leaves_header_in_place() {
    let db = setup().await;
    let sales = SalesService::from_database(&db);

    // (sale_id, product_id) is unique, so the second write for product 1 fails
    let reply = Reply::from(
        sales
            .add_sale(&json!([{ "productId": 1, "quantity": 1 }, { "productId": 1, "quantity": 2 }]))
            .await,
    );

    assert_eq!(reply.code, 500);
    assert_eq!(reply.error.as_deref(), Some("Sale items not added"));

    assert_eq!(db.sales().count().await.unwrap(), 1);
    assert_eq!(db.sales().get_lines(1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn closed_database_fails_lookup() {
    let db = setup().await;
    let sales = SalesService::from_database(&db);
    db.close().await;

    let err = sales
        .add_sale(&json!([{ "productId": 1, "quantity": 1 }]))
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::new(500, "Product lookup failed"));
}
