mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

/// Customer sign-up, an order against a seeded product, then the delete policy
/// for customers that still own orders.
#[tokio::test]
async fn customer_order_lifecycle() {
    let app = TestApp::new().await;

    let customer = app
        .post(
            "/Customer/create-customer",
            json!({
                "firstName": "John",
                "lastName": "Doe",
                "phone": "1234567890",
                "email": "john@example.com"
            }),
        )
        .await;
    assert_eq!(customer.status, StatusCode::CREATED);
    let customer_id = customer.body["id"].as_i64().expect("customer id");
    assert!(customer_id > 0);
    assert!(customer.location().is_some());

    let order = app
        .post(
            "/Order/create-order",
            json!({ "productId": 1, "customerId": customer_id, "status": "Pending" }),
        )
        .await;
    assert_eq!(order.status, StatusCode::CREATED);
    assert_eq!(order.body["status"], "Pending");
    assert!(!order.body["createdDate"].is_null());
    let order_id = order.body["id"].as_i64().expect("order id");

    let details = app.get(&format!("/Order/{order_id}/details")).await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.body["productId"], 1);
    assert_eq!(details.body["customerId"], customer_id);
    assert_eq!(details.body["customer"]["lastName"], "Doe");
    assert_eq!(details.body["product"]["id"], 1);

    // Customers that still own orders are kept.
    let refused = app.delete(&format!("/Customer/{customer_id}")).await;
    assert_eq!(refused.status, StatusCode::CONFLICT);
    assert_eq!(refused.body["error"], "Conflict");
    assert_eq!(
        app.get(&format!("/Customer/{customer_id}")).await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.get(&format!("/Order/{order_id}")).await.status,
        StatusCode::OK
    );

    assert_eq!(
        app.delete(&format!("/Order/{order_id}")).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.delete(&format!("/Customer/{customer_id}")).await.status,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        app.get(&format!("/Customer/{customer_id}")).await.status,
        StatusCode::NOT_FOUND
    );
}
