//! `/orders` end to end through the router

mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::TestApp;

fn new_order() -> Value {
    json!({
        "deliverTo": "X",
        "mobileNumber": "555",
        "dishes": [{"id": "d1", "quantity": 2}]
    })
}

fn update_body(status: &str) -> Value {
    json!({
        "deliverTo": "Y",
        "mobileNumber": "556",
        "status": status,
        "dishes": [{"id": "d1", "name": "Taco", "price": 5, "quantity": 3}]
    })
}

fn with(mut body: Value, field: &str, value: Value) -> Value {
    body[field] = value;
    body
}

async fn create(app: &TestApp) -> String {
    let res = app.post("/orders", new_order()).await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.data()["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_create_order_scenario() {
    let app = TestApp::new();
    let res = app.post("/orders", new_order()).await;
    assert_eq!(res.status, StatusCode::CREATED);

    let order = res.data();
    assert!(!order["id"].as_str().unwrap().is_empty());
    assert_eq!(order["status"], "pending");
    assert_eq!(order["deliverTo"], "X");
    assert_eq!(order["dishes"][0]["quantity"], 2);
    assert_eq!(order["dishes"][0]["id"], "d1");
    assert_eq!(app.count("/orders").await, 1);
}

#[tokio::test]
async fn test_create_forces_pending() {
    let app = TestApp::new();
    let res = app
        .post("/orders", with(new_order(), "status", json!("delivered")))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["status"], "pending");
}

#[tokio::test]
async fn test_create_missing_fields() {
    let app = TestApp::new();
    for (field, message) in [
        ("deliverTo", "Order must include a deliverTo"),
        ("mobileNumber", "Order must include a mobileNumber"),
        ("dishes", "Order must include a dish"),
    ] {
        let mut body = new_order();
        body.as_object_mut().unwrap().remove(field);
        let res = app.post("/orders", body).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{field}");
        assert_eq!(res.message(), message);
    }
    assert_eq!(app.count("/orders").await, 0);
}

#[tokio::test]
async fn test_create_empty_dishes_rejected() {
    let app = TestApp::new();
    for dishes in [json!([]), json!("taco"), json!({"id": "d1"})] {
        let res = app
            .post("/orders", with(new_order(), "dishes", dishes))
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.message(), "Order must include at least one dish");
    }
    assert_eq!(app.count("/orders").await, 0);
}

#[tokio::test]
async fn test_create_bad_quantity_rejected() {
    let app = TestApp::new();
    for quantity in [json!(0), json!(-2), json!("2"), json!(1.5), json!(null)] {
        let dishes = json!([{"id": "d1", "quantity": 1}, {"id": "d2", "quantity": quantity}]);
        let res = app
            .post("/orders", with(new_order(), "dishes", dishes))
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "quantity {quantity}");
        assert_eq!(
            res.message(),
            "Dish 1 must have a quantity that is an integer greater than 0"
        );
    }

    let res = app
        .post("/orders", with(new_order(), "dishes", json!([{"id": "d1"}])))
        .await;
    assert_eq!(
        res.message(),
        "Dish 0 must have a quantity that is an integer greater than 0"
    );
    assert_eq!(app.count("/orders").await, 0);
}

#[tokio::test]
async fn test_only_first_bad_quantity_reported() {
    let app = TestApp::new();
    let dishes = json!([{"quantity": 0}, {"quantity": 0}, {"quantity": 0}]);
    let res = app
        .post("/orders", with(new_order(), "dishes", dishes))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.message(),
        "Dish 0 must have a quantity that is an integer greater than 0"
    );
}

#[tokio::test]
async fn test_read_order() {
    let app = TestApp::new();
    let id = create(&app).await;
    let res = app.get(&format!("/orders/{id}")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["id"], id.as_str());
    assert_eq!(res.data()["mobileNumber"], "555");
}

#[tokio::test]
async fn test_read_missing_order_is_404() {
    let app = TestApp::new();
    let res = app.get("/orders/nope456").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Order id not found: nope456");
}

#[tokio::test]
async fn test_update_order() {
    let app = TestApp::new();
    let id = create(&app).await;

    let res = app
        .put(&format!("/orders/{id}"), update_body("preparing"))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let order = res.data();
    assert_eq!(order["id"], id.as_str());
    assert_eq!(order["status"], "preparing");
    assert_eq!(order["deliverTo"], "Y");
    assert_eq!(order["dishes"][0]["quantity"], 3);
    assert_eq!(order["dishes"][0]["name"], "Taco");

    assert_eq!(
        app.get(&format!("/orders/{id}")).await.data()["status"],
        "preparing"
    );
}

#[tokio::test]
async fn test_update_any_status_order_until_delivered() {
    let app = TestApp::new();
    let id = create(&app).await;
    for status in ["out-for-delivery", "pending", "preparing", "delivered"] {
        let res = app.put(&format!("/orders/{id}"), update_body(status)).await;
        assert_eq!(res.status, StatusCode::OK, "{status}");
        assert_eq!(res.data()["status"], status);
    }
}

#[tokio::test]
async fn test_delivered_order_is_frozen() {
    let app = TestApp::new();
    let id = create(&app).await;

    let res = app
        .put(&format!("/orders/{id}"), update_body("delivered"))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    // Valid or not, the payload no longer matters
    for body in [update_body("pending"), json!({}), with(update_body("preparing"), "id", json!("other"))] {
        let res = app.put(&format!("/orders/{id}"), body).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.message(), "A delivered order cannot be changed");
    }
    assert_eq!(
        app.get(&format!("/orders/{id}")).await.data()["deliverTo"],
        "Y"
    );
}

#[tokio::test]
async fn test_update_invalid_status() {
    let app = TestApp::new();
    let id = create(&app).await;
    for status in [json!("shipped"), json!(""), json!(3)] {
        let res = app
            .put(&format!("/orders/{id}"), with(update_body("pending"), "status", status))
            .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            res.message(),
            "Order must have a status of pending, preparing, out-for-delivery, delivered"
        );
    }

    let mut body = update_body("pending");
    body.as_object_mut().unwrap().remove("status");
    let res = app.put(&format!("/orders/{id}"), body).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        app.get(&format!("/orders/{id}")).await.data()["status"],
        "pending"
    );
}

#[tokio::test]
async fn test_update_id_mismatch() {
    let app = TestApp::new();
    let id = create(&app).await;
    let res = app
        .put(
            &format!("/orders/{id}"),
            with(update_body("preparing"), "id", json!("zzz")),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.message(),
        format!("Order id does not match route id. Order: zzz, Route: {id}.")
    );
    assert_eq!(
        app.get(&format!("/orders/{id}")).await.data()["status"],
        "pending"
    );

    let res = app
        .put(
            &format!("/orders/{id}"),
            with(update_body("preparing"), "id", json!(id)),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_order_is_404() {
    let app = TestApp::new();
    let res = app.put("/orders/ghost", update_body("pending")).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert!(res.message().contains("ghost"));
}

#[tokio::test]
async fn test_update_validates_dishes() {
    let app = TestApp::new();
    let id = create(&app).await;
    let res = app
        .put(
            &format!("/orders/{id}"),
            with(update_body("preparing"), "dishes", json!([])),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.message(), "Order must include at least one dish");

    let res = app
        .put(
            &format!("/orders/{id}"),
            with(update_body("preparing"), "dishes", json!([{"quantity": 0}])),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_pending_order() {
    let app = TestApp::new();
    let keep = create(&app).await;
    let id = create(&app).await;

    let res = app.delete(&format!("/orders/{id}")).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_empty());

    let remaining = app.get("/orders").await.data();
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_eq!(remaining[0]["id"], keep.as_str());
    assert_eq!(
        app.get(&format!("/orders/{id}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_delete_non_pending_rejected() {
    let app = TestApp::new();
    let id = create(&app).await;
    app.put(&format!("/orders/{id}"), update_body("preparing"))
        .await;

    let res = app.delete(&format!("/orders/{id}")).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.message(),
        "An order cannot be deleted unless it is pending"
    );
    assert_eq!(app.count("/orders").await, 1);
}

#[tokio::test]
async fn test_delete_missing_order_is_404() {
    let app = TestApp::new();
    let res = app.delete("/orders/ghost").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.message(), "Order id not found: ghost");
}

#[tokio::test]
async fn test_line_item_fields_kept_verbatim() {
    let app = TestApp::new();
    let dishes = json!([{
        "id": "d351db2b49b69679504652ea1cf38241",
        "name": "Dolcelatte and chickpea spaghetti",
        "description": "Spaghetti",
        "image_url": "http://img",
        "price": 19,
        "quantity": 4
    }, {
        "id": "d2",
        "price": "19",
        "note": "no onions",
        "extras": {"sauce": true},
        "quantity": 1
    }]);
    let res = app
        .post("/orders", with(new_order(), "dishes", dishes.clone()))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["dishes"], dishes);

    let id = res.data()["id"].as_str().unwrap().to_string();
    let stored = app.get(&format!("/orders/{id}")).await.data();
    assert_eq!(stored["dishes"][1]["note"], "no onions");
    assert_eq!(stored["dishes"][1]["price"], "19");
}

#[tokio::test]
async fn test_update_keeps_line_item_extras() {
    let app = TestApp::new();
    let id = create(&app).await;
    let dishes = json!([{"id": "d1", "note": "extra spicy", "price": "5", "quantity": 3}]);
    let res = app
        .put(
            &format!("/orders/{id}"),
            with(update_body("preparing"), "dishes", dishes.clone()),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["dishes"], dishes);
}
