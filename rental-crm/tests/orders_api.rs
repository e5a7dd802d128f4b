mod common;

use rental_data::Order;
use serde_json::json;

use common::setup;

async fn place(app: &rental_test::TestApp, user_id: i64, bill: f64, date: &str, cars: &[i64]) -> i64 {
    app.post("/orders")
        .json(&json!({
            "user_id": user_id,
            "bill": bill,
            "start_date": date,
            "vehicle_ids": cars,
        }))
        .send()
        .await
        .assert_created()
        .json_path("id")
}

#[tokio::test]
async fn create_order_with_items() {
    let (app, _) = setup().await;

    let resp = app
        .post("/orders")
        .json(&json!({
            "user_id": 1,
            "bill": 120.0,
            "start_date": "2024-03-01",
            "vehicle_ids": [1, 2],
        }))
        .send()
        .await
        .assert_created()
        .assert_json_path("status", "PENDING")
        .assert_json_path("start_date", "2024-03-01");
    let order: Order = resp.json();

    app.get(&format!("/orders/{}/items", order.id))
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 2)
        .assert_json_path("[0].order_id", order.id)
        .assert_json_path("[1].car_id", 2);
}

#[tokio::test]
async fn create_order_with_unknown_car_persists_nothing() {
    let (app, _) = setup().await;

    app.post("/orders")
        .json(&json!({
            "user_id": 1,
            "bill": 50.0,
            "start_date": "2024-03-01",
            "vehicle_ids": [1, 999],
        }))
        .send()
        .await
        .assert_bad_request();

    app.get("/orders")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 0);
}

#[tokio::test]
async fn create_order_rejects_negative_bill() {
    let (app, _) = setup().await;

    app.post("/orders")
        .json(&json!({
            "user_id": 1,
            "bill": -5.0,
            "start_date": "2024-03-01",
        }))
        .send()
        .await
        .assert_bad_request()
        .assert_json_path("error", "Validation failed")
        .assert_json_path("details[0].field", "bill");
}

#[tokio::test]
async fn get_unknown_order_is_not_found() {
    let (app, _) = setup().await;
    app.get("/orders/404").send().await.assert_not_found();
    app.get("/orders/404/items").send().await.assert_not_found();
}

#[tokio::test]
async fn orders_by_user() {
    let (app, _) = setup().await;
    place(&app, 1, 10.0, "2024-03-01", &[]).await;
    place(&app, 2, 20.0, "2024-03-01", &[]).await;
    place(&app, 1, 30.0, "2024-03-02", &[]).await;

    let orders: Vec<Order> = app.get("/users/1/orders").send().await.assert_ok().json();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o.user_id == 1));

    app.get("/users/7/orders")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 0);
}

#[tokio::test]
async fn update_status_commits() {
    let (app, _) = setup().await;
    let id = place(&app, 1, 10.0, "2024-03-01", &[1]).await;

    app.put(&format!("/orders/{id}/status"))
        .json(&json!({ "status": "CONFIRMED" }))
        .send()
        .await
        .assert_ok()
        .assert_json_path("status", "CONFIRMED");

    app.get(&format!("/orders/{id}"))
        .send()
        .await
        .assert_ok()
        .assert_json_path("status", "CONFIRMED");
}

#[tokio::test]
async fn update_status_of_unknown_order() {
    let (app, _) = setup().await;
    app.put("/orders/77/status")
        .json(&json!({ "status": "CONFIRMED" }))
        .send()
        .await
        .assert_not_found();
}

#[tokio::test]
async fn update_status_rejects_empty_status() {
    let (app, _) = setup().await;
    let id = place(&app, 1, 10.0, "2024-03-01", &[]).await;
    app.put(&format!("/orders/{id}/status"))
        .json(&json!({ "status": "" }))
        .send()
        .await
        .assert_bad_request();
}

#[tokio::test]
async fn reports() {
    let (app, _) = setup().await;
    place(&app, 1, 10.0, "2024-03-01", &[]).await;
    place(&app, 1, 30.0, "2024-03-02", &[]).await;
    place(&app, 2, 20.0, "2024-03-02", &[]).await;
    // No such user: left out of the joined projections.
    place(&app, 9, 99.0, "2024-03-03", &[]).await;

    app.get("/orders/details")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 3)
        .assert_json_path("[0].user_name", "Alice");

    app.get("/orders/statistics")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 2)
        .assert_json_path("[0].total_bill", 40.0)
        .assert_json_path("[1].user_name", "Bob");

    app.get("/orders/reports")
        .send()
        .await
        .assert_ok()
        .assert_json_path("[0].day", "2024-03-03")
        .assert_json_path("[1].order_count", 2)
        .assert_json_path("[1].total_bill", 50.0);

    app.get("/orders/info")
        .send()
        .await
        .assert_ok()
        .assert_json_path("len()", 4)
        .assert_json_path("[3].user_id", 9);

    app.get("/orders/bill-comparison")
        .send()
        .await
        .assert_ok()
        .assert_json_path("[0].user_average_bill", 20.0)
        .assert_json_path("[1].user_average_bill", 20.0);
}

#[tokio::test]
async fn health() {
    let (app, _) = setup().await;
    app.get("/health")
        .send()
        .await
        .assert_ok()
        .assert_json_path("status", "UP")
        .assert_json_path("profile", "test");
    app.get("/health/live").send().await.assert_ok();
}
