mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_health_endpoint() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
}

#[actix_rt::test]
#[serial]
async fn test_create_booking_rejects_invalid_email() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(&json!({
            "guest_name": "Asha Rao",
            "guest_email": "not-an-email",
            "guest_phone": "+91 98765 43210",
            "check_in_date": "2026-09-10",
            "check_out_date": "2026-09-13",
            "adults": 2,
            "room_type_id": "64f000000000000000000001"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_create_booking_rejects_inverted_stay_window() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(&json!({
            "guest_name": "Asha Rao",
            "guest_email": "asha@example.com",
            "guest_phone": "+91 98765 43210",
            "check_in_date": "2026-09-13",
            "check_out_date": "2026-09-13",
            "adults": 2,
            "room_type_id": "64f000000000000000000001"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_create_booking_requires_an_adult() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(&json!({
            "guest_name": "Asha Rao",
            "guest_email": "asha@example.com",
            "guest_phone": "+91 98765 43210",
            "check_in_date": "2026-09-10",
            "check_out_date": "2026-09-13",
            "adults": 0,
            "children": 2,
            "room_type_id": "64f000000000000000000001"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_create_booking_rejects_malformed_room_type_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(&json!({
            "guest_name": "Asha Rao",
            "guest_email": "asha@example.com",
            "guest_phone": "+91 98765 43210",
            "check_in_date": "2026-09-10",
            "check_out_date": "2026-09-13",
            "adults": 2,
            "room_type_id": "not-an-object-id"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_get_booking_rejects_malformed_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/bookings/not-an-object-id")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_update_booking_requires_some_change() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/bookings/64f000000000000000000001")
        .set_json(&json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_update_booking_rejects_unknown_status_string() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    // Unknown status strings must be rejected at the boundary, before any
    // lifecycle logic runs.
    let req = test::TestRequest::put()
        .uri("/api/bookings/64f000000000000000000001")
        .set_json(&json!({ "status": "archived" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_allocate_rejects_malformed_room_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/64f000000000000000000001/allocate")
        .set_json(&json!({ "room_id": "nope" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_upgrade_rejects_malformed_target_type() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/bookings/64f000000000000000000001/upgrade")
        .set_json(&json!({ "room_type_id": "nope" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_room_status_cannot_be_set_occupied_by_hand() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/rooms/64f000000000000000000002/status")
        .set_json(&json!({ "status": "occupied" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_rt::test]
#[serial]
async fn test_payment_routes_reject_malformed_booking_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for (uri, body) in [
        ("/api/payments/create-order", json!({ "booking_id": "nope" })),
        (
            "/api/payments/verify",
            json!({ "booking_id": "nope", "payment_intent_id": "pi_test_123" }),
        ),
        ("/api/payments/refund", json!({ "booking_id": "nope" })),
    ] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{}", uri);
    }
}
