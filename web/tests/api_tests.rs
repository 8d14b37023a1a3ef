//! HTTP-level tests of the booking API.
//!
//! Runs the full router against the in-memory stores, asserting the
//! status-code contract: 201 on a won reservation, 400 on validation
//! failure, 409 on conflict, 404 for unknown resources.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use axum_test::TestServer;
use serde_json::{Value, json};
use slotwise_core::expert::Expert;
use slotwise_core::reservation::ReservationCoordinator;
use slotwise_core::store::{BookingStore, ExpertStore};
use slotwise_core::types::BookingId;
use slotwise_testing::helpers::expert_with_slots;
use slotwise_testing::{InMemoryBookingStore, InMemoryExpertStore};
use slotwise_web::{AppState, SlotBroadcaster, build_router};
use std::sync::Arc;

struct TestApp {
    server: TestServer,
    expert: Expert,
}

async fn test_app() -> TestApp {
    let experts = Arc::new(InMemoryExpertStore::new());
    let bookings = Arc::new(InMemoryBookingStore::new());
    let broadcaster = SlotBroadcaster::new();

    let expert = expert_with_slots("Asha Verma", 3);
    experts.insert(expert.clone()).await;

    let coordinator = ReservationCoordinator::new(
        Arc::clone(&experts) as Arc<dyn ExpertStore>,
        Arc::clone(&bookings) as Arc<dyn BookingStore>,
        Arc::new(broadcaster.clone()),
    );
    let state = AppState::new(coordinator, experts, broadcaster);

    let server = TestServer::new(build_router(state)).expect("Test server");
    TestApp { server, expert }
}

fn reservation_body(expert: &Expert, slot_index: usize) -> Value {
    let slot = &expert.slots[slot_index];
    json!({
        "expertId": expert.id,
        "slotId": slot.id,
        "userName": "Asha",
        "email": "Asha@Example.com",
        "phone": "98765 43210",
        "date": slot.date,
        "timeSlot": slot.time,
    })
}

#[tokio::test]
async fn winning_reservation_returns_201_with_the_booking() {
    let app = test_app().await;

    let response = app
        .server
        .post("/api/bookings")
        .json(&reservation_body(&app.expert, 0))
        .await;

    response.assert_status(http::StatusCode::CREATED);
    let booking: Value = response.json();
    assert_eq!(booking["expertName"], "Asha Verma");
    assert_eq!(booking["email"], "asha@example.com");
    assert_eq!(booking["status"], "pending");
}

#[tokio::test]
async fn second_reservation_of_the_same_slot_returns_409() {
    let app = test_app().await;
    let body = reservation_body(&app.expert, 0);

    app.server.post("/api/bookings").json(&body).await.assert_status(http::StatusCode::CREATED);

    let response = app.server.post("/api/bookings").json(&body).await;
    response.assert_status(http::StatusCode::CONFLICT);
    let error: Value = response.json();
    assert_eq!(error["code"], "CONFLICT");
    assert!(error["message"].as_str().unwrap().contains("already booked"));
}

#[tokio::test]
async fn invalid_email_returns_400() {
    let app = test_app().await;
    let mut body = reservation_body(&app.expert, 0);
    body["email"] = json!("not-an-email");

    let response = app.server.post("/api/bookings").json(&body).await;
    response.assert_status(http::StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_expert_returns_409_not_404() {
    let app = test_app().await;
    let mut body = reservation_body(&app.expert, 0);
    body["expertId"] = json!(uuid::Uuid::new_v4());

    let response = app.server.post("/api/bookings").json(&body).await;
    response.assert_status(http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn booking_lookup_requires_an_email() {
    let app = test_app().await;

    let response = app.server.get("/api/bookings").await;
    response.assert_status(http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_lookup_is_case_insensitive() {
    let app = test_app().await;
    app.server
        .post("/api/bookings")
        .json(&reservation_body(&app.expert, 0))
        .await
        .assert_status(http::StatusCode::CREATED);

    let response = app
        .server
        .get("/api/bookings")
        .add_query_param("email", "ASHA@example.COM")
        .await;
    response.assert_status_ok();
    let bookings: Vec<Value> = response.json();
    assert_eq!(bookings.len(), 1);
}

#[tokio::test]
async fn status_update_round_trip() {
    let app = test_app().await;
    let created: Value = app
        .server
        .post("/api/bookings")
        .json(&reservation_body(&app.expert, 0))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .patch(&format!("/api/bookings/{id}/status"))
        .json(&json!({ "status": "confirmed" }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["status"], "confirmed");
}

#[tokio::test]
async fn unknown_status_returns_400() {
    let app = test_app().await;
    let created: Value = app
        .server
        .post("/api/bookings")
        .json(&reservation_body(&app.expert, 0))
        .await
        .json();
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .server
        .patch(&format!("/api/bookings/{id}/status"))
        .json(&json!({ "status": "cancelled" }))
        .await;
    response.assert_status(http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_update_for_unknown_booking_returns_404() {
    let app = test_app().await;

    let response = app
        .server
        .patch(&format!("/api/bookings/{}/status", BookingId::new()))
        .json(&json!({ "status": "confirmed" }))
        .await;
    response.assert_status(http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expert_listing_omits_slots_and_paginates() {
    let app = test_app().await;

    let response = app.server.get("/api/experts").await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["total"], 1);
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 6);
    assert!(page["experts"][0]["slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn expert_detail_includes_the_slot_calendar() {
    let app = test_app().await;

    let response = app
        .server
        .get(&format!("/api/experts/{}", app.expert.id))
        .await;
    response.assert_status_ok();
    let expert: Value = response.json();
    assert_eq!(expert["slots"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_expert_detail_returns_404() {
    let app = test_app().await;

    let response = app
        .server
        .get(&format!("/api/experts/{}", uuid::Uuid::new_v4()))
        .await;
    response.assert_status(http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_category_filter_returns_400() {
    let app = test_app().await;

    let response = app
        .server
        .get("/api/experts")
        .add_query_param("category", "Astrology")
        .await;
    response.assert_status(http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_is_alive() {
    let app = test_app().await;
    let response = app.server.get("/health").await;
    response.assert_status_ok();
}
