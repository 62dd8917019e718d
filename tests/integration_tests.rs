use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower::ServiceExt;

use frontdesk::config::AppConfig;
use frontdesk::db;
use frontdesk::handlers;
use frontdesk::state::AppState;

// ── Helpers ──

fn test_state() -> Arc<AppState> {
    let config = AppConfig {
        port: 8080,
        database_url: ":memory:".to_string(),
    };
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config,
    })
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/v1/bookings", get(handlers::bookings::list_bookings))
        .route("/api/v1/bookings", post(handlers::bookings::create_booking))
        .route(
            "/api/v1/bookings/checking-in-today",
            get(handlers::bookings::checking_in_today),
        )
        .route(
            "/api/v1/bookings/checking-out-today",
            get(handlers::bookings::checking_out_today),
        )
        .route("/api/v1/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/v1/bookings/:id",
            delete(handlers::bookings::cancel_booking),
        )
        .route(
            "/api/v1/bookings/:id/check-in",
            put(handlers::bookings::check_in),
        )
        .route(
            "/api/v1/bookings/:id/check-out",
            put(handlers::bookings::check_out),
        )
        .route(
            "/api/v1/bookings/:id/extend",
            put(handlers::bookings::extend_booking),
        )
        .route(
            "/api/v1/bookings/:id/checklist",
            get(handlers::checklists::list_checklist),
        )
        .route(
            "/api/v1/bookings/:id/checklist",
            post(handlers::checklists::add_checklist_item),
        )
        .route(
            "/api/v1/bookings/:id/checklist",
            put(handlers::checklists::replace_checklist),
        )
        .route(
            "/api/v1/bookings/:id/checklist/:item_id",
            put(handlers::checklists::update_checklist_item),
        )
        .route(
            "/api/v1/bookings/:id/checklist/:item_id",
            delete(handlers::checklists::delete_checklist_item),
        )
        .route(
            "/api/v1/bookings/:id/checklist/:item_id/toggle",
            put(handlers::checklists::toggle_checklist_item),
        )
        .route("/api/v1/rooms", get(handlers::rooms::list_rooms))
        .route("/api/v1/rooms", post(handlers::rooms::create_room))
        .route(
            "/api/v1/rooms/available",
            get(handlers::rooms::available_rooms),
        )
        .route("/api/v1/rooms/:id", get(handlers::rooms::get_room))
        .route(
            "/api/v1/rooms/:id/status",
            put(handlers::rooms::set_room_status),
        )
        .route("/api/v1/guests", get(handlers::guests::list_guests))
        .route("/api/v1/guests", post(handlers::guests::create_guest))
        .route("/api/v1/guests/:id", get(handlers::guests::get_guest))
        .route(
            "/api/v1/guests/:id/bookings",
            get(handlers::guests::guest_bookings),
        )
        .route("/api/v1/guests/:id", put(handlers::guests::update_guest))
        .route("/api/v1/guests/:id", delete(handlers::guests::delete_guest))
        .route("/api/v1/inventory", get(handlers::inventory::list_inventory))
        .route(
            "/api/v1/inventory",
            post(handlers::inventory::create_inventory_item),
        )
        .route(
            "/api/v1/inventory/low-stock",
            get(handlers::inventory::low_stock),
        )
        .route(
            "/api/v1/inventory/:id",
            get(handlers::inventory::get_inventory_item),
        )
        .route(
            "/api/v1/inventory/:id",
            put(handlers::inventory::update_inventory_item),
        )
        .route(
            "/api/v1/inventory/:id",
            delete(handlers::inventory::delete_inventory_item),
        )
        .route(
            "/api/v1/inventory/:id/quantity",
            patch(handlers::inventory::set_quantity),
        )
        .route(
            "/api/v1/inventory/:id/restock",
            post(handlers::inventory::restock),
        )
        .route("/api/v1/expenses", get(handlers::expenses::list_expenses))
        .route("/api/v1/expenses", post(handlers::expenses::create_expense))
        .route("/api/v1/expenses/:id", get(handlers::expenses::get_expense))
        .route(
            "/api/v1/expenses/:id",
            put(handlers::expenses::update_expense),
        )
        .route(
            "/api/v1/expenses/:id",
            delete(handlers::expenses::delete_expense),
        )
        .with_state(state)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// POST a room and return its id.
async fn seed_room(state: &Arc<AppState>, number: &str, price: i64) -> i64 {
    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/rooms",
            serde_json::json!({
                "number": number,
                "type": "double",
                "price_per_night": price,
                "capacity": 2,
                "amenities": ["wifi"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    body_json(res).await["id"].as_i64().unwrap()
}

async fn seed_guest(state: &Arc<AppState>, ident: &str) -> i64 {
    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/guests",
            serde_json::json!({
                "first_name": "Ana",
                "last_name": "Reyes",
                "identification_no": ident
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    body_json(res).await["id"].as_i64().unwrap()
}

async fn seed_booking(state: &Arc<AppState>, room_id: i64, guest_id: i64, ci: &str, co: &str) -> i64 {
    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            serde_json::json!({
                "room_id": room_id,
                "guest_id": guest_id,
                "check_in_date": ci,
                "check_out_date": co,
                "adults": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    body_json(res).await["id"].as_i64().unwrap()
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let res = test_app(test_state())
        .oneshot(get_request("/health"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "ok");
}

// ── Booking lifecycle over HTTP ──

#[tokio::test]
async fn test_create_booking_computes_total() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;

    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            serde_json::json!({
                "room_id": room_id,
                "guest_id": guest_id,
                "check_in_date": "2025-01-10",
                "check_out_date": "2025-01-13",
                "adults": 2,
                "children": 1,
                "notes": "late arrival"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let json = body_json(res).await;
    assert_eq!(json["total_amount"], 300);
    assert_eq!(json["status"], "confirmed");
    assert_eq!(json["payment_status"], "pending");
    assert_eq!(json["notes"], "late arrival");
}

#[tokio::test]
async fn test_create_booking_missing_room_is_404() {
    let state = test_state();
    let guest_id = seed_guest(&state, "ID-1").await;

    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            serde_json::json!({
                "room_id": 99,
                "guest_id": guest_id,
                "check_in_date": "2025-01-10",
                "check_out_date": "2025-01-13",
                "adults": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_booking_bad_range_is_400() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;

    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            serde_json::json!({
                "room_id": room_id,
                "guest_id": guest_id,
                "check_in_date": "2025-01-13",
                "check_out_date": "2025-01-10",
                "adults": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("invalid date range"));
}

#[tokio::test]
async fn test_create_booking_overlap_is_409() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;

    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            serde_json::json!({
                "room_id": room_id,
                "guest_id": guest_id,
                "check_in_date": "2025-01-12",
                "check_out_date": "2025-01-15",
                "adults": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Same-day turnover is not a conflict
    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            serde_json::json!({
                "room_id": room_id,
                "guest_id": guest_id,
                "check_in_date": "2025-01-13",
                "check_out_date": "2025-01-15",
                "adults": 1
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_unknown_payment_status_is_400() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;

    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings",
            serde_json::json!({
                "room_id": room_id,
                "guest_id": guest_id,
                "check_in_date": "2025-01-10",
                "check_out_date": "2025-01-13",
                "adults": 2,
                "payment_status": "owed"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_stay_round_trip() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    let booking_id = seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/check-in"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "checked_in");

    let res = test_app(state.clone())
        .oneshot(get_request(&format!("/api/v1/rooms/{room_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(res).await["status"], "occupied");

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/check-out"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "checked_out");
    // Status transitions never touch the amount
    assert_eq!(json["total_amount"], 300);

    let res = test_app(state)
        .oneshot(get_request(&format!("/api/v1/rooms/{room_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(res).await["status"], "available");
}

#[tokio::test]
async fn test_check_in_twice_is_409() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    let booking_id = seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/check-in"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = test_app(state)
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/check-in"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_extend_booking() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    let booking_id = seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/extend"),
            serde_json::json!({ "new_check_out_date": "2025-01-16" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["check_out_date"], "2025-01-16");
    assert_eq!(json["total_amount"], 600);

    // Backwards extension is rejected and changes nothing
    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/extend"),
            serde_json::json!({ "new_check_out_date": "2025-01-12" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test_app(state)
        .oneshot(get_request(&format!("/api/v1/bookings/{booking_id}")))
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json["check_out_date"], "2025-01-16");
    assert_eq!(json["total_amount"], 600);
}

#[tokio::test]
async fn test_extend_blocked_by_next_booking() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    let first = seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;
    seed_booking(&state, room_id, guest_id, "2025-01-14", "2025-01-16").await;

    let res = test_app(state)
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{first}/extend"),
            serde_json::json!({ "new_check_out_date": "2025-01-15" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancel_booking() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    let booking_id = seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;

    test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/check-in"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    let res = test_app(state.clone())
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/bookings/{booking_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // The room is handed back and the record survives as cancelled
    let res = test_app(state.clone())
        .oneshot(get_request(&format!("/api/v1/rooms/{room_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(res).await["status"], "available");

    let res = test_app(state.clone())
        .oneshot(get_request(&format!("/api/v1/bookings/{booking_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(res).await["status"], "cancelled");

    // A second cancel is a conflict, not a second room update
    let res = test_app(state)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/bookings/{booking_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_bookings_by_status() {
    let state = test_state();
    let room_a = seed_room(&state, "101", 100).await;
    let room_b = seed_room(&state, "102", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    seed_booking(&state, room_a, guest_id, "2025-01-10", "2025-01-13").await;
    let checked_in = seed_booking(&state, room_b, guest_id, "2025-01-10", "2025-01-13").await;
    test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{checked_in}/check-in"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    let res = test_app(state.clone())
        .oneshot(get_request("/api/v1/bookings?status=checked_in"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], checked_in);

    let res = test_app(state)
        .oneshot(get_request("/api/v1/bookings?status=arriving"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_booking_is_404() {
    let res = test_app(test_state())
        .oneshot(get_request("/api/v1/bookings/42"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_today_endpoints_empty() {
    let state = test_state();
    let res = test_app(state.clone())
        .oneshot(get_request("/api/v1/bookings/checking-in-today"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 0);

    let res = test_app(state)
        .oneshot(get_request("/api/v1/bookings/checking-out-today"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 0);
}

// ── Rooms ──

#[tokio::test]
async fn test_room_availability_search() {
    let state = test_state();
    let booked = seed_room(&state, "101", 100).await;
    let free = seed_room(&state, "102", 120).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    seed_booking(&state, booked, guest_id, "2025-01-10", "2025-01-13").await;

    let res = test_app(state.clone())
        .oneshot(get_request(
            "/api/v1/rooms/available?check_in_date=2025-01-12&check_out_date=2025-01-14",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], free);

    let res = test_app(state)
        .oneshot(get_request(
            "/api/v1/rooms/available?check_in_date=2025-01-14&check_out_date=2025-01-14",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_room_status_override() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/rooms/{room_id}/status?status=maintenance"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["status"], "maintenance");

    let res = test_app(state)
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/rooms/{room_id}/status?status=broken"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_room_number_rejected() {
    let state = test_state();
    seed_room(&state, "101", 100).await;

    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/rooms",
            serde_json::json!({
                "number": "101",
                "type": "single",
                "price_per_night": 80
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── Guests ──

#[tokio::test]
async fn test_guest_crud() {
    let state = test_state();
    let guest_id = seed_guest(&state, "ID-1").await;

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/guests/{guest_id}"),
            serde_json::json!({ "country": "Philippines" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["country"], "Philippines");
    assert_eq!(json["first_name"], "Ana");

    let res = test_app(state.clone())
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/guests/{guest_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test_app(state)
        .oneshot(get_request(&format!("/api/v1/guests/{guest_id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guest_stay_history() {
    let state = test_state();
    let room_a = seed_room(&state, "101", 100).await;
    let room_b = seed_room(&state, "202", 150).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    let other_guest = seed_guest(&state, "ID-2").await;
    let first = seed_booking(&state, room_a, guest_id, "2025-01-10", "2025-01-13").await;
    let second = seed_booking(&state, room_b, guest_id, "2025-02-01", "2025-02-03").await;
    seed_booking(&state, room_a, other_guest, "2025-03-01", "2025-03-02").await;
    test_app(state.clone())
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/bookings/{first}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let res = test_app(state.clone())
        .oneshot(get_request(&format!("/api/v1/guests/{guest_id}/bookings")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let stays = json.as_array().unwrap();
    // Only this guest's bookings, newest first, cancelled ones included
    assert_eq!(stays.len(), 2);
    assert_eq!(stays[0]["id"], second);
    assert_eq!(stays[0]["room_number"], "202");
    assert_eq!(stays[0]["status"], "confirmed");
    assert_eq!(stays[1]["id"], first);
    assert_eq!(stays[1]["room_number"], "101");
    assert_eq!(stays[1]["status"], "cancelled");
    assert_eq!(stays[1]["check_in_date"], "2025-01-10");
    assert_eq!(stays[1]["check_out_date"], "2025-01-13");

    let res = test_app(state)
        .oneshot(get_request("/api/v1/guests/99/bookings"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guest_with_bookings_cannot_be_deleted() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;

    let res = test_app(state)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/guests/{guest_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_identification_rejected() {
    let state = test_state();
    seed_guest(&state, "ID-1").await;

    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            "/api/v1/guests",
            serde_json::json!({
                "first_name": "Ben",
                "last_name": "Cruz",
                "identification_no": "ID-1"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── Checklists ──

#[tokio::test]
async fn test_checklist_flow() {
    let state = test_state();
    let room_id = seed_room(&state, "101", 100).await;
    let guest_id = seed_guest(&state, "ID-1").await;
    let booking_id = seed_booking(&state, room_id, guest_id, "2025-01-10", "2025-01-13").await;

    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/bookings/{booking_id}/checklist"),
            serde_json::json!({ "item": "Inspect minibar", "category": "room_inspection" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let item_id = body_json(res).await["id"].as_str().unwrap().to_string();

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/checklist/{item_id}/toggle"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test_app(state.clone())
        .oneshot(get_request(&format!(
            "/api/v1/bookings/{booking_id}/checklist"
        )))
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["completed"], true);

    // Replace swaps the whole list
    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/bookings/{booking_id}/checklist"),
            serde_json::json!([
                { "item": "Fresh towels", "category": "amenities" },
                { "item": "Check shower", "category": "maintenance" }
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert!(json.as_array().unwrap().iter().all(|i| i["id"] != item_id));

    let res = test_app(state)
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/bookings/{booking_id}/checklist"),
            serde_json::json!({ "item": "Towels", "category": "laundry" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checklist_requires_booking() {
    let res = test_app(test_state())
        .oneshot(json_request(
            "POST",
            "/api/v1/bookings/42/checklist",
            serde_json::json!({ "item": "Towels", "category": "amenities" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// ── Inventory ──

#[tokio::test]
async fn test_inventory_flow() {
    let state = test_state();

    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/inventory",
            serde_json::json!({
                "name": "Towels",
                "category": "linen",
                "quantity": 50,
                "current_level": 8,
                "minimum_level": 10
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let item_id = body_json(res).await["id"].as_i64().unwrap();

    let res = test_app(state.clone())
        .oneshot(get_request("/api/v1/inventory/low-stock"))
        .await
        .unwrap();
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], item_id);

    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            &format!("/api/v1/inventory/{item_id}/restock"),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["current_level"], 50);

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/inventory/{item_id}/quantity"),
            serde_json::json!({ "quantity": 30 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["quantity"], 30);
    assert_eq!(json["current_level"], 30);

    // Level above quantity is rejected
    let res = test_app(state)
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/inventory/{item_id}"),
            serde_json::json!({ "current_level": 60 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── Expenses ──

#[tokio::test]
async fn test_expense_crud() {
    let state = test_state();

    let res = test_app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/expenses",
            serde_json::json!({
                "description": "Pool maintenance",
                "amount": 15000,
                "date_incurred": "2025-01-05"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let expense_id = body_json(res).await["id"].as_i64().unwrap();

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/expenses/{expense_id}"),
            serde_json::json!({ "amount": 18000 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["amount"], 18000);

    let res = test_app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/expenses/{expense_id}"),
            serde_json::json!({ "amount": -5 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = test_app(state.clone())
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/expenses/{expense_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = test_app(state)
        .oneshot(get_request(&format!("/api/v1/expenses/{expense_id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
