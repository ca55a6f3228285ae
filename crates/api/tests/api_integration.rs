//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let config = api::Config::default();
    let state = api::create_default_state(&config);
    api::create_app(state, get_metrics_handle())
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn booking_body(request_id: &str, room_id: i64, from: i64, to: i64) -> serde_json::Value {
    let today = Utc::now().date_naive();
    serde_json::json!({
        "user_id": 7,
        "room_id": room_id,
        "check_in": today + Duration::days(from),
        "check_out": today + Duration::days(to),
        "request_id": request_id,
    })
}

#[tokio::test]
async fn health_check() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn create_booking_confirms() {
    let app = setup();

    let response = app
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-a", 301, 1, 3),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["status"], "Confirmed");
    assert_eq!(json["request_id"], "req-a");
    assert!(json["id"].as_str().is_some());
    assert!(json["correlation_id"].as_str().is_some());
}

#[tokio::test]
async fn create_and_get_booking() {
    let app = setup();

    let created = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-a", 301, 1, 3),
        ))
        .await
        .unwrap();
    let created_json = response_json(created).await;
    let id = created_json["id"].as_str().unwrap();

    let fetched = app
        .oneshot(
            Request::builder()
                .uri(format!("/bookings/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched_json = response_json(fetched).await;
    assert_eq!(fetched_json["id"], id);
    assert_eq!(fetched_json["status"], "Confirmed");
}

#[tokio::test]
async fn conflicting_booking_comes_back_cancelled() {
    let app = setup();

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-a", 301, 1, 3),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(first).await["status"], "Confirmed");

    // Overlapping range on the same room: saga cancels, HTTP still 201.
    let second = app
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-b", 301, 2, 4),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CREATED);
    assert_eq!(response_json(second).await["status"], "Cancelled");
}

#[tokio::test]
async fn duplicate_request_replays_same_booking() {
    let app = setup();

    let first = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-a", 301, 1, 3),
        ))
        .await
        .unwrap();
    let first_json = response_json(first).await;

    let replay = app
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-a", 301, 5, 8),
        ))
        .await
        .unwrap();
    let replay_json = response_json(replay).await;

    assert_eq!(first_json["id"], replay_json["id"]);
    assert_eq!(first_json["check_out"], replay_json["check_out"]);
}

#[tokio::test]
async fn invalid_date_range_is_bad_request() {
    let app = setup();

    let response = app
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-a", 301, 3, 1),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_request_id_is_bad_request() {
    let app = setup();

    let response = app
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("", 301, 1, 3),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_booking_is_not_found() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/bookings/{}", uuid::Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn room_suggestions_rank_least_booked_first() {
    let app = setup();

    for (id, number) in [(1, "A"), (2, "B"), (3, "C")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/rooms",
                serde_json::json!({ "id": id, "number": number, "capacity": 2 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Room 1 twice, rooms 2 and 3 once each.
    for (request_id, room_id, from, to) in [
        ("req-1", 1, 1, 2),
        ("req-2", 1, 3, 4),
        ("req-3", 2, 1, 2),
        ("req-4", 3, 1, 2),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/bookings",
                booking_body(request_id, room_id, from, to),
            ))
            .await
            .unwrap();
        assert_eq!(response_json(response).await["status"], "Confirmed");
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/rooms/suggestions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|room| room["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[tokio::test]
async fn unavailable_room_still_books_when_free() {
    let app = setup();

    let register = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/rooms",
            serde_json::json!({ "id": 302, "number": "302", "capacity": 2, "available": false }),
        ))
        .await
        .unwrap();
    assert_eq!(register.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/bookings",
            booking_body("req-c", 302, 2, 4),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(response).await["status"], "Confirmed");
}

#[tokio::test]
async fn metrics_endpoint_renders() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
