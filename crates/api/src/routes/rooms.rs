//! Room registration and suggestion endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::RoomId;
use hotel::Room;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::bookings::AppState;

#[derive(Deserialize)]
pub struct RegisterRoomRequest {
    pub id: i64,
    pub number: String,
    pub capacity: u32,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Serialize)]
pub struct RoomResponse {
    pub id: i64,
    pub number: String,
    pub capacity: u32,
    pub available: bool,
    pub times_booked: u64,
}

#[derive(Serialize)]
pub struct RoomSuggestionResponse {
    pub id: i64,
    pub number: String,
    pub times_booked: u64,
}

/// POST /rooms — register (or replace) a room record.
#[tracing::instrument(skip(state, req), fields(room_id = req.id))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRoomRequest>,
) -> (axum::http::StatusCode, Json<RoomResponse>) {
    let mut room = Room::new(RoomId::new(req.id), req.number, req.capacity);
    room.available = req.available;
    state.rooms.register(room.clone()).await;

    let response = RoomResponse {
        id: room.id.as_i64(),
        number: room.number,
        capacity: room.capacity,
        available: room.available,
        times_booked: room.times_booked,
    };
    (axum::http::StatusCode::CREATED, Json(response))
}

/// GET /rooms/suggestions — rooms ranked least-booked first.
#[tracing::instrument(skip(state))]
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSuggestionResponse>>, ApiError> {
    let ranked = state.orchestrator.room_suggestions().await?;
    let response = ranked
        .into_iter()
        .map(|view| RoomSuggestionResponse {
            id: view.id.as_i64(),
            number: view.number,
            times_booked: view.times_booked,
        })
        .collect();
    Ok(Json(response))
}
