//! Booking endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, NaiveDate, Utc};
use common::{BookingId, RequestId, RoomId, UserId};
use domain::{Booking, InMemoryBookingStore};
use hotel::{InMemoryLockStore, RoomDirectory};
use saga::{BookingOrchestrator, CreateBooking, LocalHotelGateway};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The orchestrator wiring this server runs: in-memory stores behind the
/// in-process gateway.
pub type DefaultOrchestrator =
    BookingOrchestrator<InMemoryBookingStore, LocalHotelGateway<InMemoryLockStore>>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub orchestrator: DefaultOrchestrator,
    pub rooms: RoomDirectory,
}

// -- Request types --

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: i64,
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub request_id: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub request_id: String,
    pub user_id: i64,
    pub room_id: i64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub correlation_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id().to_string(),
            request_id: booking.request_id().to_string(),
            user_id: booking.user_id().as_i64(),
            room_id: booking.room_id().as_i64(),
            check_in: booking.period().check_in(),
            check_out: booking.period().check_out(),
            status: booking.status().to_string(),
            correlation_id: booking.correlation_id().to_string(),
            created_at: booking.created_at(),
        }
    }
}

// -- Handlers --

/// POST /bookings — run the booking saga for one request.
///
/// Returns 201 with the booking in its terminal status; a cancelled
/// booking is a normal response, not an error. Only malformed input or a
/// local storage failure produces an error status.
#[tracing::instrument(skip(state, req), fields(request_id = %req.request_id))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(axum::http::StatusCode, Json<BookingResponse>), ApiError> {
    let booking = state
        .orchestrator
        .create_booking(CreateBooking {
            user_id: UserId::new(req.user_id),
            room_id: RoomId::new(req.room_id),
            check_in: req.check_in,
            check_out: req.check_out,
            request_id: RequestId::new(req.request_id),
        })
        .await?;

    Ok((axum::http::StatusCode::CREATED, Json(booking.into())))
}

/// GET /bookings/:id — load a booking by ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, ApiError> {
    let uuid = uuid::Uuid::parse_str(&id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid booking id: {e}")))?;
    let booking = state
        .orchestrator
        .get_booking(BookingId::from_uuid(uuid))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Booking {id} not found")))?;

    Ok(Json(booking.into()))
}
