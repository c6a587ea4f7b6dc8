use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::NaiveDate;
use restwell_booking::lifecycle::validate_stay;
use restwell_booking::models::{Booking, BookingStatus};
use restwell_core::policy::{require_owner, ResourceKind};
use restwell_listing::place::Place;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::session::require_identity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub place: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    #[serde(default)]
    pub phone: String,
    pub price: i32,
}

#[derive(Debug, Deserialize)]
pub struct CancelBookingRequest {
    #[serde(default)]
    pub reason: String,
}

/// A booking joined with its listing, as the account page renders it. The
/// `place` reference is expanded into the full listing document (or null if
/// the listing has since been deleted).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithPlace {
    pub id: Uuid,
    pub place: Option<Place>,
    pub holder: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub phone: String,
    pub price: i32,
    pub status: BookingStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/{id}", delete(cancel_booking))
}

/// POST /bookings
/// Session required. Dates must be a valid stay; the total price is stored
/// as submitted, and the listing is not checked for existence or conflicting
/// bookings.
async fn create_booking(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let identity = require_identity(&jar, &state.auth)?;

    validate_stay(req.check_in, req.check_out)
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let booking = Booking::new(
        identity.id,
        req.place,
        req.check_in,
        req.check_out,
        req.guests,
        req.phone,
        req.price,
    );

    state
        .bookings
        .insert(&booking)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    info!(booking = %booking.id, holder = %identity.id, "booking confirmed");
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings
/// The caller's own bookings, each expanded with its listing.
async fn list_bookings(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<BookingWithPlace>>, AppError> {
    let identity = require_identity(&jar, &state.auth)?;

    let bookings = state
        .bookings
        .list_for_holder(identity.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let mut expanded = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let place = state
            .listings
            .get(booking.place)
            .await
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        expanded.push(BookingWithPlace {
            id: booking.id,
            place,
            holder: booking.holder,
            check_in: booking.check_in,
            check_out: booking.check_out,
            guests: booking.guests,
            phone: booking.phone,
            price: booking.price,
            status: booking.status,
        });
    }

    Ok(Json(expanded))
}

/// DELETE /bookings/{id}
/// Cancellation requires the caller to be the booking's holder; the reason
/// is logged only, never stored.
async fn cancel_booking(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let identity = require_identity(&jar, &state.auth)?;

    let booking = state
        .bookings
        .find_by_id(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Booking not found".to_string()))?;

    require_owner(ResourceKind::Booking, booking.holder, identity.id)
        .map_err(|e| AppError::AuthorizationError(e.to_string()))?;

    info!(booking = %id, reason = %req.reason, "booking cancelled");

    state
        .bookings
        .delete(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(json!({ "success": true })))
}
