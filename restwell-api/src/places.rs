use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use restwell_core::policy::{require_owner, ResourceKind};
use restwell_listing::place::{Place, PlaceFields};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::session::require_identity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// The client sends either `?q=` or `?query=`.
    pub q: Option<String>,
    pub query: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(list_places))
        .route(
            "/places/{id}",
            get(get_place).put(update_place).delete(delete_place),
        )
        .route("/api/places", post(create_place))
        .route("/user-places", get(user_places))
        .route("/search", get(search_places))
        .route("/api/search", get(search_places))
}

/// GET /places
/// Public, unpaginated full listing for the landing page.
async fn list_places(State(state): State<AppState>) -> Result<Json<Vec<Place>>, AppError> {
    let places = state
        .listings
        .list_all()
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(places))
}

/// GET /places/{id}
/// Public read, no session needed.
async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Place>, AppError> {
    let place = state
        .listings
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Place not found".to_string()))?;

    Ok(Json(place))
}

/// POST /api/places
/// Any authenticated user may create; the caller becomes the immutable owner.
async fn create_place(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(fields): Json<PlaceFields>,
) -> Result<Json<Place>, AppError> {
    let identity = require_identity(&jar, &state.auth)?;

    let place = Place::new(identity.id, fields);
    state
        .listings
        .insert(&place)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(place))
}

/// PUT /places/{id}
/// Ownership-checked; a mismatch is rejected before anything is written.
async fn update_place(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    Json(fields): Json<PlaceFields>,
) -> Result<Json<Place>, AppError> {
    let identity = require_identity(&jar, &state.auth)?;

    let mut place = state
        .listings
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Place not found".to_string()))?;

    require_owner(ResourceKind::Listing, place.owner, identity.id)
        .map_err(|e| AppError::AuthorizationError(e.to_string()))?;

    place.apply(fields);
    state
        .listings
        .update(&place)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(place))
}

/// DELETE /places/{id}
/// Same ownership gate as update.
async fn delete_place(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let identity = require_identity(&jar, &state.auth)?;

    let place = state
        .listings
        .get(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Place not found".to_string()))?;

    require_owner(ResourceKind::Listing, place.owner, identity.id)
        .map_err(|e| AppError::AuthorizationError(e.to_string()))?;

    state
        .listings
        .delete(id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(json!({ "success": true })))
}

/// GET /user-places
/// Only the caller's own listings.
async fn user_places(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<Place>>, AppError> {
    let identity = require_identity(&jar, &state.auth)?;

    let places = state
        .listings
        .list_by_owner(identity.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(places))
}

/// GET /search?q= (also /api/search, and ?query=)
/// Public case-insensitive substring filter over title, address, description.
async fn search_places(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Place>>, AppError> {
    let query = params.q.or(params.query).unwrap_or_default();

    let places = state
        .listings
        .search(&query)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(places))
}
