use axum::{http::HeaderValue, http::Method, routing::get, Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod bookings;
pub mod error;
pub mod places;
pub mod session;
pub mod state;
pub mod uploads;

pub use state::AppState;

/// Assemble the full application router. The session cookie travels on
/// cross-origin requests, so CORS is restricted to the configured origins
/// with credentials enabled rather than a wildcard.
pub fn app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/test", get(health_check))
        .merge(auth::routes())
        .merge(places::routes())
        .merge(bookings::routes())
        .merge(uploads::routes())
        .nest_service("/uploads", ServeDir::new(&state.uploads_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<&'static str> {
    Json("ok")
}
