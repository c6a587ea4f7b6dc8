use restwell_booking::models::BookingRepository;
use restwell_core::credential::CredentialRepository;
use restwell_listing::place::ListingRepository;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    /// Seconds until an issued token expires.
    pub expiration: u64,
    pub cookie_name: String,
}

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub auth: AuthConfig,
    pub cors_origins: Vec<String>,
    pub uploads_dir: PathBuf,
    pub http: reqwest::Client,
}
