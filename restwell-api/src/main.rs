use restwell_api::{
    app,
    state::{AppState, AuthConfig},
};
use restwell_store::{
    DbClient, PgBookingRepository, PgCredentialRepository, PgListingRepository,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restwell_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = restwell_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Restwell API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to database");
    db.migrate().await.expect("Failed to run migrations");

    let uploads_dir = PathBuf::from(&config.uploads.dir);
    std::fs::create_dir_all(&uploads_dir).expect("Failed to create uploads directory");

    let app_state = AppState {
        credentials: Arc::new(PgCredentialRepository::new(db.pool.clone())),
        listings: Arc::new(PgListingRepository::new(db.pool.clone())),
        bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.token_expiry_seconds,
            cookie_name: config.auth.cookie_name.clone(),
        },
        cors_origins: config.cors.allowed_origins.clone(),
        uploads_dir,
        http: reqwest::Client::new(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
