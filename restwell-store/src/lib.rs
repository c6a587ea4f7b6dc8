pub mod app_config;
pub mod booking_repo;
pub mod credential_repo;
pub mod database;
pub mod listing_repo;
pub mod memory;

pub use booking_repo::PgBookingRepository;
pub use credential_repo::PgCredentialRepository;
pub use database::DbClient;
pub use listing_repo::PgListingRepository;
pub use memory::{MemoryBookingRepository, MemoryCredentialRepository, MemoryListingRepository};
