use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// bcrypt work factor. Matches the 10 salt rounds the platform has always
/// used; stored hashes embed their own cost, so this can be raised later
/// without invalidating existing credentials.
pub const HASH_COST: u32 = 10;

/// A registered user identity. Referenced by listings (owner) and bookings
/// (holder) via `id`; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Build a new credential, hashing the plaintext password. The plaintext
    /// is dropped here and never stored or logged.
    pub fn new(name: String, email: String, password: &str) -> Result<Self, CredentialError> {
        let password_hash = bcrypt::hash(password, HASH_COST)
            .map_err(|e| CredentialError::HashFailure(e.to_string()))?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check a login attempt against the stored hash. `bcrypt::verify`
    /// re-derives the hash, so the comparison cost does not depend on where
    /// the inputs first differ.
    pub fn verify_password(&self, password: &str) -> Result<(), CredentialError> {
        let ok = bcrypt::verify(password, &self.password_hash)
            .map_err(|e| CredentialError::HashFailure(e.to_string()))?;
        if ok {
            Ok(())
        } else {
            Err(CredentialError::WrongCredentials)
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("User not found")]
    NotFound,

    #[error("Wrong credentials")]
    WrongCredentials,

    #[error("Password hashing failed: {0}")]
    HashFailure(String),
}

/// Repository trait for credential persistence. Emails are unique with
/// case-sensitive exact matching.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn insert(
        &self,
        credential: &Credential,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, Box<dyn std::error::Error + Send + Sync>>;

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Credential>, Box<dyn std::error::Error + Send + Sync>>;
}
