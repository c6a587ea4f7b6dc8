//! Stateless session handling. Identity is decoded fresh from the request's
//! signed cookie on every call; the server keeps no session table, so logout
//! is nothing more than clearing the cookie and validity is a signature plus
//! expiry check.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use restwell_core::credential::Credential;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AuthConfig;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

/// The verified identity of the requesting user.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub id: Uuid,
    pub email: String,
}

/// Sign a token for a freshly verified credential.
pub fn issue_token(credential: &Credential, auth: &AuthConfig) -> Result<String, AppError> {
    let claims = SessionClaims {
        sub: credential.id,
        email: credential.email.clone(),
        exp: (Utc::now() + Duration::seconds(auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}

/// Lenient verification for anonymous-tolerant endpoints: a missing, garbled
/// or expired cookie degrades to "no user" instead of an error.
pub fn identity_from_jar(jar: &CookieJar, auth: &AuthConfig) -> Option<SessionIdentity> {
    let token = jar.get(&auth.cookie_name)?.value().to_owned();

    let token_data = decode::<SessionClaims>(
        &token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    Some(SessionIdentity {
        id: token_data.claims.sub,
        email: token_data.claims.email,
    })
}

/// Strict verification for ownership-sensitive endpoints: any failure is a
/// hard 401, never a silent anonymous fallthrough.
pub fn require_identity(jar: &CookieJar, auth: &AuthConfig) -> Result<SessionIdentity, AppError> {
    identity_from_jar(jar, auth)
        .ok_or_else(|| AppError::AuthenticationError("User not authenticated".to_string()))
}

/// HTTP-only cookie carrying the session token. `SameSite=Lax` so the
/// browser attaches it on same-origin and credentialed CORS requests but not
/// on cross-site form posts.
pub fn session_cookie(auth: &AuthConfig, token: String) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Expired twin of the session cookie, used to clear it on logout.
pub fn removal_cookie(auth: &AuthConfig) -> Cookie<'static> {
    Cookie::build((auth.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> AuthConfig {
        AuthConfig {
            secret: "unit-test-secret".to_string(),
            expiration: 3600,
            cookie_name: "token".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let auth = test_auth();
        let cred = Credential::new("A".to_string(), "a@x.com".to_string(), "p1").unwrap();

        let token = issue_token(&cred, &auth).unwrap();
        let jar = CookieJar::new().add(session_cookie(&auth, token));

        let identity = identity_from_jar(&jar, &auth).expect("token should verify");
        assert_eq!(identity.id, cred.id);
        assert_eq!(identity.email, "a@x.com");
    }

    #[test]
    fn test_garbage_token_degrades_to_anonymous() {
        let auth = test_auth();
        let jar = CookieJar::new().add(session_cookie(&auth, "not-a-jwt".to_string()));

        assert!(identity_from_jar(&jar, &auth).is_none());
        assert!(require_identity(&jar, &auth).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = test_auth();
        // Correctly signed, but expired two hours ago
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(auth.secret.as_bytes()),
        )
        .unwrap();
        let jar = CookieJar::new().add(session_cookie(&auth, token));

        assert!(identity_from_jar(&jar, &auth).is_none());
        assert!(require_identity(&jar, &auth).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let auth = test_auth();
        let cred = Credential::new("A".to_string(), "a@x.com".to_string(), "p1").unwrap();
        let token = issue_token(&cred, &auth).unwrap();

        let other = AuthConfig {
            secret: "different-secret".to_string(),
            ..test_auth()
        };
        let jar = CookieJar::new().add(session_cookie(&other, token));

        assert!(identity_from_jar(&jar, &other).is_none());
    }

    #[test]
    fn test_cookie_is_http_only_lax() {
        let auth = test_auth();
        let cookie = session_cookie(&auth, "t".to_string());

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }
}
