use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use restwell_core::credential::Credential;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::session::{self, identity_from_jar};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Identity view returned by register/login/profile. `_id` keeps the field
/// name the browser client reads.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&Credential> for ProfileResponse {
    fn from(cred: &Credential) -> Self {
        Self {
            id: cred.id,
            name: cred.name.clone(),
            email: cred.email.clone(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/profile", get(profile))
        .route("/forgot-password", post(forgot_password))
}

/// POST /register
/// Create a credential; 409 when the email is already taken.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let existing = state
        .credentials
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    if existing.is_some() {
        return Err(AppError::ConflictError("User already exists".to_string()));
    }

    let credential = Credential::new(req.name, req.email, &req.password)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    state
        .credentials
        .insert(&credential)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    tracing::info!(user = %credential.id, "registered new user");
    Ok(Json(ProfileResponse::from(&credential)))
}

/// POST /login
/// Verify the password and set the session cookie. Unknown email and wrong
/// password both answer 422, matching the contract the client expects.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let credential = state
        .credentials
        .find_by_email(&req.email)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::ValidationError("User not found".to_string()))?;

    credential
        .verify_password(&req.password)
        .map_err(|_| AppError::ValidationError("Wrong credentials".to_string()))?;

    let token = session::issue_token(&credential, &state.auth)?;
    let jar = jar.add(session::session_cookie(&state.auth, token));

    Ok((jar, Json(ProfileResponse::from(&credential))))
}

/// POST /logout
/// Stateless: clearing the cookie is the whole operation.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(session::removal_cookie(&state.auth));
    (jar, Json(true))
}

/// GET /profile
/// Anonymous-tolerant: absent or invalid cookie yields null, never an error.
async fn profile(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    let headers = [(header::CACHE_CONTROL, "no-store")];

    let Some(identity) = identity_from_jar(&jar, &state.auth) else {
        return Ok((headers, Json(Value::Null)));
    };

    let credential = state
        .credentials
        .find_by_id(identity.id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    let body = match credential {
        Some(cred) => serde_json::to_value(ProfileResponse::from(&cred))
            .map_err(|e| AppError::InternalServerError(e.to_string()))?,
        None => Value::Null,
    };

    Ok((headers, Json(body)))
}

/// POST /forgot-password
/// Stub: always claims success and never reveals whether the email exists.
async fn forgot_password(Json(req): Json<ForgotPasswordRequest>) -> Json<Value> {
    tracing::debug!(email = %req.email, "password reset requested (delivery not implemented)");
    Json(json!({ "message": "Reset link sent to your email." }))
}
