use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub remember: bool,
}

/// POST /auth/login - exchange the staff password for a bearer token.
///
/// `remember` requests a long-lived token (the client stores it and
/// rehydrates the session at startup via GET /auth/session); without it the
/// token only lasts for a working session. A wrong password is a plain 401
/// with no lockout, the form may be retried indefinitely.
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    if !auth::verify_password(&payload.password)? {
        return Err(ApiError::unauthorized("Wrong password"));
    }

    let claims = Claims::new(payload.remember);
    let token = auth::generate_token(&claims)?;

    tracing::info!(remember = payload.remember, "Admin login");

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: claims.expires_in_secs(),
        remember: payload.remember,
    }))
}
