use axum::Extension;
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth;
use crate::middleware::{ApiResponse, ApiResult, Principal};

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub subject: String,
    pub remember: bool,
    pub expires_at: i64,
}

/// GET /auth/session - session introspection. A client holding a stored
/// token calls this at startup to rehydrate its admin state; an expired or
/// revoked token falls out in middleware as 401.
pub async fn whoami(Extension(principal): Extension<Principal>) -> ApiResult<SessionInfo> {
    Ok(ApiResponse::success(SessionInfo {
        subject: principal.subject,
        remember: principal.remember,
        expires_at: principal.expires_at,
    }))
}

/// DELETE /auth/session - logout. Revokes the presented token's id so it
/// stops working immediately, not just at expiry.
pub async fn logout(Extension(principal): Extension<Principal>) -> ApiResult<Value> {
    auth::revoke(principal.token_id);
    tracing::info!(token_id = %principal.token_id, "Admin logout");
    Ok(ApiResponse::success(json!({ "logged_out": true })))
}
