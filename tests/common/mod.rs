use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "correct-secret";

/// Configure the auth environment once, before the config singleton is
/// first touched. DATABASE_URL is cleared so any path that would reach the
/// store fails loudly instead of depending on ambient state.
#[allow(dead_code)]
pub fn init() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        init_auth_env();
        std::env::remove_var("DATABASE_URL");
    });
}

/// Same auth setup but with DATABASE_URL left in place, for the tests that
/// exercise the store through a real database.
#[allow(dead_code)]
pub fn init_with_store() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(init_auth_env);
}

fn init_auth_env() {
    std::env::set_var(
        "ADMIN_PASSWORD_SHA256",
        nora_studio_api::auth::sha256_hex(ADMIN_PASSWORD),
    );
    std::env::set_var("ADMIN_JWT_SECRET", "integration-test-signing-key");
}

/// Fire a single request at a fresh router and return (status, json body)
pub async fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let app = nora_studio_api::app();

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Ok((status, value))
}

/// Log in with the configured password and return a bearer token
pub async fn login(remember: bool) -> Result<String> {
    let (status, body) = request(
        "POST",
        "/auth/login",
        None,
        Some(serde_json::json!({ "password": ADMIN_PASSWORD, "remember": remember })),
    )
    .await?;

    anyhow::ensure!(status == StatusCode::OK, "login failed: {}", body);
    Ok(body["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string())
}
