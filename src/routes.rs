use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{self, Environment};
use crate::handlers;
use crate::middleware::admin_auth_middleware;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(admin_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router {
    use handlers::public;

    Router::new()
        .route("/auth/login", post(public::auth::login))
        .route("/bookings", post(public::bookings::create))
        .route("/bookings/:tracking_code", get(public::bookings::lookup))
        .route("/reviews", get(public::reviews::list))
        .route("/reviews/featured", get(public::reviews::featured))
        .route("/homepage", get(public::catalog::homepage))
        .route("/portfolio", get(public::catalog::portfolio))
        .route("/categories", get(public::catalog::categories))
        .route("/plans", get(public::catalog::plans))
}

fn admin_routes() -> Router {
    use handlers::admin;

    Router::new()
        .route("/auth/session", get(admin::session::whoami).delete(admin::session::logout))
        .route("/api/admin/mutations", post(admin::mutations::mutate))
        .route("/api/admin/bookings", get(admin::lists::bookings))
        .route("/api/admin/reviews", get(admin::lists::reviews))
        .route("/api/admin/homepage", get(admin::lists::homepage))
        .route("/api/admin/plans", get(admin::lists::plans))
        .route_layer(middleware::from_fn(admin_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let config = config::config();

    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Nora Studio API",
            "version": version,
            "description": "Booking, review and homepage-curation backend for the studio site",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/auth/login (public), /auth/session (bearer token)",
                "bookings": "POST /bookings, GET /bookings/:tracking_code (public)",
                "reviews": "/reviews, /reviews/featured (public)",
                "catalog": "/homepage, /portfolio, /categories, /plans (public)",
                "admin": "/api/admin/* (bearer token)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
