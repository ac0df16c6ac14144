use nora_studio_api::database::manager::DatabaseManager;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, ADMIN_* etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = nora_studio_api::config::config();
    tracing::info!("Starting Nora Studio API in {:?} mode", config.environment);

    // The pool is lazy, so a down database delays failures to first use;
    // migrations are attempted eagerly but a failure is not fatal at boot.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("Skipping migrations: {}", e);
    }

    let app = nora_studio_api::app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
