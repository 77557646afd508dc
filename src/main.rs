use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use presenter_rotation_api::api::{self, state::AppState};
use presenter_rotation_api::config::Config;
use presenter_rotation_api::infrastructure::database;
use presenter_rotation_api::infrastructure::repositories::SqliteRosterRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    // Connect to database
    tracing::info!(url = %config.database_url, "Connecting to database...");
    let pool = database::connect(&config.database_url, config.max_connections).await?;
    tracing::info!("Database connected successfully");

    let state = AppState::new(Arc::new(SqliteRosterRepository::new(pool)));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let mut app = api::router(state);
    if let Some(dir) = &config.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
        let index = ServeFile::new(dir.join("index.html"));
        app = app.fallback_service(ServeDir::new(dir).not_found_service(index));
    }
    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
