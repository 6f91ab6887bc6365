use coursefeed_server::{AppState, config::Config, create_router, repositories};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Inizializza la configurazione
    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;
    config.print_info();

    // Pool del database + migrazioni
    let pool = repositories::connect(&config.database_url, config.max_connections).await?;
    info!("Database ready");

    let state = Arc::new(AppState::new(
        pool,
        config.jwt_secret.clone(),
        config.feed_settings(),
    ));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    // Avvia il server
    axum::serve(listener, app).await?;

    Ok(())
}
