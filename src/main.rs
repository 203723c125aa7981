use clap::Parser;
use tracing_subscriber::EnvFilter;

use campaign_api_rust::config;
use campaign_api_rust::database::DatabaseManager;
use campaign_api_rust::handlers::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "campaign-api-rust")]
#[command(about = "Campaign / ad group API server")]
#[command(version)]
struct ServerArgs {
    #[arg(long, env = "CAMPAIGN_API_PORT", default_value_t = 3000)]
    port: u16,

    #[arg(long, env = "CAMPAIGN_API_BIND", default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting campaign API in {:?} mode", config.environment);
    if config.security.enable_auth && config.security.jwt_secret.is_empty() {
        anyhow::bail!("security.enable_auth is set but JWT_SECRET is empty");
    }

    let pool = DatabaseManager::connect().await?;
    if config.database.run_migrations {
        DatabaseManager::migrate(&pool).await?;
    }

    let app = router(AppState::new(pool.clone(), config));

    let bind_addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Campaign API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
