use forum::core::jobs::start_account_sweep;
use forum::core::{AppState, Config};
use forum::services::{LogTransport, MailService};
use sqlx::mysql::MySqlPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    config.print_info();

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect(&config.database_url)
        .await?;
    info!("Connected to the database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    let mail = MailService::new(
        Arc::new(LogTransport),
        config.mail_from.clone(),
        config.base_url.clone(),
    );
    let state = Arc::new(AppState::new(
        pool,
        config.jwt_secret.clone(),
        mail,
        config.poll_validator,
    ));

    tokio::spawn(start_account_sweep(
        state.clone(),
        config.account_sweep_interval_secs,
    ));

    let app = forum::create_router(state).layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
