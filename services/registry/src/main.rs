use anyhow::Result;
use common::config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use registry::{AppState, create_router, repositories::UserRepository, shutdown::shutdown_signal};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting user registry service");
    info!("Id assignment strategy: {:?}", config.id_strategy);

    let app_state = AppState::new(UserRepository::new(config.id_strategy));
    let app = create_router(app_state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("User registry listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("User registry stopped");
    Ok(())
}
