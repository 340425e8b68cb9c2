use covid_dashboard::{router, AppState, CaseDataLoader, Config};
use std::net::SocketAddr;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let loader = CaseDataLoader::from_config(&config)?;
    info!(
        "case data from {} (timeout {:?}, retry {})",
        config.cases_url, config.fetch_timeout, config.fetch_retry
    );

    let app = router(AppState::new(loader));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    }
}
