use clap::Parser;
use ferroflake::Sonyflake;
use ferroflake_axum::{
    config::{CliArgs, ServerConfig},
    routes::{AppState, router},
    telemetry::init_tracing,
};
use tokio::{net::TcpListener, signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    init_tracing(config.log_json)?;

    let generator = Sonyflake::new(config.settings())?;
    let state = AppState::new(generator);
    log_startup_info(&config, &state);

    let listener = TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Service shut down successfully");
    Ok(())
}

fn log_startup_info(config: &ServerConfig, state: &AppState) {
    let generator = state.generator();
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting ID service on {} with full config: {:#?}, generator: {:#?}",
            config.server_addr,
            config,
            generator
        );
    } else {
        tracing::info!(
            addr = %config.server_addr,
            machine_id = generator.machine_id(),
            lifetime_secs = generator.layout().lifetime().as_secs(),
            "Starting ID service"
        );
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }

    tracing::info!("Shutdown signal received, terminating gracefully...");
}
