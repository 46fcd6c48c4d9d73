use std::sync::Arc;

use chrono::Utc;
use swosh::config::Config;
use swosh::errors::StartupError;
use swosh::repository::{self, SwoshRepository};
use swosh::AppState;
use tokio::signal;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swosh=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let repo = repository::from_config(&config).await?;

    tokio::spawn(sweep_expired(repo.clone(), config.expiry_sweep_interval));

    let app = swosh::router(AppState::new(repo, config.phone_region));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, region = ?config.phone_region, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn sweep_expired(repo: Arc<dyn SwoshRepository>, every: std::time::Duration) {
    let mut interval = time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        match repo.purge_expired(Utc::now()).await {
            Ok(0) => {}
            Ok(purged) => info!(purged, "removed expired swoshes"),
            Err(err) => error!(error = %err, "expiry sweep failed"),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
