mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::app::App;
use crate::cli::{StoreBackendArg, CLI};
use crate::state::AppState;
use clap::Parser;
use snip_core::KeyValueStore;
use snip_generator::RandomGenerator;
use snip_shortener::{AnalyticsService, ShortenerService};
use snip_storage::{InMemoryStore, RedisStore};
use snip_telemetry::DEFAULT_DIRECTIVE;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let config = CLI::parse();

    snip_telemetry::init(config.log_format.into(), DEFAULT_DIRECTIVE)?;
    if let Ok(path) = dotenv {
        debug!(path = %path.display(), "loaded environment file");
    }

    info!(
        listen_addr = %config.listen_addr,
        store = %config.store,
        "starting gateway server"
    );

    match config.store {
        StoreBackendArg::Memory => {
            run_server(&config, InMemoryStore::new()).await?;
        }
        StoreBackendArg::Redis => {
            let store = RedisStore::connect(&config.redis_config()).await?;
            let served = run_server(&config, store.clone()).await;
            store.shutdown().await;
            served?;
        }
    }

    info!("gateway stopped");
    Ok(())
}

async fn run_server<S: KeyValueStore + Clone>(config: &CLI, store: S) -> anyhow::Result<()> {
    let shortener = ShortenerService::with_settings(
        store.clone(),
        RandomGenerator::new(),
        config.shortener_settings(),
    );
    let analytics = AnalyticsService::with_settings(store, config.analytics_settings());
    let router = App::router(AppState::new(shortener, analytics));

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received, draining connections");
}
