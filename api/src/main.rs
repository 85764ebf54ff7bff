pub mod app;
pub mod classifier;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod pipeline;
pub mod schema;

use anyhow::Context;
use clap::Parser;

use crate::app::AppState;
use crate::classifier::artifact;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();

    let (model_path, classifier) = artifact::load_with_fallback(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;
    log::info!(
        "loaded {} model from {}",
        classifier.kind(),
        model_path.display()
    );

    let state = AppState { classifier };

    let app = app::create_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    log::info!("listening on {}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("failed to listen for SIGTERM: {e}");
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
    log::info!("shutting down");
}
