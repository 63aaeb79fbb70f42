mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use truthcart_source::{HttpSignalSource, SignalSource};

use crate::api::{build_app, default_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = truthcart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let engine_config = match &config.engine_config_path {
        Some(path) => truthcart_core::load_engine_config(path)?,
        None => truthcart_core::EngineConfig::default(),
    };

    let source = match &config.source_url {
        Some(url) => SignalSource::Http(HttpSignalSource::new(
            url,
            config.source_timeout_secs,
            &config.source_user_agent,
        )?),
        None => {
            tracing::warn!(
                "TRUTHCART_SOURCE_URL not set; every analysis will report insufficient data"
            );
            SignalSource::Disabled
        }
    };

    let state = AppState {
        engine_config: Arc::new(engine_config),
        source: Arc::new(source),
        source_timeout: Duration::from_secs(config.source_timeout_secs),
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "truthcart server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
