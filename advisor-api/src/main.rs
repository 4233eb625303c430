//! Advisor API binary

use advisor_api::{create_router, AdvisorConfig, AppState};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AdvisorConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("advisor_api=info,advisor_pricing=info,tower_http=info"));
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("Starting advisor API v{}", advisor_pricing::VERSION);

    let suggester = config.build_suggester()?;
    let overrides = config.region_table()?;
    for (region, bucket) in overrides.overrides() {
        info!(region, bucket, "Region override");
    }
    info!(
        region_overrides = overrides.len(),
        scheme = advisor_pricing::MARKET_FACTOR_SCHEME,
        "Price suggester initialized"
    );

    let app = create_router(AppState::new(suggester));

    let addrs = config.listen_addrs()?;
    let listener = tokio::net::TcpListener::bind(addrs.as_slice()).await?;
    info!("Listening on {}", listener.local_addr()?);
    info!("Endpoints: /health, /version, /suggest-price");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down advisor API");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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
    info!("Received shutdown signal");
}
