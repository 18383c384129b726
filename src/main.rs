use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch, RwLock};

use digit_radar::broadcast::Broadcaster;
use digit_radar::config::Config;
use digit_radar::deriv::ws::DerivFeed;
use digit_radar::pipeline::TickPipeline;
use digit_radar::server::{self, AppState};
use digit_radar::store::MarketStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .json()
        .init();

    let markets = config.feed.market_symbols();
    tracing::info!(
        markets = ?markets,
        capacity = config.history.capacity,
        "starting digit-radar"
    );

    let store = Arc::new(RwLock::new(MarketStore::new(
        &markets,
        config.history.capacity,
    )));
    let broadcaster = Arc::new(Broadcaster::new(config.server.stream_buffer));

    let (tick_tx, tick_rx) = mpsc::channel(256);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (feed, mut feed_state) = DerivFeed::new(&config.feed)?;
    tokio::spawn({
        let shutdown = shutdown_rx.clone();
        async move {
            if let Err(e) = feed.run(tick_tx, shutdown).await {
                tracing::error!(error = %e, "feed task ended");
            }
        }
    });
    tokio::spawn(async move {
        while feed_state.changed().await.is_ok() {
            let state = *feed_state.borrow();
            tracing::info!(?state, "feed state changed");
        }
    });

    let pipeline = TickPipeline::new(store.clone(), broadcaster.clone());
    tokio::spawn(async move { pipeline.run(tick_rx).await });

    let app = server::build_router(AppState {
        store,
        broadcaster,
        config: config.clone(),
    });
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await?;

    Ok(())
}
