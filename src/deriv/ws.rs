use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite;
use url::Url;

use crate::config::FeedConfig;
use crate::deriv::types::{SubscribeRequest, TickEnvelope};
use crate::error::AppError;
use crate::model::tick::Tick;

/// Connection state of the upstream feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Disconnected,
    Connecting,
    Connected,
}

/// Upstream tick feed client. Subscribes to every configured market once the
/// socket is up, normalizes tick frames onto the pipeline channel, and
/// retries forever with a fixed delay after any close or error.
pub struct DerivFeed {
    endpoint: Url,
    markets: Vec<String>,
    reconnect_delay: Duration,
    state_tx: watch::Sender<FeedState>,
    discarded: AtomicU64,
}

impl DerivFeed {
    pub fn new(cfg: &FeedConfig) -> Result<(Self, watch::Receiver<FeedState>), AppError> {
        let endpoint = cfg.endpoint()?;
        let markets = cfg.market_symbols();
        if markets.is_empty() {
            return Err(AppError::Feed("no markets to subscribe to".to_string()));
        }
        let (state_tx, state_rx) = watch::channel(FeedState::Disconnected);
        Ok((
            Self {
                endpoint,
                markets,
                reconnect_delay: Duration::from_secs(cfg.reconnect_delay_secs),
                state_tx,
                discarded: AtomicU64::new(0),
            },
            state_rx,
        ))
    }

    pub fn state(&self) -> FeedState {
        *self.state_tx.borrow()
    }

    /// Frames discarded because they failed to parse as a tick.
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    fn transition(&self, next: FeedState) {
        self.state_tx.send_replace(next);
    }

    /// Run the feed until shutdown. A connection failure is never surfaced
    /// to consumers; it schedules the next attempt after the fixed delay.
    pub async fn run(
        &self,
        tick_tx: mpsc::Sender<(String, Tick)>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        loop {
            self.transition(FeedState::Connecting);
            match self.connect_once(&tick_tx, &mut shutdown).await {
                Ok(()) => {
                    // Clean shutdown requested
                    self.transition(FeedState::Disconnected);
                    return Ok(());
                }
                Err(e) => {
                    self.transition(FeedState::Disconnected);
                    tracing::warn!(
                        error = %e,
                        delay_secs = self.reconnect_delay.as_secs(),
                        "feed disconnected, scheduling reconnect"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(self.reconnect_delay) => {}
                        _ = shutdown.changed() => {
                            tracing::info!("shutdown during reconnect wait");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn connect_once(
        &self,
        tick_tx: &mpsc::Sender<(String, Tick)>,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<()> {
        tracing::info!(endpoint = %self.endpoint, "connecting to feed");
        let (ws_stream, _resp) = tokio_tungstenite::connect_async(self.endpoint.as_str())
            .await
            .context("feed connect failed")?;

        self.transition(FeedState::Connected);
        tracing::info!(markets = self.markets.len(), "feed connected");

        let (mut write, mut read) = ws_stream.split();
        for market in &self.markets {
            let request = serde_json::to_string(&SubscribeRequest::ticks(market))?;
            write
                .send(tungstenite::Message::Text(request))
                .await
                .with_context(|| format!("tick subscription for {} failed", market))?;
        }

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(tungstenite::Message::Text(text))) => {
                            self.handle_frame(&text, tick_tx);
                        }
                        Some(Ok(tungstenite::Message::Ping(_))) => {
                            // tokio-tungstenite answers pings automatically
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            return Err(anyhow::anyhow!("feed read error: {}", e));
                        }
                        None => {
                            return Err(anyhow::anyhow!("feed stream ended"));
                        }
                    }
                }
                _ = shutdown.changed() => {
                    return Ok(());
                }
            }
        }
    }

    /// Malformed frames are discarded silently: counted and debug-logged,
    /// never allowed to break the read loop.
    fn handle_frame(&self, text: &str, tick_tx: &mpsc::Sender<(String, Tick)>) {
        match serde_json::from_str::<TickEnvelope>(text) {
            Ok(envelope) => match envelope.normalize() {
                Some((market, tick)) => {
                    if tick_tx.try_send((market, tick)).is_err() {
                        tracing::warn!("tick channel full, dropping tick");
                    }
                }
                None => {
                    self.discarded.fetch_add(1, Ordering::Relaxed);
                }
            },
            Err(e) => {
                self.discarded.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(error = %e, "unparseable feed frame discarded");
            }
        }
    }
}
