//! Per-tick processing: append to the history window, recompute indicators
//! and signals from the updated window, cache the snapshot, publish to
//! subscribers. The whole mutation sequence runs under one write lock so
//! readers never observe a half-applied tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, RwLock};

use crate::broadcast::{Broadcaster, StreamMessage, TickUpdate};
use crate::indicator::IndicatorState;
use crate::model::tick::Tick;
use crate::signal;
use crate::store::{MarketSnapshot, MarketStore};

pub struct TickPipeline {
    store: Arc<RwLock<MarketStore>>,
    broadcaster: Arc<Broadcaster>,
    discarded: AtomicU64,
}

impl TickPipeline {
    pub fn new(store: Arc<RwLock<MarketStore>>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            store,
            broadcaster,
            discarded: AtomicU64::new(0),
        }
    }

    /// Drain the feed channel until it closes.
    pub async fn run(&self, mut ticks: mpsc::Receiver<(String, Tick)>) {
        while let Some((market, tick)) = ticks.recv().await {
            self.process(&market, tick).await;
        }
        tracing::info!("tick channel closed, pipeline stopped");
    }

    pub async fn process(&self, market: &str, tick: Tick) {
        let update = {
            let mut store = self.store.write().await;
            if !store.append(market, tick, Utc::now().timestamp_millis()) {
                self.discarded.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(market, "tick for untracked market discarded");
                return;
            }
            let window = store.contiguous_window(market);
            let prices: Vec<f64> = window.iter().map(|t| t.price).collect();
            let indicators = IndicatorState::compute(&prices);
            let signals = signal::evaluate(&indicators, window, tick.price);
            let snapshot = MarketSnapshot {
                tick,
                indicators,
                signals,
            };
            store.install_snapshot(market, snapshot.clone());
            TickUpdate {
                market: market.to_string(),
                price: tick.price,
                digit: tick.digit,
                epoch: tick.epoch,
                indicators: snapshot.indicators,
                signals: snapshot.signals,
            }
        };
        self.broadcaster.publish(StreamMessage::Tick(update)).await;
    }

    /// Ticks dropped because their symbol is not tracked.
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }
}
