//! Fan-out of per-tick updates to an open-ended set of subscribers.
//!
//! Subscribers are plain bounded channels in a registry. Publishing never
//! waits: a full or closed channel drops exactly that subscriber, so one
//! slow consumer cannot stall tick processing or other subscribers.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::indicator::IndicatorState;
use crate::signal::SignalState;
use crate::store::MarketStore;

/// Full cross-market state delivered to every new subscriber before any
/// incremental update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitSnapshot {
    pub prices: HashMap<String, f64>,
    pub indicators: HashMap<String, IndicatorState>,
    pub signals: HashMap<String, SignalState>,
}

impl InitSnapshot {
    pub fn from_store(store: &MarketStore) -> Self {
        let mut indicators = HashMap::new();
        let mut signals = HashMap::new();
        for (market, snapshot) in store.snapshots() {
            indicators.insert(market.clone(), snapshot.indicators);
            signals.insert(market.clone(), snapshot.signals.clone());
        }
        Self {
            prices: store.prices().clone(),
            indicators,
            signals,
        }
    }
}

/// One processed tick with the state computed from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickUpdate {
    pub market: String,
    pub price: f64,
    pub digit: u8,
    pub epoch: i64,
    pub indicators: IndicatorState,
    pub signals: SignalState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamMessage {
    Init(InitSnapshot),
    Tick(TickUpdate),
}

pub struct Broadcaster {
    buffer: usize,
    subscribers: Mutex<HashMap<Uuid, mpsc::Sender<StreamMessage>>>,
}

impl Broadcaster {
    pub fn new(buffer: usize) -> Self {
        Self {
            buffer: buffer.max(1),
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Register a subscriber and deliver the initial snapshot as its first
    /// message, so it never has to wait for the next tick to see state.
    pub async fn subscribe(&self, init: InitSnapshot) -> (Uuid, mpsc::Receiver<StreamMessage>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        // Capacity is >= 1 and the receiver is still local, so this send
        // cannot fail.
        let _ = tx.send(StreamMessage::Init(init)).await;
        let id = Uuid::new_v4();
        self.subscribers.lock().await.insert(id, tx);
        tracing::debug!(subscriber = %id, "subscriber added");
        (id, rx)
    }

    /// Remove a subscriber. Removing an already-gone id is a no-op.
    pub async fn unsubscribe(&self, id: Uuid) {
        if self.subscribers.lock().await.remove(&id).is_some() {
            tracing::debug!(subscriber = %id, "subscriber removed");
        }
    }

    /// Push an update to every subscriber. Channels that are closed or full
    /// are dropped from the registry; nobody else is affected.
    pub async fn publish(&self, message: StreamMessage) {
        let mut subscribers = self.subscribers.lock().await;
        let mut dead = Vec::new();
        for (id, tx) in subscribers.iter() {
            if tx.try_send(message.clone()).is_err() {
                dead.push(*id);
            }
        }
        for id in dead {
            subscribers.remove(&id);
            tracing::debug!(subscriber = %id, "subscriber dropped on failed write");
        }
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}
