//! Owned in-memory store for every market's bounded tick window plus the
//! latest computed snapshot. One writer (the pipeline) mutates it behind a
//! lock; queries take read locks and see either the pre- or post-append
//! state, never a torn one.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::indicator::IndicatorState;
use crate::model::tick::Tick;
use crate::signal::SignalState;

/// Latest computed state for one market.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub tick: Tick,
    pub indicators: IndicatorState,
    pub signals: SignalState,
}

#[derive(Debug)]
pub struct MarketStore {
    capacity: usize,
    windows: HashMap<String, VecDeque<Tick>>,
    prices: HashMap<String, f64>,
    last_update_ms: HashMap<String, i64>,
    snapshots: HashMap<String, MarketSnapshot>,
}

impl MarketStore {
    pub fn new(markets: &[String], capacity: usize) -> Self {
        let windows = markets
            .iter()
            .map(|m| (m.clone(), VecDeque::new()))
            .collect();
        Self {
            capacity,
            windows,
            prices: HashMap::new(),
            last_update_ms: HashMap::new(),
            snapshots: HashMap::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_tracked(&self, market: &str) -> bool {
        self.windows.contains_key(market)
    }

    /// Tracked market symbols, sorted for stable iteration.
    pub fn markets(&self) -> Vec<String> {
        let mut markets: Vec<String> = self.windows.keys().cloned().collect();
        markets.sort();
        markets
    }

    /// Append a tick to a market's window, evicting from the front once the
    /// window exceeds capacity. Returns false for untracked markets.
    pub fn append(&mut self, market: &str, tick: Tick, now_ms: i64) -> bool {
        let Some(window) = self.windows.get_mut(market) else {
            return false;
        };
        window.push_back(tick);
        while window.len() > self.capacity {
            window.pop_front();
        }
        self.prices.insert(market.to_string(), tick.price);
        self.last_update_ms.insert(market.to_string(), now_ms);
        true
    }

    pub fn len(&self, market: &str) -> usize {
        self.windows.get(market).map(VecDeque::len).unwrap_or(0)
    }

    /// The full window as one slice. Needs `&mut` because the ring buffer is
    /// made contiguous in place; only the single writer calls this.
    pub fn contiguous_window(&mut self, market: &str) -> &[Tick] {
        match self.windows.get_mut(market) {
            Some(window) => window.make_contiguous(),
            None => &[],
        }
    }

    /// The most recent `n` ticks in arrival order, or fewer if unavailable.
    pub fn recent(&self, market: &str, n: usize) -> Vec<Tick> {
        let Some(window) = self.windows.get(market) else {
            return Vec::new();
        };
        let skip = window.len().saturating_sub(n);
        window.iter().skip(skip).copied().collect()
    }

    /// Clear one market's window without touching any other market.
    pub fn reset(&mut self, market: &str) -> bool {
        match self.windows.get_mut(market) {
            Some(window) => {
                window.clear();
                true
            }
            None => false,
        }
    }

    pub fn install_snapshot(&mut self, market: &str, snapshot: MarketSnapshot) {
        self.snapshots.insert(market.to_string(), snapshot);
    }

    pub fn snapshot(&self, market: &str) -> Option<&MarketSnapshot> {
        self.snapshots.get(market)
    }

    pub fn prices(&self) -> &HashMap<String, f64> {
        &self.prices
    }

    pub fn last_update(&self) -> &HashMap<String, i64> {
        &self.last_update_ms
    }

    pub fn snapshots(&self) -> &HashMap<String, MarketSnapshot> {
        &self.snapshots
    }
}
