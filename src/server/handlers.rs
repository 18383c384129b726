use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::codegen::{dbot, pinescript};
use crate::config::ReadinessConfig;
use crate::indicator::IndicatorState;
use crate::model::tick::Tick;
use crate::signal::readiness::{evaluate_profile, ReadinessInputs, ReadinessReport};
use crate::signal::SignalState;
use crate::stats::{self, DigitStats};
use crate::store::MarketStore;

use super::{ApiError, AppState};

const DEFAULT_TICK_LIMIT: usize = 100;
const DEFAULT_ANALYSIS_WINDOW: usize = 1000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricesResponse {
    pub prices: HashMap<String, f64>,
    pub last_update: HashMap<String, i64>,
}

pub async fn prices(State(state): State<Arc<AppState>>) -> Json<PricesResponse> {
    let store = state.store.read().await;
    Json(PricesResponse {
        prices: store.prices().clone(),
        last_update: store.last_update().clone(),
    })
}

#[derive(Debug, Deserialize)]
pub struct TicksQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicksResponse {
    pub market: String,
    pub ticks: Vec<Tick>,
    pub count: usize,
}

/// Unknown markets yield an empty tick list, not an error.
pub async fn ticks(
    Path(market): Path<String>,
    Query(query): Query<TicksQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<TicksResponse> {
    let market = market.to_ascii_uppercase();
    let limit = query.limit.unwrap_or(DEFAULT_TICK_LIMIT);
    let store = state.store.read().await;
    let ticks = store.recent(&market, limit);
    Json(TicksResponse {
        market,
        count: ticks.len(),
        ticks,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub market: String,
    pub indicators: IndicatorState,
    pub signals: SignalState,
    pub readiness: Vec<ReadinessReport>,
}

/// Indicator and signal state for one market; neutral defaults when the
/// market is unknown or has no ticks yet.
pub async fn market_stats(
    Path(market): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Json<StatsResponse> {
    let market = market.to_ascii_uppercase();
    let store = state.store.read().await;
    let (indicators, signals) = match store.snapshot(&market) {
        Some(snapshot) => (snapshot.indicators, snapshot.signals.clone()),
        None => (IndicatorState::neutral(), SignalState::warming_up()),
    };
    let readiness = readiness_for(&store, &market, &state.config.readiness, Utc::now().hour());
    Json(StatsResponse {
        market,
        indicators,
        signals,
        readiness,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalsResponse {
    pub signals: HashMap<String, SignalState>,
    pub readiness: HashMap<String, Vec<ReadinessReport>>,
    pub prices: HashMap<String, f64>,
    pub timestamp: i64,
}

pub async fn all_signals(State(state): State<Arc<AppState>>) -> Json<SignalsResponse> {
    let store = state.store.read().await;
    let hour = Utc::now().hour();
    let mut signals = HashMap::new();
    let mut readiness = HashMap::new();
    for market in store.markets() {
        if let Some(snapshot) = store.snapshot(&market) {
            signals.insert(market.clone(), snapshot.signals.clone());
        }
        readiness.insert(
            market.clone(),
            readiness_for(&store, &market, &state.config.readiness, hour),
        );
    }
    Json(SignalsResponse {
        signals,
        readiness,
        prices: store.prices().clone(),
        timestamp: Utc::now().timestamp_millis(),
    })
}

#[derive(Debug, Deserialize)]
pub struct AnalysisQuery {
    pub window: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitAnalysisResponse {
    pub market: String,
    pub window: usize,
    #[serde(flatten)]
    pub stats: DigitStats,
}

pub async fn digit_analysis(
    Path(market): Path<String>,
    Query(query): Query<AnalysisQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<DigitAnalysisResponse> {
    let market = market.to_ascii_uppercase();
    let window = query.window.unwrap_or(DEFAULT_ANALYSIS_WINDOW);
    let store = state.store.read().await;
    let ticks = store.recent(&market, window);
    Json(DigitAnalysisResponse {
        market,
        window,
        stats: stats::digit_stats(&ticks),
    })
}

#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    pub script: String,
}

pub async fn pinescript(
    State(_state): State<Arc<AppState>>,
    Json(req): Json<pinescript::ScriptRequest>,
) -> Result<Json<ScriptResponse>, ApiError> {
    let script = pinescript::generate(&req)?;
    Ok(Json(ScriptResponse { script }))
}

#[derive(Debug, Serialize)]
pub struct BotXmlResponse {
    pub xml: String,
}

pub async fn dbot_xml(
    State(_state): State<Arc<AppState>>,
    Json(req): Json<dbot::BotRequest>,
) -> Result<Json<BotXmlResponse>, ApiError> {
    let xml = dbot::generate(&req)?;
    Ok(Json(BotXmlResponse { xml }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    pub market: String,
    pub cleared: bool,
}

/// Clear one market's history window, leaving every other market untouched.
pub async fn tracker_reset(
    Path(market): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ResetResponse>, ApiError> {
    let market = market.to_ascii_uppercase();
    let mut store = state.store.write().await;
    if store.reset(&market) {
        tracing::info!(%market, "history window reset");
        Ok(Json(ResetResponse {
            market,
            cleared: true,
        }))
    } else {
        Err(ApiError::not_found(format!(
            "market '{}' is not tracked",
            market
        )))
    }
}

/// Score every configured profile against one market's current window.
fn readiness_for(
    store: &MarketStore,
    market: &str,
    cfg: &ReadinessConfig,
    hour_utc: u32,
) -> Vec<ReadinessReport> {
    let window = store.recent(market, cfg.frequency_window);
    let rsi = store
        .snapshot(market)
        .map(|s| s.indicators.rsi)
        .unwrap_or(50.0);
    let move_window = store.recent(market, cfg.price_move_span);
    let price_move = stats::price_change(&move_window, cfg.price_move_span);
    cfg.profiles
        .iter()
        .map(|profile| {
            let inputs = ReadinessInputs {
                digit_pct: stats::digit_pct(&window, profile.digit),
                rsi,
                price_move,
                hour_utc,
            };
            evaluate_profile(profile, cfg, &inputs)
        })
        .collect()
}
