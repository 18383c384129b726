//! HTTP query surface: REST snapshot queries, template generation, and the
//! SSE tick stream.

mod error;
mod handlers;
mod stream;

pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::broadcast::Broadcaster;
use crate::config::Config;
use crate::store::MarketStore;

pub struct AppState {
    pub store: Arc<RwLock<MarketStore>>,
    pub broadcaster: Arc<Broadcaster>,
    pub config: Config,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/prices", get(handlers::prices))
        .route("/api/ticks/{market}", get(handlers::ticks))
        .route("/api/stats/{market}", get(handlers::market_stats))
        .route("/api/signals", get(handlers::all_signals))
        .route("/api/digit-analysis/{market}", get(handlers::digit_analysis))
        .route("/api/stream", get(stream::stream))
        .route("/api/pinescript", post(handlers::pinescript))
        .route("/api/dbot-xml", post(handlers::dbot_xml))
        .route("/api/tracker-reset/{market}", post(handlers::tracker_reset))
        .with_state(Arc::new(state))
}
