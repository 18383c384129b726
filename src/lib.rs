//! digit-radar: ingest a live tick feed for a fixed set of synthetic
//! volatility indices, maintain bounded per-market history, recompute
//! EMA/RSI indicators and categorical digit signals on every tick, and fan
//! the combined state out to SSE subscribers and REST queries.

pub mod broadcast;
pub mod codegen;
pub mod config;
pub mod deriv;
pub mod error;
pub mod indicator;
pub mod model;
pub mod pipeline;
pub mod server;
pub mod signal;
pub mod stats;
pub mod store;
