pub mod ema;
pub mod rsi;

pub use ema::ema;
pub use rsi::rsi;

use serde::Serialize;

/// EMA periods computed for every market.
pub const EMA_PERIODS: [usize; 5] = [5, 10, 20, 50, 200];
pub const RSI_PERIOD: usize = 14;

/// Indicator snapshot for one market, recomputed in full from the retained
/// history window on every tick. Recompute-from-scratch keeps the functions
/// pure; incremental carry-forward state is deliberately avoided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorState {
    pub ema5: f64,
    pub ema10: f64,
    pub ema20: f64,
    pub ema50: f64,
    pub ema200: f64,
    pub rsi: f64,
}

impl IndicatorState {
    pub fn compute(prices: &[f64]) -> Self {
        Self {
            ema5: ema(prices, 5),
            ema10: ema(prices, 10),
            ema20: ema(prices, 20),
            ema50: ema(prices, 50),
            ema200: ema(prices, 200),
            rsi: rsi(prices, RSI_PERIOD),
        }
    }

    /// Warm-up defaults served before any tick has arrived.
    pub fn neutral() -> Self {
        Self {
            ema5: 0.0,
            ema10: 0.0,
            ema20: 0.0,
            ema50: 0.0,
            ema200: 0.0,
            rsi: 50.0,
        }
    }
}

impl Default for IndicatorState {
    fn default() -> Self {
        Self::neutral()
    }
}
