pub mod readiness;
pub mod rules;
pub mod streak;

pub use rules::{EvenOdd, OverUnder, ParityCount, RangeCount, RiseFall, Trend};

use serde::Serialize;

use crate::indicator::IndicatorState;
use crate::model::tick::Tick;

/// Categorical signal record for one market. Pure function of the indicator
/// state, the retained tick window and the current price; discarded and
/// recomputed on every tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalState {
    pub rise_fall: RiseFall,
    pub even_odd: ParityCount,
    pub over_under: RangeCount,
    pub trend: Trend,
    pub even_streak: usize,
    pub odd_streak: usize,
    pub rise_streak: usize,
    pub greenlight: bool,
}

pub fn evaluate(ind: &IndicatorState, ticks: &[Tick], price: f64) -> SignalState {
    let start = ticks.len().saturating_sub(rules::RECENT_WINDOW);
    let recent_digits: Vec<u8> = ticks[start..].iter().map(|t| t.digit).collect();

    let rise_fall = rules::rise_fall(ind, price, ticks.len());
    let greenlight = matches!(rise_fall, RiseFall::Rise | RiseFall::Fall);
    SignalState {
        rise_fall,
        even_odd: rules::even_odd(&recent_digits, ind.rsi),
        over_under: rules::over_under(&recent_digits, ind.rsi),
        trend: rules::trend(ind),
        even_streak: streak::parity_streak(ticks, true),
        odd_streak: streak::parity_streak(ticks, false),
        rise_streak: streak::rise_streak(ticks),
        greenlight,
    }
}

impl SignalState {
    /// Warm-up record served for a market that has no ticks yet.
    pub fn warming_up() -> Self {
        Self {
            rise_fall: RiseFall::Scanning,
            even_odd: ParityCount {
                signal: EvenOdd::Waiting,
                even: 0,
                odd: 0,
            },
            over_under: RangeCount {
                signal: OverUnder::Scanning,
                low: 0,
                high: 0,
            },
            trend: Trend::Flat,
            even_streak: 0,
            odd_streak: 0,
            rise_streak: 0,
            greenlight: false,
        }
    }
}
