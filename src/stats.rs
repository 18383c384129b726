//! Digit-distribution statistics over a tick window.

use serde::Serialize;

use crate::model::tick::Tick;

/// Digit counts and derived percentages for a window of ticks. Percentages
/// are rounded to two decimals, matching the query wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitStats {
    pub total: usize,
    pub counts: [usize; 10],
    pub percentages: [f64; 10],
    pub cold_digit: u8,
    pub hot_digit: u8,
    pub even_pct: f64,
    pub over5_pct: f64,
}

pub fn digit_stats(ticks: &[Tick]) -> DigitStats {
    let mut counts = [0usize; 10];
    for tick in ticks {
        counts[tick.digit as usize] += 1;
    }
    let total = ticks.len();
    let denom = total.max(1) as f64;

    let mut percentages = [0.0f64; 10];
    for (digit, count) in counts.iter().enumerate() {
        percentages[digit] = round2(*count as f64 / denom * 100.0);
    }

    // First occurrence wins on ties, for both extremes.
    let mut cold = 0u8;
    let mut hot = 0u8;
    for digit in 1..10u8 {
        if counts[digit as usize] < counts[cold as usize] {
            cold = digit;
        }
        if counts[digit as usize] > counts[hot as usize] {
            hot = digit;
        }
    }

    let even: usize = counts.iter().step_by(2).sum();
    let over5: usize = counts[5..].iter().sum();

    DigitStats {
        total,
        counts,
        percentages,
        cold_digit: cold,
        hot_digit: hot,
        even_pct: round2(even as f64 / denom * 100.0),
        over5_pct: round2(over5 as f64 / denom * 100.0),
    }
}

/// Frequency of one digit over the window, percent. An empty window reports
/// the uniform 10.0 so downstream thresholds see a neutral value.
pub fn digit_pct(ticks: &[Tick], digit: u8) -> f64 {
    if ticks.is_empty() {
        return 10.0;
    }
    let count = ticks.iter().filter(|t| t.digit == digit).count();
    count as f64 / ticks.len() as f64 * 100.0
}

/// Absolute price movement between the latest tick and the tick `span - 1`
/// positions before it; 0 when the window is shorter than `span`.
pub fn price_change(ticks: &[Tick], span: usize) -> f64 {
    if span == 0 || ticks.len() < span {
        return 0.0;
    }
    (ticks[ticks.len() - 1].price - ticks[ticks.len() - span].price).abs()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
