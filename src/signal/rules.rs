//! Threshold rule tables over the freshest indicator state, current price,
//! and the last-20-ticks digit slice. Rules apply in order; first match wins.

use serde::Serialize;

use crate::indicator::IndicatorState;

/// Digit slice length the parity and range rules look at.
pub const RECENT_WINDOW: usize = 20;
/// Minimum ticks before the parity/range rules produce a real verdict.
pub const MIN_RECENT_TICKS: usize = 10;
/// Count of 20 that makes a digit class dominant.
pub const DOMINANCE_COUNT: usize = 14;
/// Minimum retained ticks before the trend rule produces a verdict.
pub const TREND_MIN_TICKS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiseFall {
    Rise,
    Fall,
    Flat,
    Neutral,
    Scanning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvenOdd {
    Even,
    Odd,
    Neutral,
    NoTrade,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverUnder {
    Over,
    Under,
    Neutral,
    Scanning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Bull,
    Bear,
    Flat,
}

/// Even/odd verdict with the counts it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParityCount {
    pub signal: EvenOdd,
    pub even: usize,
    pub odd: usize,
}

/// Over/under verdict with the low/high digit counts it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeCount {
    pub signal: OverUnder,
    pub low: usize,
    pub high: usize,
}

pub fn rise_fall(ind: &IndicatorState, price: f64, retained_ticks: usize) -> RiseFall {
    if retained_ticks < TREND_MIN_TICKS {
        return RiseFall::Scanning;
    }
    let bull = ind.ema20 > ind.ema50 && ind.ema50 > ind.ema200;
    let bear = ind.ema20 < ind.ema50 && ind.ema50 < ind.ema200;
    if bull && ind.rsi > 50.0 && ind.rsi < 70.0 && price > ind.ema50 {
        RiseFall::Rise
    } else if bear && ind.rsi < 50.0 && ind.rsi > 30.0 && price < ind.ema50 {
        RiseFall::Fall
    } else if (45.0..=55.0).contains(&ind.rsi) {
        RiseFall::Flat
    } else {
        RiseFall::Neutral
    }
}

pub fn even_odd(recent_digits: &[u8], rsi: f64) -> ParityCount {
    if recent_digits.len() < MIN_RECENT_TICKS {
        return ParityCount {
            signal: EvenOdd::Waiting,
            even: 0,
            odd: 0,
        };
    }
    let even = recent_digits.iter().filter(|d| *d % 2 == 0).count();
    let odd = recent_digits.len() - even;
    let signal = if even >= DOMINANCE_COUNT && (40.0..=55.0).contains(&rsi) {
        EvenOdd::Even
    } else if odd >= DOMINANCE_COUNT && (45.0..=65.0).contains(&rsi) {
        EvenOdd::Odd
    } else if (45.0..=55.0).contains(&rsi) {
        EvenOdd::NoTrade
    } else {
        EvenOdd::Neutral
    };
    ParityCount { signal, even, odd }
}

pub fn over_under(recent_digits: &[u8], rsi: f64) -> RangeCount {
    if recent_digits.len() < MIN_RECENT_TICKS {
        return RangeCount {
            signal: OverUnder::Scanning,
            low: 0,
            high: 0,
        };
    }
    let low = recent_digits.iter().filter(|d| **d <= 4).count();
    let high = recent_digits.len() - low;
    let signal = if low >= DOMINANCE_COUNT && rsi > 55.0 {
        OverUnder::Over
    } else if high >= DOMINANCE_COUNT && rsi < 45.0 {
        OverUnder::Under
    } else {
        OverUnder::Neutral
    };
    RangeCount { signal, low, high }
}

pub fn trend(ind: &IndicatorState) -> Trend {
    if ind.ema20 > ind.ema50 && ind.ema50 > ind.ema200 {
        Trend::Bull
    } else if ind.ema20 < ind.ema50 && ind.ema50 < ind.ema200 {
        Trend::Bear
    } else {
        Trend::Flat
    }
}
