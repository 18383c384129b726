/// Exponential moving average over an ordered price sequence.
///
/// Seeded with the simple average of the first `period` prices, then the
/// standard recurrence `ema = price * k + ema * (1 - k)` with
/// `k = 2 / (period + 1)` for every later price.
///
/// With fewer than `period` prices this returns the most recent price, or 0
/// with no prices at all. That is the documented degenerate-input policy,
/// not an error: callers feed whatever history is retained.
pub fn ema(prices: &[f64], period: usize) -> f64 {
    assert!(period > 0, "EMA period must be > 0");
    if prices.len() < period {
        return prices.last().copied().unwrap_or(0.0);
    }
    let k = 2.0 / (period as f64 + 1.0);
    let mut ema = prices[..period].iter().sum::<f64>() / period as f64;
    for price in &prices[period..] {
        ema = price * k + ema * (1.0 - k);
    }
    ema
}
