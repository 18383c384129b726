/// Relative strength index over an ordered price sequence, in [0, 100].
///
/// Consecutive differences are taken over the whole sequence and only the
/// last `period` of them are kept. Gains and losses are each averaged over
/// `period` (zero-valued entries included in the denominator), which makes
/// this the simplified point-estimate variant rather than Wilder's smoothed
/// one. An average loss of exactly 0 yields 100.
///
/// With fewer than `period + 1` prices the neutral default 50 is returned.
pub fn rsi(prices: &[f64], period: usize) -> f64 {
    assert!(period > 0, "RSI period must be > 0");
    if prices.len() < period + 1 {
        return 50.0;
    }
    let diffs: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let recent = &diffs[diffs.len() - period..];
    let gains = recent.iter().filter(|c| **c > 0.0).sum::<f64>() / period as f64;
    let losses = recent.iter().filter(|c| **c < 0.0).map(|c| -c).sum::<f64>() / period as f64;
    if losses == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + gains / losses)
}
