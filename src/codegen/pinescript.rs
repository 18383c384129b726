use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptRequest {
    pub strategy: String,
    pub market: String,
    #[serde(default)]
    pub params: ScriptParams,
}

/// Numeric thresholds injected into the generated script.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptParams {
    pub rsi_period: usize,
    pub flat_low: f64,
    pub flat_high: f64,
}

impl Default for ScriptParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            flat_low: 45.0,
            flat_high: 55.0,
        }
    }
}

pub fn generate(req: &ScriptRequest) -> Result<String, AppError> {
    if req.market.trim().is_empty() {
        return Err(AppError::Template("market is required".to_string()));
    }
    let market = req.market.trim().to_ascii_uppercase();
    match req.strategy.as_str() {
        "rise-fall" => Ok(rise_fall_script(&market, &req.params)),
        "even-odd" => Ok(even_odd_script(&market, &req.params)),
        "over-under" => Ok(over_under_script(&market, &req.params)),
        other => Err(AppError::Template(format!(
            "unknown strategy '{}', expected rise-fall, even-odd or over-under",
            other
        ))),
    }
}

fn rise_fall_script(market: &str, p: &ScriptParams) -> String {
    format!(
        r#"//@version=5
// Rise/Fall entry filter for {market}: EMA ladder trend plus RSI band.
indicator("Rise/Fall {market}", overlay=true)

ema20 = ta.ema(close, 20)
ema50 = ta.ema(close, 50)
ema200 = ta.ema(close, 200)
rsiVal = ta.rsi(close, {rsi_period})

bullTrend = ema20 > ema50 and ema50 > ema200
bearTrend = ema20 < ema50 and ema50 < ema200

riseEntry = bullTrend and rsiVal > 50 and rsiVal < 70 and close > ema50
fallEntry = bearTrend and rsiVal < 50 and rsiVal > 30 and close < ema50
flatZone = rsiVal >= {flat_low} and rsiVal <= {flat_high}

plot(ema20, "EMA 20", color.new(color.blue, 0), 2)
plot(ema50, "EMA 50", color.new(color.orange, 0), 2)
plot(ema200, "EMA 200", color.new(color.red, 0), 2)

bgcolor(flatZone ? color.new(color.gray, 90) : na, title="Flat Zone")
plotshape(riseEntry, "RISE", shape.labelup, location.belowbar, color.green, text="RISE")
plotshape(fallEntry, "FALL", shape.labeldown, location.abovebar, color.red, text="FALL")
"#,
        market = market,
        rsi_period = p.rsi_period,
        flat_low = p.flat_low,
        flat_high = p.flat_high,
    )
}

fn even_odd_script(market: &str, p: &ScriptParams) -> String {
    format!(
        r#"//@version=5
// Even/Odd last-digit tracker for {market}. Use on a 1-tick line chart:
// the signal is digit behavior, not price behavior.
indicator("Even/Odd Digits {market}", overlay=false)

lastDigit = math.floor(close * 10) % 10
isEven = lastDigit % 2 == 0

var int evenRun = 0
var int oddRun = 0
evenRun := isEven ? evenRun + 1 : 0
oddRun := isEven ? 0 : oddRun + 1

rsiVal = ta.rsi(close, {rsi_period})
noTradeZone = rsiVal >= {flat_low} and rsiVal <= {flat_high}

plot(evenRun, "Even Run", color.blue)
plot(oddRun, "Odd Run", color.purple)
plot(5, "Run Alert Level", color.yellow, 1)

bgcolor(evenRun >= 5 ? color.new(color.purple, 80) : na, title="Run Break: Odd")
bgcolor(oddRun >= 5 ? color.new(color.blue, 80) : na, title="Run Break: Even")
bgcolor(noTradeZone ? color.new(color.gray, 90) : na, title="No Trade Zone")
"#,
        market = market,
        rsi_period = p.rsi_period,
        flat_low = p.flat_low,
        flat_high = p.flat_high,
    )
}

fn over_under_script(market: &str, p: &ScriptParams) -> String {
    format!(
        r#"//@version=5
// Over/Under digit filter for {market}: low digits 0-4, high digits 5-9.
indicator("Over/Under Digits {market}", overlay=false)

lastDigit = math.floor(close * 10) % 10
isLow = lastDigit <= 4

rsiVal = ta.rsi(close, {rsi_period})
ema5 = ta.ema(close, 5)
ema20 = ta.ema(close, 20)

overEntry = isLow and rsiVal > {flat_high} and ema5 > ema20
underEntry = not isLow and rsiVal < {flat_low} and ema5 < ema20

barcolor(isLow ? color.green : color.red)
plot(rsiVal, "RSI", color.yellow)
plot({flat_high}, "Over Level", color.green, 1)
plot({flat_low}, "Under Level", color.red, 1)
plot(50, "Mid", color.gray, 1)

plotshape(overEntry, "OVER", shape.labelup, location.bottom, color.green, text="OVER")
plotshape(underEntry, "UNDER", shape.labeldown, location.top, color.red, text="UNDER")
"#,
        market = market,
        rsi_period = p.rsi_period,
        flat_low = p.flat_low,
        flat_high = p.flat_high,
    )
}
