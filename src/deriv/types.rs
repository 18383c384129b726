use serde::{Deserialize, Serialize};

use crate::model::tick::{self, Tick};

/// Per-market tick subscription request.
#[derive(Debug, Serialize)]
pub struct SubscribeRequest {
    pub ticks: String,
    pub subscribe: u8,
}

impl SubscribeRequest {
    pub fn ticks(market: &str) -> Self {
        Self {
            ticks: market.to_string(),
            subscribe: 1,
        }
    }
}

/// Quote as delivered by the feed: either a JSON number or a decimal string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Quote {
    Number(f64),
    Text(String),
}

impl Quote {
    /// Canonical two-decimal quote string used for last-digit extraction.
    /// String quotes are taken verbatim; numeric quotes are formatted to two
    /// decimals because JSON numbers lose trailing zeros.
    pub fn canonical(&self) -> String {
        match self {
            Quote::Number(n) => format!("{:.2}", n),
            Quote::Text(s) => s.trim().to_string(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Quote::Number(n) => Some(*n),
            Quote::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TickEnvelope {
    #[serde(default)]
    pub msg_type: String,
    pub tick: Option<TickPayload>,
}

#[derive(Debug, Deserialize)]
pub struct TickPayload {
    pub symbol: String,
    pub quote: Quote,
    pub epoch: i64,
}

impl TickEnvelope {
    /// A `(market, tick)` pair when this frame is a well-formed tick message,
    /// `None` otherwise. Non-tick and structurally incomplete frames are the
    /// caller's to discard.
    pub fn normalize(&self) -> Option<(String, Tick)> {
        if self.msg_type != "tick" {
            return None;
        }
        let payload = self.tick.as_ref()?;
        let price = payload.quote.value()?;
        if !price.is_finite() {
            return None;
        }
        let digit = tick::last_digit(&payload.quote.canonical())?;
        Some((
            payload.symbol.clone(),
            Tick {
                price,
                digit,
                epoch: payload.epoch,
            },
        ))
    }
}
