//! Bot readiness scores: every profile is an ordered list of named boolean
//! conditions fed through one shared evaluator. The count of true conditions
//! picks the tier. The UTC hour is an explicit input so evaluation stays a
//! pure function of its arguments.

use serde::Serialize;

use crate::config::{BotProfile, ReadinessConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadinessTier {
    Ready,
    Near,
    Monitoring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionCheck {
    pub name: &'static str,
    pub met: bool,
}

/// Observed values a profile is scored against.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessInputs {
    /// Frequency of the profile's digit over the configured window, percent.
    pub digit_pct: f64,
    pub rsi: f64,
    /// Absolute price movement over the configured tick span.
    pub price_move: f64,
    pub hour_utc: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub profile: String,
    pub digit: u8,
    pub conditions: Vec<ConditionCheck>,
    pub score: usize,
    pub tier: ReadinessTier,
}

/// Count met conditions and map the count to a tier: >=3 ready, ==2 near,
/// otherwise monitoring.
pub fn score_conditions(checks: &[ConditionCheck]) -> (usize, ReadinessTier) {
    let score = checks.iter().filter(|c| c.met).count();
    let tier = if score >= 3 {
        ReadinessTier::Ready
    } else if score == 2 {
        ReadinessTier::Near
    } else {
        ReadinessTier::Monitoring
    };
    (score, tier)
}

pub fn evaluate_profile(
    profile: &BotProfile,
    cfg: &ReadinessConfig,
    inputs: &ReadinessInputs,
) -> ReadinessReport {
    let checks = vec![
        ConditionCheck {
            name: "digit-frequency-extreme",
            met: inputs.digit_pct <= cfg.cold_pct || inputs.digit_pct >= cfg.hot_pct,
        },
        ConditionCheck {
            name: "rsi-extreme",
            met: inputs.rsi <= cfg.rsi_low || inputs.rsi >= cfg.rsi_high,
        },
        ConditionCheck {
            name: "price-moving",
            met: inputs.price_move >= cfg.min_price_move,
        },
        ConditionCheck {
            name: "trading-window",
            met: (cfg.window_start_hour..cfg.window_end_hour).contains(&inputs.hour_utc),
        },
        // External news filter is not wired in; the slot is reserved.
        ConditionCheck {
            name: "news-clear",
            met: true,
        },
    ];
    let (score, tier) = score_conditions(&checks);
    ReadinessReport {
        profile: profile.name.clone(),
        digit: profile.digit,
        conditions: checks,
        score,
        tier,
    }
}
