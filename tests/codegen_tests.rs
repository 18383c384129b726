use digit_radar::codegen::dbot::{self, BotRequest};
use digit_radar::codegen::pinescript::{self, ScriptParams, ScriptRequest};

fn request(strategy: &str, market: &str) -> ScriptRequest {
    ScriptRequest {
        strategy: strategy.to_string(),
        market: market.to_string(),
        params: ScriptParams::default(),
    }
}

#[test]
fn every_known_strategy_generates() {
    for strategy in ["rise-fall", "even-odd", "over-under"] {
        let script = pinescript::generate(&request(strategy, "R_75")).unwrap();
        assert!(script.starts_with("//@version=5"));
        assert!(script.contains("R_75"));
    }
}

#[test]
fn generation_is_deterministic() {
    let a = pinescript::generate(&request("rise-fall", "r_50")).unwrap();
    let b = pinescript::generate(&request("rise-fall", "r_50")).unwrap();
    assert_eq!(a, b);
    // market is normalized into the artifact
    assert!(a.contains("R_50"));
}

#[test]
fn params_are_injected() {
    let mut req = request("rise-fall", "R_75");
    req.params.rsi_period = 21;
    req.params.flat_low = 42.0;
    let script = pinescript::generate(&req).unwrap();
    assert!(script.contains("ta.rsi(close, 21)"));
    assert!(script.contains("42"));
}

#[test]
fn unknown_strategy_is_rejected() {
    let err = pinescript::generate(&request("martingale", "R_75")).unwrap_err();
    assert!(err.to_string().contains("unknown strategy"));
}

#[test]
fn missing_market_is_rejected() {
    let err = pinescript::generate(&request("rise-fall", "  ")).unwrap_err();
    assert!(err.to_string().contains("market is required"));
}

#[test]
fn bot_defaults_match_the_documented_values() {
    let req = BotRequest::default();
    assert_eq!(req.bot_type, "nuclear9");
    assert_eq!(req.digit, 9);
    assert_eq!(req.market, "R_75");
    let xml = dbot::generate(&req).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<field name=\"SYMBOL\">R_75</field>"));
    assert!(xml.contains("<field name=\"PREDICTION\">9</field>"));
    assert!(xml.contains("<field name=\"AMOUNT\">1</field>"));
}

#[test]
fn bot_request_deserializes_with_defaults() {
    let req: BotRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(req.digit, 9);
    let req: BotRequest = serde_json::from_str(r#"{"digit":3,"market":"R_10"}"#).unwrap();
    assert_eq!(req.digit, 3);
    assert_eq!(req.market, "R_10");
    assert_eq!(req.bot_type, "nuclear9");
}

#[test]
fn bot_generation_is_deterministic() {
    let req = BotRequest {
        digit: 4,
        stake: 2.5,
        ..BotRequest::default()
    };
    assert_eq!(dbot::generate(&req).unwrap(), dbot::generate(&req).unwrap());
    assert!(dbot::generate(&req)
        .unwrap()
        .contains("<field name=\"AMOUNT\">2.5</field>"));
}

#[test]
fn bot_inputs_are_validated() {
    let req = BotRequest {
        digit: 12,
        ..BotRequest::default()
    };
    assert!(dbot::generate(&req).is_err());

    let req = BotRequest {
        stake: 0.0,
        ..BotRequest::default()
    };
    assert!(dbot::generate(&req).is_err());

    let req = BotRequest {
        market: "".to_string(),
        ..BotRequest::default()
    };
    assert!(dbot::generate(&req).is_err());
}
