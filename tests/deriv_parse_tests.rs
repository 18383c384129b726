use digit_radar::deriv::types::{Quote, SubscribeRequest, TickEnvelope};

#[test]
fn subscribe_request_wire_format() {
    let request = serde_json::to_string(&SubscribeRequest::ticks("R_10")).unwrap();
    assert_eq!(request, r#"{"ticks":"R_10","subscribe":1}"#);
}

#[test]
fn numeric_quote_tick_parses() {
    let frame = r#"{"msg_type":"tick","tick":{"symbol":"R_75","quote":1234.56,"epoch":1700000000}}"#;
    let envelope: TickEnvelope = serde_json::from_str(frame).unwrap();
    let (market, tick) = envelope.normalize().unwrap();
    assert_eq!(market, "R_75");
    assert!((tick.price - 1234.56).abs() < f64::EPSILON);
    assert_eq!(tick.digit, 6);
    assert_eq!(tick.epoch, 1_700_000_000);
}

#[test]
fn numeric_quote_is_canonicalized_to_two_decimals() {
    // JSON numbers lose trailing zeros; 123.4 means the quote 123.40
    let frame = r#"{"msg_type":"tick","tick":{"symbol":"R_10","quote":123.4,"epoch":1}}"#;
    let envelope: TickEnvelope = serde_json::from_str(frame).unwrap();
    let (_, tick) = envelope.normalize().unwrap();
    assert_eq!(tick.digit, 0);
}

#[test]
fn string_quote_is_used_verbatim() {
    let frame = r#"{"msg_type":"tick","tick":{"symbol":"R_25","quote":"987.65","epoch":2}}"#;
    let envelope: TickEnvelope = serde_json::from_str(frame).unwrap();
    let (_, tick) = envelope.normalize().unwrap();
    assert!((tick.price - 987.65).abs() < f64::EPSILON);
    assert_eq!(tick.digit, 5);
}

#[test]
fn non_tick_messages_normalize_to_none() {
    let frame = r#"{"msg_type":"ping"}"#;
    let envelope: TickEnvelope = serde_json::from_str(frame).unwrap();
    assert!(envelope.normalize().is_none());

    // subscription echo without a tick body
    let frame = r#"{"msg_type":"tick"}"#;
    let envelope: TickEnvelope = serde_json::from_str(frame).unwrap();
    assert!(envelope.normalize().is_none());
}

#[test]
fn missing_msg_type_is_discarded() {
    let frame = r#"{"tick":{"symbol":"R_75","quote":1.0,"epoch":3}}"#;
    let envelope: TickEnvelope = serde_json::from_str(frame).unwrap();
    assert!(envelope.normalize().is_none());
}

#[test]
fn structurally_broken_frames_fail_to_parse() {
    assert!(serde_json::from_str::<TickEnvelope>("not json").is_err());
    assert!(serde_json::from_str::<TickEnvelope>(r#"{"msg_type":5}"#).is_err());
    // missing epoch inside the tick body
    let frame = r#"{"msg_type":"tick","tick":{"symbol":"R_75","quote":1.0}}"#;
    assert!(serde_json::from_str::<TickEnvelope>(frame).is_err());
}

#[test]
fn unparseable_string_quote_is_dropped() {
    let frame = r#"{"msg_type":"tick","tick":{"symbol":"R_75","quote":"n/a","epoch":4}}"#;
    let envelope: TickEnvelope = serde_json::from_str(frame).unwrap();
    assert!(envelope.normalize().is_none());
}

#[test]
fn quote_canonical_forms() {
    assert_eq!(Quote::Number(123.4).canonical(), "123.40");
    assert_eq!(Quote::Number(7.0).canonical(), "7.00");
    assert_eq!(Quote::Text(" 55.31 ".to_string()).canonical(), "55.31");
}
