use digit_radar::config::Config;

/// The shipped config file must parse and validate as-is.
#[test]
fn shipped_default_config_is_valid() {
    let raw = std::fs::read_to_string("config/default.toml").unwrap();
    let config: Config = toml::from_str(&raw).unwrap();
    config.validate().unwrap();

    assert_eq!(
        config.feed.market_symbols(),
        vec!["R_10", "R_25", "R_50", "R_75", "R_100"]
    );
    assert_eq!(config.history.capacity, 5000);
    assert_eq!(config.feed.reconnect_delay_secs, 3);
    assert_eq!(config.readiness.profiles.len(), 4);
    assert_eq!(config.readiness.frequency_window, 1000);
    assert!((config.readiness.cold_pct - 9.0).abs() < f64::EPSILON);
    assert!((config.readiness.hot_pct - 11.5).abs() < f64::EPSILON);
}

#[test]
fn shipped_profiles_cover_the_tracked_digits() {
    let raw = std::fs::read_to_string("config/default.toml").unwrap();
    let config: Config = toml::from_str(&raw).unwrap();
    let digits: Vec<u8> = config.readiness.profiles.iter().map(|p| p.digit).collect();
    assert_eq!(digits, vec![9, 0, 8, 1]);
}

#[test]
fn feed_endpoint_carries_the_app_id() {
    let raw = std::fs::read_to_string("config/default.toml").unwrap();
    let config: Config = toml::from_str(&raw).unwrap();
    let url = config.feed.endpoint().unwrap();
    assert_eq!(url.scheme(), "wss");
    assert!(url.query().unwrap().contains("app_id=1089"));
}
