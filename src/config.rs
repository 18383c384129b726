use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub history: HistoryConfig,
    pub readiness: ReadinessConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Per-subscriber stream channel capacity; a subscriber that falls this
    /// far behind is dropped on the next publish.
    pub stream_buffer: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub ws_url: String,
    pub app_id: String,
    pub markets: Vec<String>,
    pub reconnect_delay_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    pub capacity: usize,
}

/// Thresholds for the bot readiness scores. These are product-tuned
/// constants with no stated derivation; they are configuration, not code.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadinessConfig {
    pub cold_pct: f64,
    pub hot_pct: f64,
    pub rsi_low: f64,
    pub rsi_high: f64,
    pub min_price_move: f64,
    pub price_move_span: usize,
    pub window_start_hour: u32,
    pub window_end_hour: u32,
    pub frequency_window: usize,
    pub profiles: Vec<BotProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotProfile {
    pub name: String,
    pub digit: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl FeedConfig {
    /// Feed endpoint with the application id appended as a query parameter.
    pub fn endpoint(&self) -> Result<Url, AppError> {
        Url::parse_with_params(&self.ws_url, [("app_id", self.app_id.as_str())])
            .map_err(|e| AppError::Config(format!("invalid feed url '{}': {}", self.ws_url, e)))
    }

    /// Normalized market symbols: trimmed, uppercased, deduplicated.
    pub fn market_symbols(&self) -> Vec<String> {
        let mut out = Vec::new();
        for market in &self.markets {
            let s = market.trim().to_ascii_uppercase();
            if !s.is_empty() && !out.iter().any(|v| v == &s) {
                out.push(s);
            }
        }
        out
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config: Config =
            toml::from_str(&config_str).context("failed to parse config/default.toml")?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port.parse().context("PORT is not a valid port number")?;
        }
        if let Ok(app_id) = std::env::var("DERIV_APP_ID") {
            config.feed.app_id = app_id;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feed.market_symbols().is_empty() {
            bail!("feed.markets must list at least one symbol");
        }
        if self.history.capacity == 0 {
            bail!("history.capacity must be > 0");
        }
        if self.feed.reconnect_delay_secs == 0 {
            bail!("feed.reconnect_delay_secs must be > 0");
        }
        if self.server.stream_buffer == 0 {
            bail!("server.stream_buffer must be > 0");
        }
        let r = &self.readiness;
        if r.window_start_hour >= 24 || r.window_end_hour > 24 {
            bail!("readiness trading window hours must be within a UTC day");
        }
        if r.window_start_hour >= r.window_end_hour {
            bail!("readiness trading window must start before it ends");
        }
        if r.price_move_span < 2 {
            bail!("readiness.price_move_span must be >= 2");
        }
        for profile in &r.profiles {
            if profile.digit > 9 {
                bail!(
                    "readiness profile '{}' has digit {} out of range",
                    profile.name,
                    profile.digit
                );
            }
        }
        self.feed.endpoint()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_toml() -> &'static str {
        r#"
[server]
host = "127.0.0.1"
port = 3000
stream_buffer = 64

[feed]
ws_url = "wss://ws.example.com/websockets/v3"
app_id = "1089"
markets = ["R_10", "R_25", "r_75", "R_10", "  "]
reconnect_delay_secs = 3

[history]
capacity = 5000

[readiness]
cold_pct = 9.0
hot_pct = 11.5
rsi_low = 32.0
rsi_high = 64.0
min_price_move = 0.04
price_move_span = 10
window_start_hour = 9
window_end_hour = 17
frequency_window = 1000

[[readiness.profiles]]
name = "nuclear9"
digit = 9

[[readiness.profiles]]
name = "zerokiller"
digit = 0

[logging]
level = "info"
"#
    }

    #[test]
    fn parse_default_toml() {
        let config: Config = toml::from_str(sample_toml()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.history.capacity, 5000);
        assert_eq!(config.feed.reconnect_delay_secs, 3);
        assert_eq!(config.readiness.profiles.len(), 2);
        assert!((config.readiness.cold_pct - 9.0).abs() < f64::EPSILON);
        config.validate().unwrap();
    }

    #[test]
    fn market_symbols_dedup_and_uppercase() {
        let config: Config = toml::from_str(sample_toml()).unwrap();
        assert_eq!(
            config.feed.market_symbols(),
            vec!["R_10".to_string(), "R_25".to_string(), "R_75".to_string()]
        );
    }

    #[test]
    fn endpoint_appends_app_id() {
        let config: Config = toml::from_str(sample_toml()).unwrap();
        let url = config.feed.endpoint().unwrap();
        assert_eq!(url.query(), Some("app_id=1089"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config: Config = toml::from_str(sample_toml()).unwrap();
        config.history.capacity = 0;
        assert!(config.validate().is_err());

        let mut config: Config = toml::from_str(sample_toml()).unwrap();
        config.readiness.window_start_hour = 18;
        assert!(config.validate().is_err());

        let mut config: Config = toml::from_str(sample_toml()).unwrap();
        config.readiness.profiles[0].digit = 12;
        assert!(config.validate().is_err());

        let mut config: Config = toml::from_str(sample_toml()).unwrap();
        config.feed.markets = vec!["  ".to_string()];
        assert!(config.validate().is_err());
    }
}
