pub mod domain;
pub mod error;
pub mod market;
pub mod predict;
pub mod service;

pub mod config {
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_PORT: u16 = 8000;
    pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
    pub const DEFAULT_PREDICTION_SERVICE_URL: &str = "http://127.0.0.1:8000";
    const DEFAULT_MARKET_DATA_TIMEOUT_SECS: u64 = 30;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub port: Option<String>,
        pub coingecko_api_url: Option<String>,
        pub coingecko_api_key: Option<String>,
        pub market_data_timeout_secs: Option<String>,
        pub prediction_service_url: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                port: non_empty_var("PORT"),
                coingecko_api_url: non_empty_var("COINGECKO_API_URL"),
                coingecko_api_key: non_empty_var("COINGECKO_API_KEY"),
                market_data_timeout_secs: non_empty_var("MARKET_DATA_TIMEOUT_SECS"),
                prediction_service_url: non_empty_var("PREDICTION_SERVICE_URL"),
                sentry_dsn: non_empty_var("SENTRY_DSN"),
            })
        }

        pub fn port(&self) -> anyhow::Result<u16> {
            match self.port.as_deref() {
                Some(v) => v
                    .parse()
                    .with_context(|| format!("PORT must be a valid port number (got {v})")),
                None => Ok(DEFAULT_PORT),
            }
        }

        pub fn coingecko_api_url(&self) -> &str {
            self.coingecko_api_url
                .as_deref()
                .unwrap_or(DEFAULT_COINGECKO_API_URL)
        }

        pub fn market_data_timeout(&self) -> anyhow::Result<Duration> {
            let secs = match self.market_data_timeout_secs.as_deref() {
                Some(v) => v
                    .parse::<u64>()
                    .with_context(|| format!("MARKET_DATA_TIMEOUT_SECS must be an integer (got {v})"))?,
                None => DEFAULT_MARKET_DATA_TIMEOUT_SECS,
            };
            Ok(Duration::from_secs(secs))
        }

        pub fn prediction_service_url(&self) -> &str {
            self.prediction_service_url
                .as_deref()
                .unwrap_or(DEFAULT_PREDICTION_SERVICE_URL)
        }
    }

    fn non_empty_var(key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn empty() -> Settings {
            Settings {
                port: None,
                coingecko_api_url: None,
                coingecko_api_key: None,
                market_data_timeout_secs: None,
                prediction_service_url: None,
                sentry_dsn: None,
            }
        }

        #[test]
        fn falls_back_to_local_defaults() {
            let settings = empty();
            assert_eq!(settings.port().unwrap(), 8000);
            assert_eq!(settings.coingecko_api_url(), DEFAULT_COINGECKO_API_URL);
            assert_eq!(settings.prediction_service_url(), "http://127.0.0.1:8000");
            assert_eq!(
                settings.market_data_timeout().unwrap(),
                Duration::from_secs(30)
            );
        }

        #[test]
        fn rejects_unparseable_numbers() {
            let settings = Settings {
                port: Some("eighty".to_string()),
                market_data_timeout_secs: Some("-1".to_string()),
                ..empty()
            };
            assert!(settings.port().is_err());
            assert!(settings.market_data_timeout().is_err());
        }
    }
}
