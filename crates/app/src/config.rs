//! Application configuration.
//!
//! Built once by the composition root and passed down explicitly. Every field has a
//! default, so an empty environment yields a working configuration.

use serde::Deserialize;

use orderflow_observability::LogFormat;

pub const DEFAULT_MAX_ITEMS_PER_ORDER: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app_name: String,
    pub version: String,
    /// Upper bound on the number of lines one order may hold.
    pub max_items_per_order: usize,
    /// ISO currency code used when displaying amounts.
    pub default_currency: String,
    /// JSON log lines when true, human-readable output otherwise.
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "orderflow".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            max_items_per_order: DEFAULT_MAX_ITEMS_PER_ORDER,
            default_currency: "USD".to_string(),
            log_json: true,
        }
    }
}

impl AppConfig {
    /// Read `ORDERFLOW_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], with an arbitrary variable source.
    ///
    /// Unparsable values are logged and replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup("ORDERFLOW_APP_NAME") {
            config.app_name = name;
        }
        if let Some(currency) = lookup("ORDERFLOW_DEFAULT_CURRENCY") {
            config.default_currency = currency.to_uppercase();
        }
        if let Some(raw) = lookup("ORDERFLOW_MAX_ITEMS_PER_ORDER") {
            match raw.parse::<usize>() {
                Ok(n) if n > 0 => config.max_items_per_order = n,
                _ => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_MAX_ITEMS_PER_ORDER,
                    "ORDERFLOW_MAX_ITEMS_PER_ORDER is not a positive integer; using default"
                ),
            }
        }
        if let Some(raw) = lookup("ORDERFLOW_LOG_JSON") {
            match raw.parse::<bool>() {
                Ok(flag) => config.log_json = flag,
                Err(_) => tracing::warn!(
                    value = %raw,
                    "ORDERFLOW_LOG_JSON is not a boolean; using default"
                ),
            }
        }

        config
    }

    pub fn log_format(&self) -> LogFormat {
        if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}
