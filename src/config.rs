use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub balance_cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("balance_cache_ttl_secs", &self.balance_cache_ttl.as_secs())
            .field("request_timeout_secs", &self.request_timeout.as_secs())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            log_level: "info".to_string(),
            balance_cache_ttl: Duration::from_secs(3600),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            port: env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(defaults.port),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            balance_cache_ttl: secs_from_env("BALANCE_CACHE_TTL_SECS").unwrap_or(defaults.balance_cache_ttl),
            request_timeout: secs_from_env("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
        }
    }
}

fn secs_from_env(key: &str) -> Option<Duration> {
    env::var(key).ok().and_then(|v| v.parse().ok()).map(Duration::from_secs)
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
