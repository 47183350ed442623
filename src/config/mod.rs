use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub upstream: UpstreamConfig,
    pub redis: RedisConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub sessions: SessionConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    /// `json` включает JSON-логи, `pretty` (по умолчанию) - обычный текст.
    pub log_format: String,
}

// Бэкенд кинотеатра (сеансы, заказы, залы)
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

// Redis опционален: без него список сеансов просто не кэшируется
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Option<String>,
    pub showtimes_ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

// Сессии выбора мест и редактора живут в памяти
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub idle_minutes: u64,
    pub sweep_interval_seconds: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl CircuitBreakerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_minutes.saturating_mul(60))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds.max(1))
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let base_url = lookup("CINEMA_API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("CINEMA_API_URL"))?;

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "0.0.0.0"),
                port: parse("PORT", var("PORT", "8000"))?,
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "cinema_seating=debug,tower_http=debug"),
                log_format: var("LOG_FORMAT", "pretty"),
            },
            upstream: UpstreamConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout_seconds: parse(
                    "UPSTREAM_TIMEOUT_SECONDS",
                    var("UPSTREAM_TIMEOUT_SECONDS", "10"),
                )?,
            },
            redis: RedisConfig {
                url: lookup("REDIS_URL").filter(|v| !v.trim().is_empty()),
                showtimes_ttl_seconds: parse(
                    "SHOWTIMES_CACHE_TTL_SECONDS",
                    var("SHOWTIMES_CACHE_TTL_SECONDS", "60"),
                )?,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: parse(
                    "CIRCUIT_BREAKER_FAILURE_THRESHOLD",
                    var("CIRCUIT_BREAKER_FAILURE_THRESHOLD", "5"),
                )?,
                timeout_seconds: parse(
                    "CIRCUIT_BREAKER_TIMEOUT_SECONDS",
                    var("CIRCUIT_BREAKER_TIMEOUT_SECONDS", "30"),
                )?,
            },
            sessions: SessionConfig {
                idle_minutes: parse("SESSION_IDLE_MINUTES", var("SESSION_IDLE_MINUTES", "30"))?,
                sweep_interval_seconds: parse(
                    "SESSION_SWEEP_INTERVAL_SECONDS",
                    var("SESSION_SWEEP_INTERVAL_SECONDS", "60"),
                )?,
            },
        })
    }

    pub fn json_logs(&self) -> bool {
        self.app.log_format.eq_ignore_ascii_case("json")
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_api_url_is_set() {
        let config = config_from(&[("CINEMA_API_URL", "http://cinema.local/api/")]).unwrap();
        assert_eq!(config.upstream.base_url, "http://cinema.local/api");
        assert_eq!(config.app.port, 8000);
        assert_eq!(config.upstream.timeout(), Duration::from_secs(10));
        assert_eq!(config.redis.url, None);
        assert_eq!(config.redis.showtimes_ttl_seconds, 60);
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
        assert_eq!(config.circuit_breaker.timeout(), Duration::from_secs(30));
        assert_eq!(config.sessions.idle_timeout(), Duration::from_secs(30 * 60));
        assert!(!config.json_logs());
    }

    #[test]
    fn api_url_is_required() {
        assert_eq!(
            config_from(&[]).unwrap_err(),
            ConfigError::Missing("CINEMA_API_URL")
        );
    }

    #[test]
    fn invalid_numbers_are_reported_by_name() {
        let err = config_from(&[("CINEMA_API_URL", "http://x"), ("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("CINEMA_API_URL", "http://x"),
            ("REDIS_URL", "redis://127.0.0.1/"),
            ("LOG_FORMAT", "JSON"),
            ("SESSION_SWEEP_INTERVAL_SECONDS", "0"),
        ])
        .unwrap();
        assert_eq!(config.redis.url.as_deref(), Some("redis://127.0.0.1/"));
        assert!(config.json_logs());
        assert_eq!(config.sessions.sweep_interval(), Duration::from_secs(1));
    }

    #[test]
    fn huge_idle_timeout_saturates() {
        let config = config_from(&[
            ("CINEMA_API_URL", "http://x"),
            ("SESSION_IDLE_MINUTES", u64::MAX.to_string().as_str()),
        ])
        .unwrap();
        assert_eq!(config.sessions.idle_timeout(), Duration::from_secs(u64::MAX));
    }
}
