//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub spoonacular_api_key: Option<String>,
    pub spoonacular_base_url: String,
    pub recipe_timeout: Duration,
    pub recipe_result_limit: usize,
    pub openai_api_key: Option<String>,
    pub stt_model: String,
    pub tts_voice: String,
    pub seed_demo_data: bool,
    pub random_shelf_life_fallback: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // --- Server Settings ---
        let bind_address_str = var_or("BIND_ADDRESS", "0.0.0.0:3000");
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var_or("RUST_LOG", "INFO");
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Recipe API ---
        let spoonacular_api_key = lookup("SPOONACULAR_API_KEY").filter(|k| !k.trim().is_empty());
        let spoonacular_base_url = var_or("SPOONACULAR_BASE_URL", "https://api.spoonacular.com")
            .trim_end_matches('/')
            .to_string();
        let recipe_timeout = Duration::from_secs(parse_var(&lookup, "RECIPE_TIMEOUT_SECS", 10u64)?);
        if recipe_timeout.is_zero() {
            return Err(ConfigError::InvalidValue(
                "RECIPE_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let recipe_result_limit = parse_var(&lookup, "RECIPE_RESULT_LIMIT", 10usize)?;

        // --- Speech ---
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        let stt_model = var_or("STT_MODEL", "whisper-1");
        let tts_voice = var_or("TTS_VOICE", "alloy");

        // --- Behaviour Toggles ---
        let seed_demo_data = parse_bool(&lookup, "SEED_DEMO_DATA", false)?;
        let random_shelf_life_fallback = parse_bool(&lookup, "RANDOM_SHELF_LIFE_FALLBACK", true)?;

        Ok(Self {
            bind_address,
            log_level,
            spoonacular_api_key,
            spoonacular_base_url,
            recipe_timeout,
            recipe_result_limit,
            openai_api_key,
            stt_model,
            tts_voice,
            seed_demo_data,
            random_shelf_life_fallback,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("'{}' is not a boolean", v),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.spoonacular_api_key, None);
        assert_eq!(config.spoonacular_base_url, "https://api.spoonacular.com");
        assert_eq!(config.recipe_timeout, Duration::from_secs(10));
        assert_eq!(config.recipe_result_limit, 10);
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.stt_model, "whisper-1");
        assert!(!config.seed_demo_data);
        assert!(config.random_shelf_life_fallback);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            ("BIND_ADDRESS", "127.0.0.1:8080"),
            ("RUST_LOG", "debug"),
            ("SPOONACULAR_API_KEY", "abc"),
            ("SPOONACULAR_BASE_URL", "http://localhost:9000/"),
            ("RECIPE_TIMEOUT_SECS", "3"),
            ("SEED_DEMO_DATA", "yes"),
            ("RANDOM_SHELF_LIFE_FALLBACK", "off"),
        ])
        .unwrap();
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.spoonacular_api_key.as_deref(), Some("abc"));
        assert_eq!(config.spoonacular_base_url, "http://localhost:9000");
        assert_eq!(config.recipe_timeout, Duration::from_secs(3));
        assert!(config.seed_demo_data);
        assert!(!config.random_shelf_life_fallback);
    }

    #[test]
    fn blank_keys_count_as_missing() {
        let config = config_from(&[("OPENAI_API_KEY", "  ")]).unwrap();
        assert_eq!(config.openai_api_key, None);
    }

    #[test]
    fn invalid_values_are_reported_by_name() {
        let err = config_from(&[("BIND_ADDRESS", "nope")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k, _) if k == "BIND_ADDRESS"));

        let err = config_from(&[("RECIPE_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k, _) if k == "RECIPE_TIMEOUT_SECS"));

        let err = config_from(&[("SEED_DEMO_DATA", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k, _) if k == "SEED_DEMO_DATA"));
    }
}
