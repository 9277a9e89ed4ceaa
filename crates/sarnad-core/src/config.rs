use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_MAP_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("SARNAD_ENV", "development"))?;
    let log_level = or_default("SARNAD_LOG_LEVEL", "info");
    let installers_path = PathBuf::from(or_default(
        "SARNAD_INSTALLERS_PATH",
        "./config/installers.yaml",
    ));

    let map_search_url = or_default("SARNAD_MAP_SEARCH_URL", DEFAULT_MAP_SEARCH_URL);
    if !(map_search_url.starts_with("https://") || map_search_url.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SARNAD_MAP_SEARCH_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{map_search_url}'"),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        installers_path,
        map_search_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SARNAD_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
