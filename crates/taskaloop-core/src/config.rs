use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Search radius used when neither the caller nor the environment picks one.
pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_radius = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("radius must be a finite, non-negative number of miles, got {raw}"),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("TASKALOOP_ENV", "development"))?;
    let log_level = or_default("TASKALOOP_LOG_LEVEL", "info");
    let catalog_path = lookup("TASKALOOP_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let default_radius_miles = parse_radius("TASKALOOP_DEFAULT_RADIUS_MILES", "10")?;
    let history_path = PathBuf::from(or_default(
        "TASKALOOP_HISTORY_PATH",
        "./data/price_history.json",
    ));

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        default_radius_miles,
        history_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TASKALOOP_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
