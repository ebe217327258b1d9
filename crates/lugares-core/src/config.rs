use crate::app_config::{AppConfig, Environment, GeolocationBackend};
use crate::{ConfigError, Coordinate};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid or a conditionally required
/// variable is missing.
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
/// Returns `ConfigError` if a value is invalid or a conditionally required
/// variable is missing.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_flag = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_bool(&raw).ok_or_else(|| invalid(var, format!("expected a boolean, got \"{raw}\"")))
    };

    let env = parse_environment(&or_default("LUGARES_ENV", "development"))?;
    let log_level = or_default("LUGARES_LOG_LEVEL", "info");
    let catalog_path = lookup("LUGARES_CATALOG_PATH").ok().map(PathBuf::from);

    let search_latency_ms = parse_u64("LUGARES_SEARCH_LATENCY_MS", "1000")?;
    let discard_stale_searches = parse_flag("LUGARES_DISCARD_STALE_SEARCHES", "true")?;

    let geo_backend = parse_geolocation_backend(&or_default("LUGARES_GEO_PROVIDER", "ip"))?;
    let geo_url = or_default("LUGARES_GEO_URL", "https://ipapi.co/json/");
    let static_location = match lookup("LUGARES_STATIC_LOCATION") {
        Ok(raw) => Some(
            raw.parse::<Coordinate>()
                .map_err(|e| invalid("LUGARES_STATIC_LOCATION", e.to_string()))?,
        ),
        Err(_) => None,
    };
    if geo_backend == GeolocationBackend::Static && static_location.is_none() {
        return Err(ConfigError::MissingEnvVar(
            "LUGARES_STATIC_LOCATION".to_string(),
        ));
    }

    let geo_high_accuracy = parse_flag("LUGARES_GEO_HIGH_ACCURACY", "true")?;
    let geo_timeout_ms = parse_u64("LUGARES_GEO_TIMEOUT_MS", "10000")?;
    let geo_max_age_ms = parse_u64("LUGARES_GEO_MAX_AGE_MS", "300000")?;
    let user_agent = or_default("LUGARES_USER_AGENT", "lugares/0.1 (places-near-me)");

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        search_latency_ms,
        discard_stale_searches,
        geo_backend,
        geo_url,
        static_location,
        geo_high_accuracy,
        geo_timeout_ms,
        geo_max_age_ms,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LUGARES_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_geolocation_backend(s: &str) -> Result<GeolocationBackend, ConfigError> {
    match s {
        "ip" => Ok(GeolocationBackend::Ip),
        "static" => Ok(GeolocationBackend::Static),
        "none" => Ok(GeolocationBackend::None),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LUGARES_GEO_PROVIDER".to_string(),
            reason: format!("expected one of ip, static, none; got \"{other}\""),
        }),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
