use crate::app_config::{AppConfig, Environment, DEFAULT_LOTS_URL, DEFAULT_ZONES_URL};
use crate::{ConfigError, Coordinate};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or a paired variable is
/// only half set.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files. Useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or a paired variable is
/// only half set.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup without `set_var`/`remove_var`.
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
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_opt_u32 = |var: &str| -> Result<Option<u32>, ConfigError> {
        lookup(var)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| raw.trim().parse::<u32>().map_err(|e| invalid(var, e.to_string())))
            .transpose()
    };

    let parse_opt_f64 = |var: &str| -> Result<Option<f64>, ConfigError> {
        lookup(var)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| raw.trim().parse::<f64>().map_err(|e| invalid(var, e.to_string())))
            .transpose()
    };

    let env = parse_environment(&or_default("PARKMAP_ENV", "development"))?;
    let log_level = or_default("PARKMAP_LOG_LEVEL", env.default_log_level());

    let lots_url = or_default("PARKMAP_LOTS_URL", DEFAULT_LOTS_URL);
    let zones_url = or_default("PARKMAP_ZONES_URL", DEFAULT_ZONES_URL);
    let feed_timeout_secs = parse_u64("PARKMAP_FEED_TIMEOUT_SECS", "30")?;
    if feed_timeout_secs == 0 {
        return Err(invalid(
            "PARKMAP_FEED_TIMEOUT_SECS",
            "timeout must be greater than zero".to_string(),
        ));
    }
    let feed_user_agent = or_default("PARKMAP_FEED_USER_AGENT", "parkmap/0.1 (parking-search)");
    let feed_row_limit = parse_opt_u32("PARKMAP_FEED_ROW_LIMIT")?;

    let home_location = match (
        parse_opt_f64("PARKMAP_HOME_LAT")?,
        parse_opt_f64("PARKMAP_HOME_LNG")?,
    ) {
        (Some(lat), Some(lng)) => Some(
            Coordinate::new(lat, lng).map_err(|e| invalid("PARKMAP_HOME_LAT", e.to_string()))?,
        ),
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("PARKMAP_HOME_LNG".to_string())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("PARKMAP_HOME_LAT".to_string())),
        (None, None) => None,
    };

    let renderer_config_path = lookup("PARKMAP_RENDERER_CONFIG")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        lots_url,
        zones_url,
        feed_timeout_secs,
        feed_user_agent,
        feed_row_limit,
        home_location,
        renderer_config_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PARKMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
