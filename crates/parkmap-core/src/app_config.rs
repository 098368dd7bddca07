use std::path::PathBuf;

use crate::Coordinate;

/// Default Socrata endpoint for City of Calgary parking lots.
pub const DEFAULT_LOTS_URL: &str = "https://data.calgary.ca/resource/ggxk-g2u3.json";
/// Default Socrata endpoint for City of Calgary on-street parking zones.
pub const DEFAULT_ZONES_URL: &str = "https://data.calgary.ca/resource/45az-7kh9.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Log filter used when `PARKMAP_LOG_LEVEL` is unset. Test and
    /// production runs only report problems.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "info",
            Environment::Test | Environment::Production => "warn",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub lots_url: String,
    pub zones_url: String,
    pub feed_timeout_secs: u64,
    pub feed_user_agent: String,
    /// Socrata `$limit`; `None` keeps the portal's default page size.
    pub feed_row_limit: Option<u32>,
    /// Fixed "current location" used when no live position is supplied.
    pub home_location: Option<Coordinate>,
    pub renderer_config_path: Option<PathBuf>,
}
