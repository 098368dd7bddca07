pub mod app_config;
pub mod config;
pub mod coordinate;
pub mod records;
pub mod renderer_config;

pub use app_config::{AppConfig, Environment, DEFAULT_LOTS_URL, DEFAULT_ZONES_URL};
pub use config::{load_app_config, load_app_config_from_env};
pub use coordinate::{Coordinate, CoordinateError};
pub use records::{HomePage, RawGeometry, RawLotRecord, RawZoneRecord};
pub use renderer_config::{
    load_renderer_config, parse_renderer_config, LineStyle, MarkerStyle, PolygonStyle,
    RendererConfig, MAX_ZOOM,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read renderer config {path}: {source}")]
    RendererConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse renderer config: {0}")]
    RendererConfigParse(#[from] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
