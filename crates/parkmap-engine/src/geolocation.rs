//! Geolocation boundary. The engine consumes a resolved coordinate; how it
//! is obtained belongs to the host.

use std::future::Future;

use parkmap_core::Coordinate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported on this host")]
    Unsupported,

    #[error("geolocation permission denied: {0}")]
    PermissionDenied(String),

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the user's position once.
pub trait Geolocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Coordinate, GeolocationError>> + Send;
}

/// Geolocator for hosts without a positioning service: either a fixed
/// coordinate (from flags or configuration) or none at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StaticGeolocator {
    Fixed(Coordinate),
    Unsupported,
}

impl StaticGeolocator {
    #[must_use]
    pub fn from_option(location: Option<Coordinate>) -> Self {
        location.map_or(Self::Unsupported, Self::Fixed)
    }
}

impl Geolocator for StaticGeolocator {
    async fn locate(&self) -> Result<Coordinate, GeolocationError> {
        match self {
            StaticGeolocator::Fixed(at) => Ok(*at),
            StaticGeolocator::Unsupported => Err(GeolocationError::Unsupported),
        }
    }
}
