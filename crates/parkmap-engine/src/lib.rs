//! Geospatial search and overlay engine for the parking map.
//!
//! Raw lot and zone records are normalized into backend-agnostic
//! [`Overlay`]s, held in a [`RecordIndex`], searched by substring and ranked
//! by great-circle distance. [`Session`] ties the pieces together: it loads
//! both feeds, draws every overlay once through a [`RendererAdapter`], and
//! routes geolocation and selection to the renderer.

pub mod distance;
pub mod geolocation;
pub mod index;
pub mod normalize;
pub mod overlay;
pub mod render;
pub mod search;
pub mod session;

pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use geolocation::{GeolocationError, Geolocator, StaticGeolocator};
pub use index::RecordIndex;
pub use normalize::{
    lot_anchor, normalize_all, normalize_lot, normalize_zone, zone_anchor, NormalizationError,
    NormalizedSet,
};
pub use overlay::{Detail, LineSetOverlay, LotDetail, Overlay, PolygonOverlay, ZoneDetail};
pub use render::{ConsoleRenderer, GeoJsonRenderer, RendererAdapter, View};
pub use search::{ranked_search, search, RankedRecord, SearchableRecord};
pub use session::{
    LoadSummary, Notice, NoticeKind, Session, SessionError, SessionEvent, SessionState,
};
