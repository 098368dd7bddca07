//! Normalization from raw feed records to [`Overlay`]s.
//!
//! Geometry is walked from the raw JSON so that one bad record is skipped
//! rather than failing a whole feed. Feed positions are `[longitude,
//! latitude]`; every vertex goes through [`Coordinate::from_lng_lat`]
//! exactly once.

use parkmap_core::{Coordinate, RawGeometry, RawLotRecord, RawZoneRecord};
use serde_json::Value;
use thiserror::Error;

use crate::overlay::{LineSetOverlay, LotDetail, Overlay, PolygonOverlay, ZoneDetail};

/// Geometry type tag the zones feed uses for multi-line geometry.
pub const MULTI_LINE_TYPE: &str = "MultiLineString";

/// Why a record produced no overlay. Absorbed per record, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("{source_id}: geometry missing or empty")]
    GeometryMissing { source_id: String },

    #[error("{source_id}: unsupported geometry type '{kind}'")]
    UnsupportedGeometry { source_id: String, kind: String },

    #[error("{source_id}: malformed coordinate: {reason}")]
    MalformedCoordinate { source_id: String, reason: String },
}

/// Geometry problem before the record identity is attached.
enum GeometryFault {
    Missing,
    Unsupported(String),
    Malformed(String),
}

impl GeometryFault {
    fn into_error(self, source_id: String) -> NormalizationError {
        match self {
            GeometryFault::Missing => NormalizationError::GeometryMissing { source_id },
            GeometryFault::Unsupported(kind) => {
                NormalizationError::UnsupportedGeometry { source_id, kind }
            }
            GeometryFault::Malformed(reason) => {
                NormalizationError::MalformedCoordinate { source_id, reason }
            }
        }
    }
}

/// Overlays produced from a whole load, plus skip counts.
#[derive(Debug, Clone, Default)]
pub struct NormalizedSet {
    /// Lots first, then zones, each in feed order.
    pub overlays: Vec<Overlay>,
    pub skipped_lots: usize,
    pub skipped_zones: usize,
}

#[must_use]
pub fn lot_source_id(raw: &RawLotRecord, ordinal: usize) -> String {
    raw.id.clone().unwrap_or_else(|| format!("lot#{ordinal}"))
}

#[must_use]
pub fn zone_source_id(raw: &RawZoneRecord, ordinal: usize) -> String {
    raw.id.clone().unwrap_or_else(|| format!("zone#{ordinal}"))
}

/// Normalizes a lot into a polygon overlay built from the outer ring of its
/// first polygon. Holes and further polygons are ignored.
///
/// # Errors
///
/// Returns [`NormalizationError`] if the multipolygon is absent, empty, or
/// holds a vertex that is not a valid `[lng, lat]` pair.
pub fn normalize_lot(
    raw: &RawLotRecord,
    ordinal: usize,
) -> Result<PolygonOverlay, NormalizationError> {
    let ring = outer_ring(raw.multipolygon.as_ref())
        .map_err(|fault| fault.into_error(lot_source_id(raw, ordinal)))?;

    Ok(PolygonOverlay {
        anchor: ring[0],
        ring,
        label: raw.name().to_string(),
        detail: LotDetail::from_record(raw),
        source_id: lot_source_id(raw, ordinal),
    })
}

/// Normalizes a zone into one overlay per non-empty polyline. Every
/// overlay carries the zone's metadata; its anchor is its own first vertex.
///
/// # Errors
///
/// Returns [`NormalizationError`] if the geometry is absent, is not a
/// `MultiLineString`, has no non-empty polyline, or holds a malformed vertex.
pub fn normalize_zone(
    raw: &RawZoneRecord,
    ordinal: usize,
) -> Result<Vec<LineSetOverlay>, NormalizationError> {
    let source_id = zone_source_id(raw, ordinal);
    let lines = zone_lines(raw.geometry())
        .map_err(|fault| fault.into_error(source_id.clone()))?;

    let label = raw.zone_type().to_string();
    let detail = ZoneDetail::from_record(raw);

    Ok(lines
        .into_iter()
        .enumerate()
        .map(|(part, line)| LineSetOverlay {
            anchor: line[0],
            lines: vec![line],
            label: label.clone(),
            detail: detail.clone(),
            source_id: source_id.clone(),
            part,
        })
        .collect())
}

/// Runs the normalizer over both feeds, lots first. Invalid records are
/// logged and counted, never raised.
#[must_use]
pub fn normalize_all(lots: &[RawLotRecord], zones: &[RawZoneRecord]) -> NormalizedSet {
    let mut set = NormalizedSet::default();

    for (ordinal, lot) in lots.iter().enumerate() {
        match normalize_lot(lot, ordinal) {
            Ok(overlay) => set.overlays.push(Overlay::Polygon(overlay)),
            Err(e) => {
                tracing::debug!(error = %e, "skipping parking lot without usable geometry");
                set.skipped_lots += 1;
            }
        }
    }

    for (ordinal, zone) in zones.iter().enumerate() {
        match normalize_zone(zone, ordinal) {
            Ok(overlays) => set
                .overlays
                .extend(overlays.into_iter().map(Overlay::LineSet)),
            Err(e) => {
                tracing::debug!(error = %e, "skipping parking zone without usable geometry");
                set.skipped_zones += 1;
            }
        }
    }

    if set.skipped_lots > 0 || set.skipped_zones > 0 {
        tracing::info!(
            skipped_lots = set.skipped_lots,
            skipped_zones = set.skipped_zones,
            "records without usable geometry were not drawn"
        );
    }

    set
}

/// First vertex of the lot's outer ring, resolved the same way
/// [`normalize_lot`] does.
#[must_use]
pub fn lot_anchor(raw: &RawLotRecord) -> Option<Coordinate> {
    outer_ring(raw.multipolygon.as_ref())
        .ok()
        .map(|ring| ring[0])
}

/// First vertex of the zone's first polyline, resolved the same way
/// [`normalize_zone`] does.
#[must_use]
pub fn zone_anchor(raw: &RawZoneRecord) -> Option<Coordinate> {
    zone_lines(raw.geometry())
        .ok()
        .and_then(|lines| lines.first().map(|line| line[0]))
}

/// `coordinates[0][0]` of a multipolygon. Never returns an empty ring.
fn outer_ring(geometry: Option<&RawGeometry>) -> Result<Vec<Coordinate>, GeometryFault> {
    let geometry = geometry.ok_or(GeometryFault::Missing)?;
    let ring = geometry
        .coordinates
        .get(0)
        .and_then(|polygon| polygon.get(0))
        .ok_or(GeometryFault::Missing)?;

    let ring = parse_path(ring)?;
    if ring.is_empty() {
        return Err(GeometryFault::Missing);
    }
    Ok(ring)
}

/// Non-empty polylines of a multi-line geometry. Never returns an empty set.
fn zone_lines(geometry: Option<&RawGeometry>) -> Result<Vec<Vec<Coordinate>>, GeometryFault> {
    let geometry = geometry.ok_or(GeometryFault::Missing)?;
    if geometry.kind() != MULTI_LINE_TYPE {
        return Err(GeometryFault::Unsupported(geometry.kind().to_string()));
    }

    let lines = geometry
        .coordinates
        .as_array()
        .filter(|lines| !lines.is_empty())
        .ok_or(GeometryFault::Missing)?;

    let lines: Vec<Vec<Coordinate>> = lines
        .iter()
        .map(parse_path)
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(GeometryFault::Missing);
    }
    Ok(lines)
}

fn parse_path(value: &Value) -> Result<Vec<Coordinate>, GeometryFault> {
    value
        .as_array()
        .ok_or_else(|| GeometryFault::Malformed("expected an array of positions".to_string()))?
        .iter()
        .map(parse_position)
        .collect()
}

/// `[x, y, ...]` → `(lat = y, lng = x)`. Extra components (altitude) are ignored.
fn parse_position(value: &Value) -> Result<Coordinate, GeometryFault> {
    let pair = value
        .as_array()
        .ok_or_else(|| GeometryFault::Malformed(format!("position {value} is not an array")))?;

    match (
        pair.first().and_then(Value::as_f64),
        pair.get(1).and_then(Value::as_f64),
    ) {
        (Some(lng), Some(lat)) => Coordinate::from_lng_lat(lng, lat)
            .map_err(|e| GeometryFault::Malformed(e.to_string())),
        _ => Err(GeometryFault::Malformed(format!(
            "position {value} is not a numeric pair"
        ))),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
