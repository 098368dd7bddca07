//! Normalized, backend-agnostic overlay model.
//!
//! All coordinates here are `(latitude, longitude)`.

use parkmap_core::{Coordinate, RawLotRecord, RawZoneRecord};
use serde::Serialize;

/// Descriptive fields of a parking lot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotDetail {
    pub name: String,
    pub address: String,
    pub link: Option<String>,
}

impl LotDetail {
    #[must_use]
    pub fn from_record(raw: &RawLotRecord) -> Self {
        Self {
            name: raw.name().to_string(),
            address: raw.address().to_string(),
            link: raw.link().map(str::to_string),
        }
    }
}

/// Descriptive fields of a parking zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneDetail {
    pub zone_type: String,
    pub status: String,
    /// Maximum stay in minutes, as published.
    pub max_time: String,
    pub price_zone: String,
    /// Rate description; may contain inline HTML from the feed.
    pub rate: String,
}

impl ZoneDetail {
    #[must_use]
    pub fn from_record(raw: &RawZoneRecord) -> Self {
        Self {
            zone_type: raw.zone_type().to_string(),
            status: raw.status().to_string(),
            max_time: raw.max_time().to_string(),
            price_zone: raw.price_zone().to_string(),
            rate: raw.rate().to_string(),
        }
    }
}

/// Detail bag handed to a renderer when a record is presented.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detail {
    Lot(LotDetail),
    Zone(ZoneDetail),
}

impl Detail {
    /// Labelled fields in display order. Empty values are kept so every
    /// backend shows the same rows.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Detail::Lot(lot) => {
                let mut fields = vec![("Address", lot.address.clone())];
                if let Some(link) = &lot.link {
                    fields.push(("Link", link.clone()));
                }
                fields
            }
            Detail::Zone(zone) => vec![
                ("Zone Type", zone.zone_type.clone()),
                ("Status", zone.status.clone()),
                ("Max Time", format_max_time(&zone.max_time)),
                ("Price Zone", zone.price_zone.clone()),
                ("Rate", zone.rate.clone()),
            ],
        }
    }
}

fn format_max_time(max_time: &str) -> String {
    if max_time.is_empty() {
        String::new()
    } else {
        format!("{max_time} mins")
    }
}

/// A parking lot outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonOverlay {
    /// First vertex of the outer ring.
    pub anchor: Coordinate,
    pub ring: Vec<Coordinate>,
    pub label: String,
    pub detail: LotDetail,
    pub source_id: String,
}

impl PolygonOverlay {
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.detail.link.as_deref()
    }
}

/// One polyline of a parking zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSetOverlay {
    /// First vertex of the first line.
    pub anchor: Coordinate,
    pub lines: Vec<Vec<Coordinate>>,
    pub label: String,
    pub detail: ZoneDetail,
    pub source_id: String,
    /// Position of this polyline within the zone's multi-line geometry.
    pub part: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    Polygon(PolygonOverlay),
    LineSet(LineSetOverlay),
}

impl Overlay {
    #[must_use]
    pub fn anchor(&self) -> Coordinate {
        match self {
            Overlay::Polygon(p) => p.anchor,
            Overlay::LineSet(l) => l.anchor,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Overlay::Polygon(p) => &p.label,
            Overlay::LineSet(l) => &l.label,
        }
    }

    #[must_use]
    pub fn source_id(&self) -> &str {
        match self {
            Overlay::Polygon(p) => &p.source_id,
            Overlay::LineSet(l) => &l.source_id,
        }
    }

    #[must_use]
    pub fn detail(&self) -> Detail {
        match self {
            Overlay::Polygon(p) => Detail::Lot(p.detail.clone()),
            Overlay::LineSet(l) => Detail::Zone(l.detail.clone()),
        }
    }
}
