//! Raw parking records as published by the open-data feeds.
//!
//! Records are kept verbatim: search runs over these types, not over the
//! normalized overlays. Every text column is optional because the feeds
//! routinely omit them; accessors return `""` for a missing value.
//!
//! A record with a wrongly shaped geometry or link column still
//! deserializes: the column reads as absent, so the record stays searchable
//! and is only left out of drawing.

use serde::{Deserialize, Deserializer, Serialize};

/// A GeoJSON-like geometry object: `{ "type": ..., "coordinates": ... }`.
///
/// `coordinates` stays as raw JSON so that one malformed record can be
/// skipped during normalization instead of failing the whole feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGeometry {
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl RawGeometry {
    #[must_use]
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or("")
    }
}

/// Socrata URL column: `{ "url": "https://..." }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomePage {
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
}

/// A parking lot from the lots feed. Geometry is a multipolygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLotRecord {
    /// Socrata row identifier, present only when the feed is queried for it.
    #[serde(rename = ":id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lot_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub address_desc: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_home_page",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_page: Option<HomePage>,
    #[serde(
        default,
        deserialize_with = "lenient_geometry",
        skip_serializing_if = "Option::is_none"
    )]
    pub multipolygon: Option<RawGeometry>,
}

impl RawLotRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        self.lot_name.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn address(&self) -> &str {
        self.address_desc.as_deref().unwrap_or("")
    }

    /// The lot's home page URL, if one is published and non-empty.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.home_page
            .as_ref()
            .and_then(|h| h.url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }
}

/// An on-street parking zone from the zones feed. Geometry is a multi-line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawZoneRecord {
    #[serde(rename = ":id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub zone_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// Maximum stay in minutes; published as either a string or a number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub max_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price_zone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub html_zone_rate: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_geometry",
        skip_serializing_if = "Option::is_none"
    )]
    pub the_geom: Option<RawGeometry>,
    /// Geometry column of older zone exports. Those exports publish a single
    /// `LineString` here, which does not normalize into an overlay.
    #[serde(
        default,
        deserialize_with = "lenient_geometry",
        skip_serializing_if = "Option::is_none"
    )]
    pub line: Option<RawGeometry>,
}

impl RawZoneRecord {
    /// `the_geom` when present, else the legacy `line` column.
    #[must_use]
    pub fn geometry(&self) -> Option<&RawGeometry> {
        self.the_geom.as_ref().or(self.line.as_ref())
    }

    #[must_use]
    pub fn zone_type(&self) -> &str {
        self.zone_type.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn max_time(&self) -> &str {
        self.max_time.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn price_zone(&self) -> &str {
        self.price_zone.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn rate(&self) -> &str {
        self.html_zone_rate.as_deref().unwrap_or("")
    }
}

/// Accepts a string, number or boolean and keeps it as text.
/// `null` and structured values become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Keeps a geometry only when the column is a JSON object.
fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<RawGeometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Accepts `{ "url": ... }` or a bare URL string.
fn lenient_home_page<'de, D>(deserializer: D) -> Result<Option<HomePage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).ok(),
        Some(serde_json::Value::String(url)) => Some(HomePage { url: Some(url) }),
        _ => None,
    })
}
