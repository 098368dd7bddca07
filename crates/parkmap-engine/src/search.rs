//! Substring search over the record index, optionally ranked by distance.

use std::cmp::Ordering;

use parkmap_core::{Coordinate, RawLotRecord, RawZoneRecord};
use serde::Serialize;

use crate::distance::haversine_km;
use crate::index::RecordIndex;
use crate::normalize::{lot_anchor, zone_anchor};
use crate::overlay::{Detail, LotDetail, ZoneDetail};

/// A raw record as returned by search. Search works on the verbatim feed
/// records rather than on overlays, so records without usable geometry are
/// still findable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchableRecord {
    Lot(RawLotRecord),
    Zone(RawZoneRecord),
}

impl SearchableRecord {
    /// Display label: lot name for lots, zone type for zones.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            SearchableRecord::Lot(lot) => lot.name(),
            SearchableRecord::Zone(zone) => zone.zone_type(),
        }
    }

    /// Anchor re-derived from the raw geometry.
    #[must_use]
    pub fn anchor(&self) -> Option<Coordinate> {
        match self {
            SearchableRecord::Lot(lot) => lot_anchor(lot),
            SearchableRecord::Zone(zone) => zone_anchor(zone),
        }
    }

    #[must_use]
    pub fn detail(&self) -> Detail {
        match self {
            SearchableRecord::Lot(lot) => Detail::Lot(LotDetail::from_record(lot)),
            SearchableRecord::Zone(zone) => Detail::Zone(ZoneDetail::from_record(zone)),
        }
    }
}

/// Case-insensitive containment test. `needle` must already be lowercase.
fn any_field_contains(fields: [&str; 2], needle: &str) -> bool {
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// A search hit with its distance from the reference point, when both the
/// reference and the record's anchor are known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    pub record: SearchableRecord,
    pub distance_km: Option<f64>,
}

/// Searches lots (name, address) and zones (type, status) for `query`.
///
/// A blank query yields nothing. Without a reference the result keeps feed
/// order, lots first. With a reference the result is stably sorted nearest
/// first; records whose anchor cannot be resolved go last.
#[must_use]
pub fn ranked_search(
    index: &RecordIndex,
    query: &str,
    reference: Option<Coordinate>,
) -> Vec<RankedRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    // Filter on borrowed records; only hits are cloned.
    let lots = index
        .all_lots()
        .iter()
        .filter(|lot| any_field_contains([lot.name(), lot.address()], &needle))
        .map(|lot| SearchableRecord::Lot(lot.clone()));
    let zones = index
        .all_zones()
        .iter()
        .filter(|zone| any_field_contains([zone.zone_type(), zone.status()], &needle))
        .map(|zone| SearchableRecord::Zone(zone.clone()));

    let mut hits: Vec<RankedRecord> = lots
        .chain(zones)
        .map(|record| {
            let distance_km = reference
                .zip(record.anchor())
                .map(|(from, to)| haversine_km(from, to));
            RankedRecord {
                record,
                distance_km,
            }
        })
        .collect();

    if reference.is_some() {
        hits.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    }

    tracing::debug!(query, hits = hits.len(), ranked = reference.is_some(), "search complete");
    hits
}

/// [`ranked_search`] without the distances.
#[must_use]
pub fn search(
    index: &RecordIndex,
    query: &str,
    reference: Option<Coordinate>,
) -> Vec<SearchableRecord> {
    ranked_search(index, query, reference)
        .into_iter()
        .map(|hit| hit.record)
        .collect()
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
