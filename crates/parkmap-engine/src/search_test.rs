use super::*;
use serde_json::json;

const DOWNTOWN: (f64, f64) = (51.0447, -114.0719);

fn downtown() -> Coordinate {
    Coordinate::new(DOWNTOWN.0, DOWNTOWN.1).unwrap()
}

/// Lot whose single vertex sits `lat_offset` degrees north of downtown.
fn lot_at(name: &str, address: &str, lat_offset: f64) -> RawLotRecord {
    serde_json::from_value(json!({
        "lot_name": name,
        "address_desc": address,
        "multipolygon": {
            "type": "MultiPolygon",
            "coordinates": [[[[DOWNTOWN.1, DOWNTOWN.0 + lat_offset]]]]
        }
    }))
    .unwrap()
}

fn zone_at(zone_type: &str, status: &str, lat_offset: f64) -> RawZoneRecord {
    serde_json::from_value(json!({
        "zone_type": zone_type,
        "status": status,
        "the_geom": {
            "type": "MultiLineString",
            "coordinates": [[[DOWNTOWN.1, DOWNTOWN.0 + lat_offset], [DOWNTOWN.1 - 0.001, DOWNTOWN.0 + lat_offset]]]
        }
    }))
    .unwrap()
}

fn index_of(lots: Vec<RawLotRecord>, zones: Vec<RawZoneRecord>) -> RecordIndex {
    let mut index = RecordIndex::new();
    index.load(lots, zones);
    index
}

fn labels(records: &[SearchableRecord]) -> Vec<&str> {
    records.iter().map(SearchableRecord::label).collect()
}

#[test]
fn blank_query_returns_nothing() {
    let index = index_of(vec![lot_at("Plus 15 Lot", "123 5 Ave SW", 0.0)], Vec::new());
    for query in ["", "   ", "\t\n"] {
        assert!(search(&index, query, None).is_empty());
        assert!(search(&index, query, Some(downtown())).is_empty());
    }
}

#[test]
fn query_matches_lot_address_case_insensitively() {
    let index = index_of(
        vec![
            lot_at("Plus 15 Lot", "123 5 Ave SW", 0.0),
            lot_at("Stampede Lot", "1410 Olympic Way SE", 0.0),
        ],
        Vec::new(),
    );
    let hits = search(&index, "5 AVE", None);
    assert_eq!(labels(&hits), ["Plus 15 Lot"]);
}

#[test]
fn query_matches_lot_name() {
    let index = index_of(vec![lot_at("Plus 15 Lot", "123 5 Ave SW", 0.0)], Vec::new());
    assert_eq!(search(&index, "plus 15", None).len(), 1);
}

#[test]
fn zones_match_on_type_and_status_only() {
    let mut zone = zone_at("On-Street", "Active", 0.0);
    zone.html_zone_rate = Some("$2.75/hr".into());
    let index = index_of(Vec::new(), vec![zone]);

    assert_eq!(search(&index, "street", None).len(), 1);
    assert_eq!(search(&index, "active", None).len(), 1);
    assert!(search(&index, "2.75", None).is_empty());
}

#[test]
fn without_reference_lots_come_before_zones_in_feed_order() {
    let index = index_of(
        vec![lot_at("Lot B", "", 0.05), lot_at("Lot A", "", 0.01)],
        vec![zone_at("Lot-adjacent zone", "", 0.0)],
    );
    let hits = search(&index, "lot", None);
    assert_eq!(labels(&hits), ["Lot B", "Lot A", "Lot-adjacent zone"]);
}

#[test]
fn with_reference_nearest_comes_first() {
    let index = index_of(
        vec![
            lot_at("Five km lot", "", 0.045),
            lot_at("Two km lot", "", 0.018),
        ],
        Vec::new(),
    );

    let hits = ranked_search(&index, "lot", Some(downtown()));

    assert_eq!(hits[0].record.label(), "Two km lot");
    assert_eq!(hits[1].record.label(), "Five km lot");
    let near = hits[0].distance_km.unwrap();
    let far = hits[1].distance_km.unwrap();
    assert!((near - 2.0).abs() < 0.05, "got {near}");
    assert!((far - 5.0).abs() < 0.05, "got {far}");
}

#[test]
fn ranking_is_non_decreasing_across_kinds() {
    let index = index_of(
        vec![lot_at("Far lot", "", 0.09), lot_at("Mid lot", "", 0.03)],
        vec![zone_at("Near lot zone", "", 0.001)],
    );
    let hits = ranked_search(&index, "lot", Some(downtown()));
    let distances: Vec<f64> = hits.iter().filter_map(|h| h.distance_km).collect();
    assert_eq!(distances.len(), 3);
    assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(hits[0].record.label(), "Near lot zone");
}

#[test]
fn equal_distances_keep_lots_then_zones_order() {
    let index = index_of(
        vec![lot_at("Tie lot", "", 0.02), lot_at("Tie lot 2", "", 0.02)],
        vec![zone_at("Tie zone", "", 0.02)],
    );
    let hits = search(&index, "tie", Some(downtown()));
    assert_eq!(labels(&hits), ["Tie lot", "Tie lot 2", "Tie zone"]);
}

#[test]
fn record_without_geometry_is_searchable_and_ranked_last() {
    let no_shape: RawLotRecord =
        serde_json::from_value(json!({ "lot_name": "Ghost lot" })).unwrap();
    let index = index_of(
        vec![no_shape, lot_at("Real lot", "", 0.03)],
        Vec::new(),
    );

    let unranked = search(&index, "lot", None);
    assert_eq!(labels(&unranked), ["Ghost lot", "Real lot"]);

    let ranked = ranked_search(&index, "lot", Some(downtown()));
    assert_eq!(ranked[0].record.label(), "Real lot");
    assert_eq!(ranked[1].record.label(), "Ghost lot");
    assert_eq!(ranked[1].distance_km, None);
}

#[test]
fn results_without_reference_carry_no_distance() {
    let index = index_of(vec![lot_at("Plus 15 Lot", "", 0.0)], Vec::new());
    let hits = ranked_search(&index, "plus", None);
    assert_eq!(hits[0].distance_km, None);
}

#[test]
fn missing_fields_behave_as_empty_strings() {
    let bare: RawZoneRecord = serde_json::from_value(json!({})).unwrap();
    let index = index_of(Vec::new(), vec![bare]);
    assert!(search(&index, "a", None).is_empty());
}

#[test]
fn searchable_record_anchor_matches_normalizer() {
    let record = SearchableRecord::Lot(lot_at("Plus 15 Lot", "", 0.0));
    assert_eq!(record.anchor(), Some(downtown()));
}

#[test]
fn hits_are_copies_of_indexed_records() {
    let index = index_of(
        vec![lot_at("Plus 15 Lot", "123 5 Ave SW", 0.0), lot_at("Other", "", 0.0)],
        vec![zone_at("On-Street", "Active", 0.0)],
    );
    let hits = search(&index, "5 ave", None);
    assert_eq!(hits, [SearchableRecord::Lot(index.all_lots()[0].clone())]);
    assert_eq!(index.len(), 3);
}

#[test]
fn field_test_is_case_insensitive() {
    assert!(any_field_contains(["Plus 15 Lot", ""], "plus"));
    assert!(any_field_contains(["", "123 5 AVE SW"], "5 ave"));
    assert!(!any_field_contains(["On-Street", "Active"], "lot"));
}
