use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FeedError;

/// Turns a feed body into typed rows.
///
/// The body must be a JSON array. A Socrata error object
/// (`{"error": true, "message": ...}`) becomes [`FeedError::Api`]. Rows
/// that fail to deserialize are logged and skipped.
pub(crate) fn parse_rows<T: DeserializeOwned>(
    body: Value,
    context: &str,
) -> Result<Vec<T>, FeedError> {
    let rows = match body {
        Value::Array(rows) => rows,
        Value::Object(ref obj) if obj.get("error").and_then(Value::as_bool) == Some(true) => {
            let message = obj
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(FeedError::Api {
                context: context.to_string(),
                message,
            });
        }
        other => {
            return Err(FeedError::UnexpectedShape {
                context: context.to_string(),
                found: json_kind(&other),
            })
        }
    };

    let total = rows.len();
    let parsed: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            serde_json::from_value::<T>(row)
                .map_err(|e| {
                    tracing::warn!(context, row = idx, error = %e, "skipping malformed feed row");
                })
                .ok()
        })
        .collect();

    tracing::debug!(
        context,
        total,
        parsed = parsed.len(),
        "parsed feed rows"
    );
    Ok(parsed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parkmap_core::{RawLotRecord, RawZoneRecord};
    use serde_json::json;

    #[test]
    fn parses_array_of_rows() {
        let rows: Vec<RawLotRecord> = parse_rows(
            json!([{ "lot_name": "A" }, { "lot_name": "B" }]),
            "lots",
        )
        .unwrap();
        let names: Vec<&str> = rows.iter().map(RawLotRecord::name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn skips_rows_that_are_not_objects() {
        let rows: Vec<RawZoneRecord> =
            parse_rows(json!([{ "zone_type": "Residential" }, 42, "oops"]), "zones").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].zone_type(), "Residential");
    }

    #[test]
    fn keeps_rows_whose_geometry_has_the_wrong_shape() {
        let lots: Vec<RawLotRecord> = parse_rows(
            json!([{
                "lot_name": "Plus 15 Lot",
                "address_desc": "123 5 Ave SW",
                "multipolygon": "n/a"
            }]),
            "lots",
        )
        .unwrap();
        assert_eq!(lots.len(), 1);
        assert!(lots[0].multipolygon.is_none());

        let zones: Vec<RawZoneRecord> = parse_rows(
            json!([{ "zone_type": "On-Street", "the_geom": { "type": 5, "coordinates": [] } }]),
            "zones",
        )
        .unwrap();
        assert_eq!(zones.len(), 1);
    }

    #[test]
    fn rejects_non_array_body() {
        let err = parse_rows::<RawLotRecord>(json!({ "rows": [] }), "lots").unwrap_err();
        assert!(
            matches!(err, FeedError::UnexpectedShape { found: "object", .. }),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn surfaces_socrata_error_object() {
        let err = parse_rows::<RawLotRecord>(
            json!({ "error": true, "message": "Unrecognized arguments [$lmit]" }),
            "lots",
        )
        .unwrap_err();
        assert!(
            matches!(err, FeedError::Api { ref message, .. } if message.contains("Unrecognized"))
        );
    }

    #[test]
    fn empty_array_is_ok() {
        let rows: Vec<RawLotRecord> = parse_rows(json!([]), "lots").unwrap();
        assert!(rows.is_empty());
    }
}
