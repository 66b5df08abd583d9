//! # Response Resolution
//!
//! Turns the raw JSON of one remote call into an ordered list of flat
//! [`RawRecord`]s. This is the only place that knows how each operation's
//! response is nested.
//!
//! Each [`ResolverId`] names an envelope path (e.g. `data.getHashprice.nodes`)
//! and a [`ResponseShape`]. Transports may hand over either the full GraphQL
//! envelope or the already-unwrapped payload; both are accepted.

use hashdash_types::{DashboardError, RawRecord, ResolverId, Scalar};
use serde_json::{Map, Value};

/// Whether a response carries one entity or a list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Single,
    Collection,
}

/// Path from the response root to the records for `resolver`.
pub fn envelope_path(resolver: ResolverId) -> &'static [&'static str] {
    match resolver {
        ResolverId::BitcoinOverview => &["data", "bitcoinOverviews", "nodes"],
        ResolverId::Hashprice => &["data", "getHashprice", "nodes"],
        ResolverId::NetworkHashrate => &["data", "getNetworkHashrate", "nodes"],
        ResolverId::NetworkDifficulty => &["data", "getNetworkDifficulty", "nodes"],
        ResolverId::OhlcPrices => &["data", "getOhlcPrices", "nodes"],
        ResolverId::AsicPriceIndex => &["data", "getChartBySlug", "data"],
    }
}

pub fn response_shape(resolver: ResolverId) -> ResponseShape {
    match resolver {
        ResolverId::BitcoinOverview => ResponseShape::Single,
        _ => ResponseShape::Collection,
    }
}

/// Normalizes `raw` into schema-homogeneous flat records.
///
/// # Errors
/// [`DashboardError::MalformedResponse`] when an envelope field is missing or
/// has the wrong type, when a record is not a flat object, when a snapshot
/// does not hold exactly one entity, or when records disagree on their keys.
/// An empty collection is not an error here.
pub fn resolve(resolver: ResolverId, raw: &Value) -> Result<Vec<RawRecord>, DashboardError> {
    let payload = unwrap_envelope(resolver, raw)?;

    let elements: Vec<&Value> = match (response_shape(resolver), payload) {
        (ResponseShape::Single, Value::Object(_)) => vec![payload],
        (ResponseShape::Single, Value::Array(items)) if items.len() == 1 => vec![&items[0]],
        (ResponseShape::Single, Value::Array(items)) => {
            return Err(DashboardError::malformed(
                resolver,
                format!("expected exactly one entity, got {}", items.len()),
            ));
        }
        (ResponseShape::Collection, Value::Array(items)) => items.iter().collect(),
        (_, other) => {
            return Err(DashboardError::malformed(
                resolver,
                format!("expected a list of records, got {}", json_type(other)),
            ));
        }
    };

    let records = elements
        .into_iter()
        .enumerate()
        .map(|(row, element)| flatten_record(resolver, row, element))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(first) = records.first()
        && let Some((row, _)) = records.iter().enumerate().find(|(_, record)| !record.same_keys(first))
    {
        return Err(DashboardError::malformed(
            resolver,
            format!("record {row} does not share the fields of record 0"),
        ));
    }
    Ok(records)
}

/// Walks the envelope path when the response carries it; otherwise the
/// value is taken as the payload itself.
fn unwrap_envelope(resolver: ResolverId, raw: &Value) -> Result<&Value, DashboardError> {
    let path = envelope_path(resolver);
    let carries_envelope = path
        .first()
        .is_some_and(|root| raw.as_object().is_some_and(|object| object.contains_key(*root)));
    if !carries_envelope {
        return Ok(raw);
    }

    let mut current = raw;
    for (depth, segment) in path.iter().enumerate() {
        let walked = path[..depth].join(".");
        let object = current.as_object().ok_or_else(|| {
            DashboardError::malformed(
                resolver,
                format!("expected an object at '{}', got {}", display_path(&walked), json_type(current)),
            )
        })?;
        current = match object.get(*segment) {
            Some(Value::Null) | None => {
                return Err(DashboardError::malformed(
                    resolver,
                    format!("missing field '{}'", path[..=depth].join(".")),
                ));
            }
            Some(next) => next,
        };
    }
    Ok(current)
}

fn flatten_record(resolver: ResolverId, row: usize, element: &Value) -> Result<RawRecord, DashboardError> {
    let object: &Map<String, Value> = element.as_object().ok_or_else(|| {
        DashboardError::malformed(resolver, format!("record {row} is {}, not an object", json_type(element)))
    })?;
    let mut record = RawRecord::new();
    for (key, value) in object {
        let scalar = Scalar::from_json(value).ok_or_else(|| {
            DashboardError::malformed(
                resolver,
                format!("field '{key}' of record {row} is {}, not a scalar", json_type(value)),
            )
        })?;
        record.insert(key.as_str(), scalar);
    }
    Ok(record)
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn collection_envelope_is_unwrapped_in_order() {
        let raw = json!({"data": {"getHashprice": {"nodes": [
            {"timestamp": "2024-01-01T00:00:00Z", "price": 0.1},
            {"timestamp": "2024-01-02T00:00:00Z", "price": 0.2}
        ]}}});
        let records = resolve(ResolverId::Hashprice, &raw).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("price"), Some(&Scalar::from(0.2)));
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["timestamp", "price"]);
    }

    #[test]
    fn bare_payloads_are_accepted() {
        let raw = json!([{"timestamp": "2024-01-01", "networkHashrate": 500}]);
        let records = resolve(ResolverId::NetworkHashrate, &raw).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn snapshot_object_is_wrapped() {
        let raw = json!({"data": {"bitcoinOverviews": {"nodes": [{"timestamp": "2024-01-01", "marketcap": 1.0}]}}});
        assert_eq!(resolve(ResolverId::BitcoinOverview, &raw).unwrap().len(), 1);
        let single = json!({"timestamp": "2024-01-01", "marketcap": 1.0});
        assert_eq!(resolve(ResolverId::BitcoinOverview, &single).unwrap().len(), 1);
    }

    #[test]
    fn snapshot_with_two_entities_is_malformed() {
        let raw = json!([{"a": 1}, {"a": 2}]);
        let error = resolve(ResolverId::BitcoinOverview, &raw).unwrap_err();
        assert!(matches!(error, DashboardError::MalformedResponse { .. }));
        assert!(error.to_string().contains("exactly one"));
    }

    #[test]
    fn missing_envelope_field_is_named() {
        let raw = json!({"data": {"getNetworkHashrate": null}});
        let error = resolve(ResolverId::NetworkHashrate, &raw).unwrap_err();
        assert!(error.to_string().contains("data.getNetworkHashrate"), "{error}");
    }

    #[test]
    fn nested_values_and_heterogeneous_records_are_malformed() {
        let nested = json!([{"timestamp": "2024-01-01", "price": {"usd": 1}}]);
        assert!(matches!(
            resolve(ResolverId::Hashprice, &nested),
            Err(DashboardError::MalformedResponse { .. })
        ));
        let mixed = json!([{"timestamp": "2024-01-01", "price": 1}, {"timestamp": "2024-01-02", "cost": 1}]);
        let error = resolve(ResolverId::Hashprice, &mixed).unwrap_err();
        assert!(error.to_string().contains("record 1"));
    }

    #[test]
    fn empty_collection_passes_through() {
        let raw = json!({"data": {"getOhlcPrices": {"nodes": []}}});
        assert!(resolve(ResolverId::OhlcPrices, &raw).unwrap().is_empty());
    }
}
