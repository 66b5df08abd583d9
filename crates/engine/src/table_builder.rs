//! Record list to column-oriented table.
//!
//! The first record's key order is canonical. Its first key becomes the
//! index, the rest become columns in the same order. Record order is kept
//! as received; nothing is sorted, filtered, deduplicated or coerced apart
//! from parsing the index.

use hashdash_types::{DashboardError, IndexKind, IndexValue, RawRecord, Scalar, Table};
use hashdash_util::{parse_timestamp, timestamp_from_epoch};
use indexmap::IndexMap;

/// Builds a [`Table`] from schema-homogeneous records.
///
/// # Errors
/// - [`DashboardError::EmptyResult`] for an empty list, or for records
///   without any field
/// - [`DashboardError::SchemaMismatch`] when a record's field names differ
///   from the first record's
/// - [`DashboardError::IndexParse`] when `index_kind` is temporal and an
///   index value is not a point in time
pub fn build_table(records: &[RawRecord], index_kind: IndexKind) -> Result<Table, DashboardError> {
    let first = records.first().ok_or(DashboardError::EmptyResult)?;
    let mut keys = first.keys();
    let index_name = keys.next().ok_or(DashboardError::EmptyResult)?.to_string();
    let column_names: Vec<String> = keys.map(str::to_string).collect();

    for (row, record) in records.iter().enumerate().skip(1) {
        if !record.same_keys(first) {
            return Err(DashboardError::SchemaMismatch {
                row,
                expected: first.keys().map(str::to_string).collect(),
                found: record.keys().map(str::to_string).collect(),
            });
        }
    }

    let mut index = Vec::with_capacity(records.len());
    let mut columns: IndexMap<String, Vec<Scalar>> = column_names
        .iter()
        .map(|name| (name.clone(), Vec::with_capacity(records.len())))
        .collect();

    for (row, record) in records.iter().enumerate() {
        let raw_index = record.get(&index_name).unwrap_or(&Scalar::Null);
        index.push(parse_index(&index_name, row, raw_index, index_kind)?);
        for (name, values) in columns.iter_mut() {
            values.push(record.get(name).cloned().unwrap_or(Scalar::Null));
        }
    }

    Table::new(index_name, index, columns)
}

fn parse_index(column: &str, row: usize, value: &Scalar, index_kind: IndexKind) -> Result<IndexValue, DashboardError> {
    if index_kind == IndexKind::Identity {
        return Ok(IndexValue::Identity(value.clone()));
    }
    let parsed = match value {
        Scalar::Text(text) => parse_timestamp(text),
        Scalar::Number(number) => number.as_f64().and_then(timestamp_from_epoch),
        Scalar::Null | Scalar::Bool(_) => None,
    };
    parsed.map(IndexValue::Timestamp).ok_or_else(|| DashboardError::IndexParse {
        column: column.to_string(),
        row,
        value: match value {
            Scalar::Text(text) => text.clone(),
            other => other.to_json().to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(fields: &[(&str, Scalar)]) -> RawRecord {
        fields.iter().cloned().collect()
    }

    #[test]
    fn first_key_becomes_the_index() {
        let records = vec![
            record(&[("t", "2024-01-01".into()), ("a", 1_i64.into()), ("b", "x".into())]),
            record(&[("t", "2024-01-02".into()), ("a", 2_i64.into()), ("b", "y".into())]),
        ];
        let table = build_table(&records, IndexKind::Temporal).unwrap();
        assert_eq!(table.index_name(), "t");
        assert_eq!(table.column_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.column("a").unwrap(), &[Scalar::from(1_i64), Scalar::from(2_i64)]);
        assert_eq!(table.column("b").unwrap(), &[Scalar::from("x"), Scalar::from("y")]);
        assert_eq!(
            table.index()[1],
            IndexValue::Timestamp(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn record_order_is_never_sorted() {
        let records = vec![
            record(&[("t", "2024-01-03".into()), ("a", 3_i64.into())]),
            record(&[("t", "2024-01-01".into()), ("a", 1_i64.into())]),
        ];
        let table = build_table(&records, IndexKind::Temporal).unwrap();
        assert_eq!(table.column("a").unwrap(), &[Scalar::from(3_i64), Scalar::from(1_i64)]);
    }

    #[test]
    fn columns_follow_first_record_order_even_when_later_records_differ() {
        let records = vec![
            record(&[("t", "2024-01-01".into()), ("a", 1_i64.into()), ("b", 2_i64.into())]),
            record(&[("t", "2024-01-02".into()), ("b", 4_i64.into()), ("a", 3_i64.into())]),
        ];
        let table = build_table(&records, IndexKind::Temporal).unwrap();
        assert_eq!(table.column("a").unwrap(), &[Scalar::from(1_i64), Scalar::from(3_i64)]);
        assert_eq!(table.column("b").unwrap(), &[Scalar::from(2_i64), Scalar::from(4_i64)]);
    }

    #[test]
    fn null_and_boolean_indexes_do_not_parse() {
        let records = vec![record(&[("t", Scalar::Null), ("a", 1_i64.into())])];
        let error = build_table(&records, IndexKind::Temporal).unwrap_err();
        assert!(matches!(error, DashboardError::IndexParse { ref value, .. } if value == "null"));
    }

    #[test]
    fn identity_index_keeps_values_as_received() {
        let records = vec![record(&[("name", "antminer".into()), ("price", 12.5.into())])];
        let table = build_table(&records, IndexKind::Identity).unwrap();
        assert_eq!(table.index()[0], IndexValue::Identity(Scalar::from("antminer")));
        assert!(!table.is_temporal());
    }

    #[test]
    fn index_only_records_build_an_empty_column_set() {
        let records = vec![record(&[("t", "2024-01-01".into())])];
        let table = build_table(&records, IndexKind::Temporal).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column_names().count(), 0);
    }
}
