//! Column-oriented, index-keyed result of one fetch.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::{DashboardError, Scalar};

/// A parsed value of the index column.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexValue {
    Timestamp(DateTime<Utc>),
    Identity(Scalar),
}

impl IndexValue {
    /// Position of this value on a chart's x axis: epoch seconds for
    /// timestamps, the numeric value for numeric identities, the row
    /// position otherwise.
    pub fn axis_position(&self, row: usize) -> f64 {
        match self {
            Self::Timestamp(timestamp) => timestamp.timestamp() as f64,
            Self::Identity(scalar) => scalar.as_f64().unwrap_or(row as f64),
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Timestamp(timestamp) => Some(timestamp),
            Self::Identity(_) => None,
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp(timestamp) => write!(f, "{}", timestamp.format("%Y-%m-%d %H:%M:%S")),
            Self::Identity(scalar) => write!(f, "{scalar}"),
        }
    }
}

impl Serialize for IndexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Timestamp(timestamp) => serializer.serialize_str(&timestamp.to_rfc3339()),
            Self::Identity(scalar) => scalar.serialize(serializer),
        }
    }
}

/// Normalized output of the table builder.
///
/// Invariant: every column holds exactly as many values as the index. Rows
/// appear in the order the records were received; the table never sorts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    index_name: String,
    index: Vec<IndexValue>,
    columns: IndexMap<String, Vec<Scalar>>,
}

impl Table {
    /// Assembles a table, rejecting columns whose length differs from the
    /// index.
    pub fn new(index_name: impl Into<String>, index: Vec<IndexValue>, columns: IndexMap<String, Vec<Scalar>>) -> Result<Self, DashboardError> {
        let index_name = index_name.into();
        if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != index.len()) {
            return Err(DashboardError::SchemaMismatch {
                row: values.len().min(index.len()),
                expected: vec![index_name],
                found: vec![name.clone()],
            });
        }
        Ok(Self {
            index_name,
            index,
            columns,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn index(&self) -> &[IndexValue] {
        &self.index
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[Scalar]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Scalar])> {
        self.columns.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn is_temporal(&self) -> bool {
        self.index.first().is_some_and(|value| value.as_timestamp().is_some())
    }

    /// Columns whose non-null cells are all numbers, with at least one number.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|(_, values)| {
                values.iter().any(Scalar::is_number) && values.iter().all(|value| value.is_null() || value.is_number())
            })
            .map(|(name, _)| name.as_str())
    }

    /// `(x, y)` points for charting a column; non-numeric cells are skipped.
    pub fn numeric_series(&self, name: &str) -> Vec<(f64, f64)> {
        let Some(values) = self.columns.get(name) else {
            return Vec::new();
        };
        self.index
            .iter()
            .zip(values)
            .enumerate()
            .filter_map(|(row, (index, value))| value.as_f64().map(|y| (index.axis_position(row), y)))
            .collect()
    }

    /// Values of the first row, one per column, in column order.
    pub fn first_row(&self) -> Vec<(&str, &Scalar)> {
        self.columns
            .iter()
            .filter_map(|(name, values)| values.first().map(|value| (name.as_str(), value)))
            .collect()
    }

    /// Row-major view: the index value followed by each column's cell.
    pub fn rows(&self) -> impl Iterator<Item = (&IndexValue, Vec<&Scalar>)> {
        self.index
            .iter()
            .enumerate()
            .map(|(row, index)| (index, self.columns.values().map(|values| &values[row]).collect()))
    }
}
