//! Descriptive statistics over the numeric columns of a [`Table`].
//!
//! Quartiles use linear interpolation between closest ranks and `std` is the
//! sample standard deviation, so the figures match a spreadsheet's or a
//! dataframe's `describe()`.

use hashdash_types::Table;
use serde::Serialize;

/// Row labels in display order.
pub const STATISTIC_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Absent when fewer than two values are present
    pub std: Option<f64>,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Values in [`STATISTIC_LABELS`] order.
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            Some(self.mean),
            self.std,
            Some(self.min),
            Some(self.q25),
            Some(self.median),
            Some(self.q75),
            Some(self.max),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Statistics {
    pub columns: Vec<ColumnSummary>,
}

impl Statistics {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|summary| summary.column == name)
    }
}

/// Summarizes every numeric column; other columns are left out.
pub fn describe(table: &Table) -> Statistics {
    let columns = table
        .numeric_columns()
        .filter_map(|name| {
            let values: Vec<f64> = table.column(name)?.iter().filter_map(|cell| cell.as_f64()).collect();
            summarize(name, values)
        })
        .collect();
    Statistics { columns }
}

fn summarize(name: &str, mut values: Vec<f64>) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count >= 2).then(|| {
        let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        (squared / (count - 1) as f64).sqrt()
    });
    Some(ColumnSummary {
        column: name.to_string(),
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    })
}

/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
