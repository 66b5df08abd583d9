//! Plain-text output for the headless subcommands.

use std::fmt::Write;

use hashdash_engine::{FetchOutcome, STATISTIC_LABELS, Statistics};
use hashdash_registry::ParameterCatalog;
use hashdash_types::{PresentationMode, Table};
use hashdash_util::{format_number, header_title, truncate_to_width};
use unicode_width::UnicodeWidthStr;

const MAX_CELL_WIDTH: usize = 28;

pub fn operations(catalog: &ParameterCatalog) -> String {
    let mut out = String::new();
    for operation in catalog.operations() {
        let _ = writeln!(out, "{}  ({})", operation.name, operation.description);
        for axis in &operation.axes {
            let labels: Vec<&str> = axis.labels().collect();
            let _ = writeln!(out, "    {}: {}", axis.name, labels.join(", "));
        }
    }
    out
}

pub fn outcome(outcome: &FetchOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", outcome.selection.describe());
    out.push('\n');
    match outcome.mode {
        PresentationMode::Snapshot => {
            out.push_str("Bitcoin Metrics\n");
            out.push_str(&metrics(&outcome.table));
        }
        PresentationMode::Timeseries => {
            if let Some(statistics) = outcome.statistics.as_ref().filter(|statistics| !statistics.is_empty()) {
                out.push_str("Statistics\n");
                out.push_str(&statistics_grid(statistics));
            }
        }
    }
    out.push_str("\nRaw Data\n");
    out.push_str(&raw_table(&outcome.table));
    out
}

fn metrics(table: &Table) -> String {
    let rows: Vec<(String, String)> = table
        .first_row()
        .into_iter()
        .map(|(name, value)| {
            let text = value.as_f64().map_or_else(|| value.to_string(), format_number);
            (header_title(name), text)
        })
        .collect();
    let width = rows.iter().map(|(name, _)| name.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (name, value) in rows {
        let _ = writeln!(out, "  {}  {value}", pad(&name, width));
    }
    out
}

fn statistics_grid(statistics: &Statistics) -> String {
    let header: Vec<String> = std::iter::once(String::new())
        .chain(statistics.columns.iter().map(|summary| header_title(&summary.column)))
        .collect();
    let rows: Vec<Vec<String>> = STATISTIC_LABELS
        .iter()
        .enumerate()
        .map(|(position, label)| {
            std::iter::once(label.to_string())
                .chain(
                    statistics
                        .columns
                        .iter()
                        .map(|summary| summary.values()[position].map_or_else(|| "NaN".to_string(), format_number)),
                )
                .collect()
        })
        .collect();
    grid(&header, &rows)
}

fn raw_table(table: &Table) -> String {
    let header: Vec<String> = std::iter::once(table.index_name())
        .chain(table.column_names())
        .map(header_title)
        .collect();
    let rows: Vec<Vec<String>> = table
        .rows()
        .map(|(index, cells)| {
            std::iter::once(index.to_string())
                .chain(cells.into_iter().map(|cell| cell.to_string()))
                .collect()
        })
        .collect();
    grid(&header, &rows)
}

/// Left-aligned columns separated by two spaces.
fn grid(header: &[String], rows: &[Vec<String>]) -> String {
    let cells = |row: &[String]| -> Vec<String> { row.iter().map(|cell| truncate_to_width(cell, MAX_CELL_WIDTH)).collect() };
    let header = cells(header);
    let rows: Vec<Vec<String>> = rows.iter().map(|row| cells(row)).collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.width()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row.iter().zip(&widths).map(|(cell, width)| pad(cell, *width)).collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use hashdash_engine::{build_table, describe};
    use hashdash_types::{IndexKind, RawRecord, Scalar};

    use super::*;

    fn table() -> Table {
        let records: Vec<RawRecord> = vec![
            [("timestamp", Scalar::from("2024-01-01")), ("hashrate", Scalar::from(500_i64))].into_iter().collect(),
            [("timestamp", Scalar::from("2024-01-02")), ("hashrate", Scalar::from(520_i64))].into_iter().collect(),
        ];
        build_table(&records, IndexKind::Temporal).unwrap()
    }

    #[test]
    fn raw_table_aligns_columns() {
        let rendered = raw_table(&table());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Timestamp            Hashrate");
        assert_eq!(lines[1], "2024-01-01 00:00:00  500");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn statistics_show_every_label() {
        let rendered = statistics_grid(&describe(&table()));
        for label in STATISTIC_LABELS {
            assert!(rendered.lines().any(|line| line.starts_with(label)), "missing {label}");
        }
        assert!(rendered.contains("510"));
    }

    #[test]
    fn operations_list_axes_in_catalog_order() {
        let rendered = operations(&ParameterCatalog::embedded().unwrap());
        let first = rendered.lines().next().unwrap();
        assert!(first.starts_with("Bitcoin Overview"));
        assert!(rendered.contains("    currency: USD, BTC"));
    }
}
