//! Line and area charts, one dataset per numeric column.

use hashdash_types::Table;
use hashdash_util::{format_axis_label, format_number, header_title};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Chart, Dataset, GraphType, Paragraph},
};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChartKind {
    Line,
    Area,
}

pub(super) fn draw_chart(frame: &mut Frame, area: Rect, table: &Table, kind: ChartKind) {
    let block = Block::bordered().border_style(theme::border_style(false));
    let series: Vec<(String, Vec<(f64, f64)>)> = table
        .numeric_columns()
        .map(|name| (header_title(name), table.numeric_series(name)))
        .filter(|(_, points)| !points.is_empty())
        .collect();
    if series.is_empty() {
        frame.render_widget(
            Paragraph::new("No numeric columns to chart").style(theme::text_muted()).block(block),
            area,
        );
        return;
    }

    let (x_min, x_max) = bounds(series.iter().flat_map(|(_, points)| points.iter().map(|(x, _)| *x)));
    let (mut y_min, y_max) = bounds(series.iter().flat_map(|(_, points)| points.iter().map(|(_, y)| *y)));
    if kind == ChartKind::Area {
        // areas fill from the axis
        y_min = y_min.min(0.0);
    }

    let graph_type = match kind {
        ChartKind::Line => GraphType::Line,
        ChartKind::Area => GraphType::Bar,
    };
    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(position, (name, points))| {
            Dataset::default()
                .name(name.clone())
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(theme::series_color(position)))
                .data(points)
        })
        .collect();

    let x_labels = x_axis_labels(table.is_temporal(), x_min, x_max);
    let y_labels = [y_min, (y_min + y_max) / 2.0, y_max].map(|value| Line::from(format_number(value)));

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(header_title(table.index_name()), theme::text_muted()))
                .style(theme::text_muted())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::text_muted())
                .bounds([y_min, y_max])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

/// Min and max of `values`, widened when they coincide so the axis has a
/// non-zero span.
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() / 20.0 };
        return (min - pad, max + pad);
    }
    (min, max)
}

fn x_axis_labels(temporal: bool, min: f64, max: f64) -> Vec<Line<'static>> {
    let span = max - min;
    [min, (min + max) / 2.0, max]
        .into_iter()
        .map(|position| {
            if temporal {
                Line::from(format_axis_label(position, span))
            } else {
                Line::from(format_number(position))
            }
        })
        .collect()
}
