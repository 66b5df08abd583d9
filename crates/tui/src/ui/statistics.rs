use hashdash_engine::{STATISTIC_LABELS, Statistics};
use hashdash_util::{format_number, header_title};
use ratatui::{
    prelude::*,
    widgets::{Block, Cell, Paragraph, Row, Table},
};

use crate::theme;

/// One row per statistic, one column per numeric data column.
pub(super) fn draw_statistics(frame: &mut Frame, area: Rect, statistics: Option<&Statistics>) {
    let block = Block::bordered().border_style(theme::border_style(false));
    let Some(statistics) = statistics.filter(|statistics| !statistics.is_empty()) else {
        frame.render_widget(
            Paragraph::new("No numeric columns to summarize").style(theme::text_muted()).block(block),
            area,
        );
        return;
    };

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(statistics.columns.iter().map(|summary| Cell::from(header_title(&summary.column))))
            .collect::<Vec<_>>(),
    )
    .style(theme::title_style());

    let rows: Vec<Row> = STATISTIC_LABELS
        .iter()
        .enumerate()
        .map(|(position, label)| {
            let cells = std::iter::once(Cell::from(*label).style(theme::text_muted())).chain(
                statistics.columns.iter().map(|summary| {
                    let text = summary.values()[position].map_or_else(|| "NaN".to_string(), format_number);
                    Cell::from(text)
                }),
            );
            Row::new(cells.collect::<Vec<_>>()).style(theme::text_style())
        })
        .collect();

    let widths = std::iter::once(Constraint::Length(6)).chain(statistics.columns.iter().map(|_| Constraint::Min(12)));
    frame.render_widget(Table::new(rows, widths).header(header).block(block).column_spacing(2), area);
}
