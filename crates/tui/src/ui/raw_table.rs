use hashdash_types::Table;
use hashdash_util::{header_title, truncate_to_width};
use ratatui::{
    prelude::*,
    widgets::{Block, Cell, Row, Table as TableWidget},
};

use crate::theme;

const CELL_WIDTH: usize = 24;

/// Index plus every column, starting at row `offset`.
pub(super) fn draw_raw_table(frame: &mut Frame, area: Rect, table: &Table, offset: usize) {
    let header = Row::new(
        std::iter::once(table.index_name())
            .chain(table.column_names())
            .map(|name| Cell::from(header_title(name)))
            .collect::<Vec<_>>(),
    )
    .style(theme::title_style());

    // borders and header
    let visible = area.height.saturating_sub(3).max(1) as usize;
    let rows: Vec<Row> = table
        .rows()
        .skip(offset)
        .take(visible)
        .map(|(index, cells)| {
            let cells = std::iter::once(Cell::from(index.to_string()).style(theme::text_muted()))
                .chain(cells.into_iter().map(|cell| Cell::from(truncate_to_width(&cell.to_string(), CELL_WIDTH))));
            Row::new(cells.collect::<Vec<_>>()).style(theme::text_style())
        })
        .collect();

    let column_count = table.column_names().count();
    let widths = std::iter::once(Constraint::Length(20)).chain((0..column_count).map(|_| Constraint::Min(10)));
    let title = format!(
        " rows {}-{} of {} ",
        (offset + 1).min(table.row_count()),
        (offset + visible).min(table.row_count()),
        table.row_count()
    );
    let widget = TableWidget::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::bordered()
                .title(Span::styled(title, theme::text_muted()))
                .border_style(theme::border_style(false)),
        );
    frame.render_widget(widget, area);
}
