use hashdash_types::{Scalar, Table};
use hashdash_util::{format_number, header_title};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Wrap},
};

use crate::theme;

const TILES_PER_ROW: usize = 3;
const TILE_HEIGHT: u16 = 4;

/// "Bitcoin Metrics": one tile per data column showing its sole value.
pub(super) fn draw_metrics(frame: &mut Frame, area: Rect, table: &Table) {
    let block = Block::bordered()
        .title(Span::styled(" Bitcoin Metrics ", theme::heading_style()))
        .border_style(theme::border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tiles = table.first_row();
    if tiles.is_empty() {
        frame.render_widget(Paragraph::new("No metrics").style(theme::text_muted()), inner);
        return;
    }

    let row_count = tiles.len().div_ceil(TILES_PER_ROW);
    let rows = Layout::vertical((0..row_count).map(|_| Constraint::Length(TILE_HEIGHT))).split(inner);
    for (chunk, row_area) in tiles.chunks(TILES_PER_ROW).zip(rows.iter()) {
        let cells = Layout::horizontal((0..TILES_PER_ROW).map(|_| Constraint::Ratio(1, TILES_PER_ROW as u32))).split(*row_area);
        for ((name, value), cell) in chunk.iter().zip(cells.iter()) {
            let tile = Paragraph::new(Line::styled(metric_text(value), theme::heading_style()))
                .wrap(Wrap { trim: true })
                .block(
                    Block::bordered()
                        .title(Span::styled(header_title(name), theme::text_muted()))
                        .border_style(theme::border_style(false)),
                );
            frame.render_widget(tile, *cell);
        }
    }
}

pub(super) fn metric_text(value: &Scalar) -> String {
    match value.as_f64() {
        Some(number) => format_number(number),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_humanized_and_text_is_kept() {
        assert_eq!(metric_text(&Scalar::from(70e12)), "70.00 T");
        assert_eq!(metric_text(&Scalar::from("2028-04-15")), "2028-04-15");
        assert_eq!(metric_text(&Scalar::Null), "");
    }
}
