//! Left column: operation and axis menus, API key field, key hints.

use hashdash_types::ParameterAxis;
use hashdash_util::mask_secret;
use ratatui::{
    prelude::*,
    widgets::{Block, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Focus},
    theme,
};

pub(super) fn draw_operations(frame: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .catalog()
        .operations()
        .map(|operation| ListItem::new(operation.name.clone()))
        .collect();
    let focused = app.focus == Focus::Operations;
    draw_list(frame, area, " Select Function ", items, focused, &mut app.operation_state);
}

pub(super) fn draw_axis(frame: &mut Frame, area: Rect, title: &str, axis: &ParameterAxis, focused: bool, state: &mut ListState) {
    let items: Vec<ListItem> = axis.labels().map(|label| ListItem::new(label.to_string())).collect();
    draw_list(frame, area, title, items, focused, state);
}

fn draw_list(frame: &mut Frame, area: Rect, title: &str, items: Vec<ListItem>, focused: bool, state: &mut ListState) {
    let list = List::new(items)
        .block(
            Block::bordered()
                .title(Span::styled(title.to_string(), theme::title_style()))
                .border_style(theme::border_style(focused)),
        )
        .style(theme::text_style())
        .highlight_style(theme::list_highlight_style())
        .highlight_symbol("› ");
    frame.render_stateful_widget(list, area, state);
}

/// The key is masked unless the field is being edited.
pub(super) fn draw_api_key(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::ApiKey;
    let shown = if focused {
        app.api_key.clone()
    } else if app.api_key.is_empty() {
        String::new()
    } else {
        mask_secret(&app.api_key)
    };
    let line = if shown.is_empty() && !focused {
        Line::styled("press Tab to enter", theme::text_muted())
    } else {
        Line::styled(shown.clone(), theme::text_style())
    };
    let block = Block::bordered()
        .title(Span::styled(" API Key ", theme::title_style()))
        .border_style(theme::border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        let offset = (shown.width() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + offset, inner.y));
    }
}

pub(super) fn draw_hints(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.focus == Focus::ApiKey {
        "Enter get data · Esc leave field · Tab next"
    } else {
        "g/Enter get data · ↑↓ select · Tab focus · ←→ view · PgUp/PgDn scroll · q quit"
    };
    frame.render_widget(
        Paragraph::new(hints).style(theme::text_muted()).wrap(Wrap { trim: true }),
        area,
    );
}
