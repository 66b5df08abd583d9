//! Rendering. Everything here reads [`App`]; only list states are written
//! back by the stateful list widgets.

mod charts;
mod layout;
mod menu;
mod metrics;
mod raw_table;
pub mod runtime;
mod statistics;

use hashdash_types::View;
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Tabs, Wrap},
};

use crate::{
    app::{App, Focus, Status},
    theme,
};
use charts::ChartKind;
use layout::MainLayout;

const TITLE: &str = "Hashrate Index Dashboard";
const DESCRIPTION: [&str; 2] = [
    "A terminal dashboard that displays the Hashrate Index of the network.",
    "The Hashrate Index is a measure of the difficulty of the network. It is calculated by taking the average of the difficulty of the last 10 blocks.",
];

pub fn draw(frame: &mut Frame, app: &mut App) {
    let layout = MainLayout::compute(frame.area(), app);

    draw_header(frame, layout.header);
    menu::draw_operations(frame, layout.operations, app);
    if let (Some(area), Some(axis)) = (layout.interval, app.interval_axis().cloned()) {
        let focused = app.focus == Focus::Interval;
        menu::draw_axis(frame, area, " Interval ", &axis, focused, &mut app.interval_state);
    }
    if let (Some(area), Some(axis)) = (layout.currency, app.currency_axis().cloned()) {
        let focused = app.focus == Focus::Currency;
        menu::draw_axis(frame, area, " Currency ", &axis, focused, &mut app.currency_state);
    }
    menu::draw_api_key(frame, layout.api_key, app);
    menu::draw_hints(frame, layout.hints, app);
    draw_views(frame, layout.views, app);
    draw_status(frame, layout.status, app);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::styled(TITLE, theme::heading_style()),
        Line::styled(DESCRIPTION[0], theme::text_style()),
        Line::styled(DESCRIPTION[1], theme::text_muted()),
    ];
    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().border_style(theme::border_style(false)));
    frame.render_widget(header, area);
}

fn draw_views(frame: &mut Frame, area: Rect, app: &App) {
    let Some(outcome) = app.outcome.as_ref() else {
        let hint = Paragraph::new("Select a function and press Enter to get data.")
            .style(theme::text_muted())
            .block(Block::bordered().border_style(theme::border_style(false)));
        frame.render_widget(hint, area);
        return;
    };

    let [tabs_area, content] = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
    let tabs = Tabs::new(app.views().iter().map(|view| view.title()))
        .select(app.view_index)
        .style(theme::text_muted())
        .highlight_style(theme::title_style())
        .divider("|");
    frame.render_widget(tabs, tabs_area);

    match app.current_view() {
        Some(View::LineChart) => charts::draw_chart(frame, content, &outcome.table, ChartKind::Line),
        Some(View::AreaChart) => charts::draw_chart(frame, content, &outcome.table, ChartKind::Area),
        Some(View::Statistics) => statistics::draw_statistics(frame, content, outcome.statistics.as_ref()),
        Some(View::MetricTiles) => metrics::draw_metrics(frame, content, &outcome.table),
        Some(View::RawTable) => raw_table::draw_raw_table(frame, content, &outcome.table, app.table_offset),
        None => {}
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Status::Idle => Line::styled("Ready", theme::text_muted()),
        Status::Fetching(what) => Line::styled(format!("Fetching {what}…"), theme::text_style()),
        Status::Loaded(what) => Line::styled(what.clone(), theme::ok_style()),
        Status::Failed(message) => Line::styled(message.clone(), theme::error_style()),
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use hashdash_registry::ParameterCatalog;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn initial_screen_shows_title_and_menu() {
        let mut app = App::new(ParameterCatalog::embedded().unwrap(), String::new());
        let screen = rendered(&mut app);
        assert!(screen.contains(TITLE));
        assert!(screen.contains("Select Function"));
        assert!(screen.contains("Bitcoin Overview"));
        assert!(screen.contains("press Tab to enter"));
    }

    #[test]
    fn failed_status_is_rendered() {
        let mut app = App::new(ParameterCatalog::embedded().unwrap(), String::new());
        app.status = Status::Failed("Network error: offline".into());
        assert!(rendered(&mut app).contains("Network error: offline"));
    }
}
