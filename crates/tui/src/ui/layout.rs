//! Screen layout: header, menu column, view panel and status line.
use ratatui::prelude::*;

use crate::app::App;

/// Width of the left menu column.
const MENU_WIDTH: u16 = 34;
/// Header: title plus two description lines, the second may wrap.
const HEADER_HEIGHT: u16 = 6;

pub(super) struct MainLayout {
    pub header: Rect,
    pub operations: Rect,
    pub interval: Option<Rect>,
    pub currency: Option<Rect>,
    pub api_key: Rect,
    pub hints: Rect,
    pub views: Rect,
    pub status: Rect,
}

impl MainLayout {
    /// Splits `size` for the current operation. Axis lists take space only
    /// when the operation has that axis.
    pub fn compute(size: Rect, app: &App) -> Self {
        let [header, body, status] =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(8), Constraint::Length(1)]).areas(size);
        let [menu, views] = Layout::horizontal([Constraint::Length(MENU_WIDTH), Constraint::Min(20)]).areas(body);

        let list_height = |len: usize| Constraint::Length(len as u16 + 2);
        let mut constraints = vec![list_height(app.catalog().len())];
        let interval_len = app.interval_axis().map(|axis| axis.choices.len());
        let currency_len = app.currency_axis().map(|axis| axis.choices.len());
        constraints.extend(interval_len.map(list_height));
        constraints.extend(currency_len.map(list_height));
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Min(0));
        let areas = Layout::vertical(constraints).split(menu);

        let mut next = 1;
        let mut take_if = |present: bool| {
            present.then(|| {
                let area = areas[next];
                next += 1;
                area
            })
        };
        let interval = take_if(interval_len.is_some());
        let currency = take_if(currency_len.is_some());

        Self {
            header,
            operations: areas[0],
            interval,
            currency,
            api_key: areas[areas.len() - 2],
            hints: areas[areas.len() - 1],
            views,
            status,
        }
    }
}
