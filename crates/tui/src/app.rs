//! Application state and update logic.
//!
//! `App::update` consumes a [`Msg`] and returns the [`Effect`]s the runtime
//! must carry out. All state lives here; rendering only reads it (list
//! widgets also write their scroll offsets back).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use hashdash_engine::FetchOutcome;
use hashdash_registry::ParameterCatalog;
use hashdash_types::{CURRENCY_AXIS, DashboardError, INTERVAL_AXIS, Operation, ParameterAxis, Selection, View};
use ratatui::widgets::ListState;

/// Rows moved by one PgUp/PgDn press in the raw table.
const PAGE_ROWS: usize = 10;

/// Panel that receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Operations,
    Interval,
    Currency,
    ApiKey,
}

#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    FetchCompleted(Box<Result<FetchOutcome, DashboardError>>),
}

/// Side effects requested by [`App::update`].
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch { selection: Selection, api_key: String },
    Quit,
}

/// Status line content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Fetching(String),
    Loaded(String),
    Failed(String),
}

#[derive(Debug)]
pub struct App {
    catalog: ParameterCatalog,
    pub focus: Focus,
    pub operation_state: ListState,
    pub interval_state: ListState,
    pub currency_state: ListState,
    pub api_key: String,
    pub executing: bool,
    pub outcome: Option<FetchOutcome>,
    pub status: Status,
    pub view_index: usize,
    pub table_offset: usize,
}

impl App {
    /// `api_key` pre-fills the key field.
    pub fn new(catalog: ParameterCatalog, api_key: String) -> Self {
        Self {
            catalog,
            focus: Focus::Operations,
            operation_state: ListState::default().with_selected(Some(0)),
            interval_state: ListState::default().with_selected(Some(0)),
            currency_state: ListState::default().with_selected(Some(0)),
            api_key,
            executing: false,
            outcome: None,
            status: Status::Idle,
            view_index: 0,
            table_offset: 0,
        }
    }

    pub fn catalog(&self) -> &ParameterCatalog {
        &self.catalog
    }

    pub fn selected_operation(&self) -> Option<&Operation> {
        let index = self.operation_state.selected()?;
        self.catalog.operations().nth(index)
    }

    pub fn interval_axis(&self) -> Option<&ParameterAxis> {
        self.selected_operation()?.axis(INTERVAL_AXIS)
    }

    pub fn currency_axis(&self) -> Option<&ParameterAxis> {
        self.selected_operation()?.axis(CURRENCY_AXIS)
    }

    /// Views of the current outcome, in tab order.
    pub fn views(&self) -> &'static [View] {
        match &self.outcome {
            Some(outcome) => outcome.views(),
            None => &[],
        }
    }

    pub fn current_view(&self) -> Option<View> {
        self.views().get(self.view_index).copied()
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Effect> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::FetchCompleted(result) => {
                self.finish_fetch(*result);
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind == KeyEventKind::Release {
            return Vec::new();
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Effect::Quit];
        }
        match key.code {
            KeyCode::Tab => {
                self.cycle_focus(true);
                return Vec::new();
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                return Vec::new();
            }
            _ => {}
        }

        if self.focus == Focus::ApiKey {
            return self.handle_key_input(key);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Effect::Quit],
            KeyCode::Char('g') | KeyCode::Enter => return self.request_fetch().into_iter().collect(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Left => self.switch_view(-1),
            KeyCode::Right => self.switch_view(1),
            KeyCode::PageUp => self.table_offset = self.table_offset.saturating_sub(PAGE_ROWS),
            KeyCode::PageDown => self.scroll_table_down(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_key_input(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Enter => return self.request_fetch().into_iter().collect(),
            KeyCode::Esc => self.focus = Focus::Operations,
            KeyCode::Backspace => {
                self.api_key.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.api_key.push(ch),
            _ => {}
        }
        Vec::new()
    }

    /// Focusable panels for the current operation; axis lists only appear
    /// when the operation has that axis.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Operations];
        if self.interval_axis().is_some() {
            order.push(Focus::Interval);
        }
        if self.currency_axis().is_some() {
            order.push(Focus::Currency);
        }
        order.push(Focus::ApiKey);
        order
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = self.focus_order();
        let position = order.iter().position(|focus| *focus == self.focus).unwrap_or(0);
        let next = if forward {
            (position + 1) % order.len()
        } else {
            (position + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    fn move_selection(&mut self, delta: isize) {
        let len = match self.focus {
            Focus::Operations => self.catalog.len(),
            Focus::Interval => self.interval_axis().map_or(0, |axis| axis.choices.len()),
            Focus::Currency => self.currency_axis().map_or(0, |axis| axis.choices.len()),
            Focus::ApiKey => 0,
        };
        let state = match self.focus {
            Focus::Operations => &mut self.operation_state,
            Focus::Interval => &mut self.interval_state,
            Focus::Currency => &mut self.currency_state,
            Focus::ApiKey => return,
        };
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        let next = (current as isize + delta).clamp(0, len as isize - 1) as usize;
        state.select(Some(next));

        if self.focus == Focus::Operations && next != current {
            // axes differ between operations
            self.interval_state.select(Some(0));
            self.currency_state.select(Some(0));
        }
    }

    fn switch_view(&mut self, delta: isize) {
        let count = self.views().len();
        if count == 0 {
            return;
        }
        self.view_index = (self.view_index as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn scroll_table_down(&mut self) {
        let rows = self.outcome.as_ref().map_or(0, |outcome| outcome.table.row_count());
        self.table_offset = (self.table_offset + PAGE_ROWS).min(rows.saturating_sub(1));
    }

    /// The current selection as catalog labels.
    pub fn selected_labels(&self) -> Vec<(&str, &str)> {
        let mut labels = Vec::new();
        for (axis, state) in [
            (self.interval_axis(), &self.interval_state),
            (self.currency_axis(), &self.currency_state),
        ] {
            if let Some(axis) = axis
                && let Some(choice) = axis.choices.get(state.selected().unwrap_or(0))
            {
                labels.push((axis.name.as_str(), choice.label.as_str()));
            }
        }
        labels
    }

    fn request_fetch(&mut self) -> Option<Effect> {
        if self.executing {
            return None;
        }
        let operation = self.selected_operation()?.name.clone();
        let labels = self.selected_labels();
        match self.catalog.resolve_selection(&operation, &labels) {
            Ok(selection) => {
                self.executing = true;
                self.status = Status::Fetching(selection.describe());
                Some(Effect::Fetch {
                    selection,
                    api_key: self.api_key.trim().to_string(),
                })
            }
            Err(error) => {
                self.status = Status::Failed(error.user_message());
                None
            }
        }
    }

    fn finish_fetch(&mut self, result: Result<FetchOutcome, DashboardError>) {
        self.executing = false;
        match result {
            Ok(outcome) => {
                self.status = Status::Loaded(format!(
                    "{}: {} row(s)",
                    outcome.selection.describe(),
                    outcome.table.row_count()
                ));
                self.outcome = Some(outcome);
                self.view_index = 0;
                self.table_offset = 0;
            }
            // previous outcome stays on screen
            Err(error) => self.status = Status::Failed(error.user_message()),
        }
    }
}
