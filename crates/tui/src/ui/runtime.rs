//! Runtime: terminal lifecycle and the event loop.
//!
//! - A dedicated OS thread blocks on `crossterm::event::read()` and forwards
//!   events over a channel, so the async loop never polls the terminal.
//! - Key events go through [`App::update`]; the returned [`Effect`]s are
//!   carried out here.
//! - A fetch runs as a spawned task. Its result comes back as
//!   [`Msg::FetchCompleted`], so the interface keeps redrawing while the
//!   request is in flight and only one fetch is ever outstanding.
use std::{io::Stdout, sync::Arc, thread};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hashdash_api::{ClientOptions, HashrateIndexClient};
use hashdash_engine::{Dashboard, FetchOutcome};
use hashdash_registry::ParameterCatalog;
use hashdash_types::{DashboardError, Selection, TransportErrorKind};
use ratatui::{Terminal, prelude::*};
use tokio::{signal, sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::app::{App, Effect, Msg};

type FetchTask = JoinHandle<Result<FetchOutcome, DashboardError>>;

/// Spawn the input thread. The thread exits when the receiver is dropped
/// or the terminal stops delivering events.
fn spawn_input_thread() -> Result<mpsc::Receiver<Event>> {
    let (sender, receiver) = mpsc::channel(256);
    thread::Builder::new()
        .name("hashdash-input".into())
        .spawn(move || {
            loop {
                match event::read() {
                    Ok(event) => {
                        if sender.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        warn!(%error, "failed to read terminal event");
                        break;
                    }
                }
            }
        })
        .context("spawn input thread")?;
    Ok(receiver)
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// One fetch with a client built for the key entered at the time of the
/// request. Client construction failures surface as request errors.
async fn fetch(catalog: ParameterCatalog, options: ClientOptions, selection: Selection) -> Result<FetchOutcome, DashboardError> {
    let client = HashrateIndexClient::new(options)
        .map_err(|error| DashboardError::transport(TransportErrorKind::Request, format!("{error:#}")))?;
    let dashboard = Dashboard::new(catalog, Arc::new(client))?;
    dashboard.fetch(&selection).await
}

/// Awaits the in-flight fetch, or never resolves when there is none.
async fn join_fetch(task: &mut Option<FetchTask>) -> Result<FetchOutcome, DashboardError> {
    match task.as_mut() {
        Some(handle) => match handle.await {
            Ok(result) => result,
            Err(error) => Err(DashboardError::transport(
                TransportErrorKind::Request,
                format!("fetch task failed: {error}"),
            )),
        },
        None => std::future::pending().await,
    }
}

/// Entry point for the TUI: sets up the terminal, runs the event loop and
/// restores the terminal on exit, also when the loop fails.
pub async fn run_app(catalog: ParameterCatalog, options: ClientOptions) -> Result<()> {
    let mut input_receiver = spawn_input_thread()?;
    let mut app = App::new(catalog, options.api_key.clone());
    let mut terminal = setup_terminal()?;

    let result = event_loop(&mut terminal, &mut app, &mut input_receiver, &options).await;
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    input_receiver: &mut mpsc::Receiver<Event>,
    options: &ClientOptions,
) -> Result<()> {
    let mut in_flight: Option<FetchTask> = None;
    terminal.draw(|frame| super::draw(frame, app))?;

    loop {
        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    break;
                };
                match event {
                    Event::Key(key) => app.update(Msg::Key(key)),
                    // resize and focus changes only need a redraw
                    _ => Vec::new(),
                }
            }
            result = join_fetch(&mut in_flight) => {
                in_flight = None;
                app.update(Msg::FetchCompleted(Box::new(result)))
            }
            _ = signal::ctrl_c() => break,
        };

        for effect in effects {
            match effect {
                Effect::Quit => {
                    if let Some(task) = in_flight.take() {
                        task.abort();
                    }
                    return Ok(());
                }
                Effect::Fetch { selection, api_key } => {
                    info!(selection = %selection.describe(), "fetch requested");
                    let options = ClientOptions {
                        api_key,
                        ..options.clone()
                    };
                    let catalog = app.catalog().clone();
                    in_flight = Some(tokio::spawn(fetch(catalog, options, selection)));
                }
            }
        }

        terminal.draw(|frame| super::draw(frame, app))?;
    }

    if let Some(task) = in_flight.take() {
        task.abort();
    }
    Ok(())
}
