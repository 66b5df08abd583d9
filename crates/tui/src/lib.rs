//! # Hashdash TUI
//!
//! Terminal front end for the Hashrate Index dashboard, built on Ratatui.
//!
//! The left column holds the operation menu, the interval and currency
//! lists of the selected operation and the API key field. The right side
//! shows the views of the last fetch as tabs: line and area charts plus
//! statistics for timeseries, metric tiles for snapshots, and the raw table
//! for both.
//!
//! ## Architecture
//!
//! - [`app`]: state and key handling; `App::update` returns effects
//! - `ui`: pure rendering of `App`
//! - `ui::runtime`: terminal lifecycle, event loop and fetch tasks

pub mod app;
mod theme;
mod ui;

use anyhow::Result;
use hashdash_api::ClientOptions;
use hashdash_registry::ParameterCatalog;

/// Runs the dashboard until the user quits.
///
/// `options` supplies the endpoint, timeout and the initial API key; the key
/// can be edited in the interface and each fetch uses the key shown at the
/// time it is requested.
///
/// # Errors
///
/// Terminal setup or drawing failures. Fetch failures are shown in the
/// status line and never end the session.
pub async fn run(catalog: ParameterCatalog, options: ClientOptions) -> Result<()> {
    ui::runtime::run_app(catalog, options).await
}
