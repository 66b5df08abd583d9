//! # Hashdash Engine
//!
//! The fetch pipeline of the dashboard. One user action becomes one
//! [`Dashboard::fetch`] call that runs, in order:
//!
//! - **Transport**: the remote call for the selected operation
//! - **`resolve`**: response envelope to flat, homogeneous records
//! - **`table_builder`**: records to a time-indexed, column-oriented table
//! - **`presentation`**: snapshot tiles or timeseries charts
//! - **`stats`**: descriptive statistics for timeseries
//!
//! Every stage after the transport is a pure function, so fetches share no
//! mutable state.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use hashdash_api::{ClientOptions, HashrateIndexClient};
//! use hashdash_engine::Dashboard;
//! use hashdash_registry::ParameterCatalog;
//!
//! let client = HashrateIndexClient::new(ClientOptions::from_env(None, None))?;
//! let dashboard = Dashboard::new(ParameterCatalog::embedded()?, Arc::new(client))?;
//! let selection = dashboard.catalog().resolve_selection("Network Hashrate", &[("interval", "7 Days")])?;
//! let outcome = dashboard.fetch(&selection).await?;
//! println!("{} rows", outcome.table.row_count());
//! ```

pub mod pipeline;
pub mod presentation;
pub mod resolve;
pub mod stats;
pub mod table_builder;

pub use pipeline::{Dashboard, FetchOutcome};
pub use presentation::choose_presentation;
pub use resolve::{ResponseShape, envelope_path, resolve, response_shape};
pub use stats::{ColumnSummary, STATISTIC_LABELS, Statistics, describe};
pub use table_builder::build_table;
