//! # Hashdash Types
//!
//! Shared data model for the Hashrate Index dashboard. Every other crate in
//! the workspace speaks in these types:
//!
//! - [`Operation`] and [`ParameterAxis`] describe what the catalog offers.
//! - [`Selection`] is the immutable value handed to one pipeline run.
//! - [`RawRecord`] and [`Scalar`] carry normalized API output.
//! - [`Table`] is the time-indexed, column-oriented result.
//! - [`PresentationMode`] and [`View`] tell the renderer what to draw.
//! - [`DashboardError`] enumerates every way a fetch can fail.

pub mod catalog;
pub mod error;
pub mod presentation;
pub mod record;
pub mod table;

pub use catalog::{
    AxisChoice, CURRENCY_AXIS, INTERVAL_AXIS, IndexKind, Operation, ParameterAxis, ParseResolverIdError, ResolverId, SelectedArgument,
    Selection,
};
pub use error::{DashboardError, TransportErrorKind};
pub use presentation::{PresentationMode, View};
pub use record::{RawRecord, Scalar};
pub use table::{IndexValue, Table};
