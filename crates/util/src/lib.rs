//! # Hashdash Utilities
//!
//! Helpers shared by the API client, the engine, and the renderers:
//!
//! - [`date_handling`]: timestamp parsing for index columns
//! - [`http`]: strict JSON parsing and status hints for HTTP responses
//! - [`text_processing`]: secret redaction and display formatting
//! - [`path_processing`]: `~` expansion for configured paths

pub mod date_handling;
pub mod http;
pub mod path_processing;
pub mod text_processing;

pub use date_handling::*;
pub use path_processing::*;
pub use text_processing::*;
