//! Error kinds surfaced by the fetch pipeline.
//!
//! Every kind halts the current fetch; no partial table is ever produced.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Sub-classification of transport failures. All of them surface as the
/// single [`DashboardError::Transport`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request could not be built (unknown method, wrong arity, bad URL).
    Request,
    /// Connection, TLS, or timeout failure.
    Network,
    /// The credential was rejected (HTTP 401/403).
    Authentication,
    /// The server answered with a non-success status or GraphQL errors.
    Remote,
    /// The response body was not valid JSON.
    MalformedJson,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Request => "request",
            Self::Network => "network",
            Self::Authentication => "authentication",
            Self::Remote => "remote",
            Self::MalformedJson => "malformed json",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Catalog lookup miss.
    #[error("{what} '{name}' is not available")]
    NotFound { what: &'static str, name: String },

    /// Network, authentication, or remote failure, with the cause attached.
    #[error("{kind} error: {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    /// The resolver could not normalize the raw response shape.
    #[error("malformed response for {resolver}: {reason}")]
    MalformedResponse { resolver: String, reason: String },

    /// The call succeeded but produced no records.
    #[error("no records returned")]
    EmptyResult,

    /// A record's field names differ from the first record's.
    #[error("record {row} has fields {found:?}, expected {expected:?}")]
    SchemaMismatch {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// An index value could not be parsed as a point in time.
    #[error("cannot parse '{value}' in index column '{column}' (row {row}) as a timestamp")]
    IndexParse { column: String, row: usize, value: String },
}

impl DashboardError {
    pub fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound { what, name: name.into() }
    }

    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn transport_with_source(kind: TransportErrorKind, message: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn malformed(resolver: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            resolver: resolver.to_string(),
            reason: reason.into(),
        }
    }

    /// Short, user-facing headline for the error kind, followed by detail.
    pub fn user_message(&self) -> String {
        let headline = match self {
            Self::NotFound { .. } => "Selection not available",
            Self::Transport {
                kind: TransportErrorKind::Authentication,
                ..
            } => "Authentication failed",
            Self::Transport { .. } => "Request failed",
            Self::MalformedResponse { .. } => "Unexpected response shape (API contract changed?)",
            Self::EmptyResult => "No data for this range",
            Self::SchemaMismatch { .. } => "Inconsistent records (API contract changed?)",
            Self::IndexParse { .. } => "Unreadable timestamps (API contract changed?)",
        };
        match self {
            Self::EmptyResult => headline.to_string(),
            other => format!("{headline}: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_keep_their_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let error = DashboardError::transport_with_source(TransportErrorKind::Network, "POST failed", cause);
        let source = error.source().expect("cause attached");
        assert_eq!(source.to_string(), "timed out");
        assert_eq!(error.to_string(), "network error: POST failed");
    }

    #[test]
    fn user_messages_distinguish_empty_from_contract_changes() {
        assert_eq!(DashboardError::EmptyResult.user_message(), "No data for this range");
        let mismatch = DashboardError::SchemaMismatch {
            row: 1,
            expected: vec!["t".into(), "a".into()],
            found: vec!["t".into(), "b".into()],
        };
        assert!(mismatch.user_message().starts_with("Inconsistent records"));
        let missing = DashboardError::not_found("operation", "Mempool");
        assert_eq!(missing.user_message(), "Selection not available: operation 'Mempool' is not available");
    }
}
