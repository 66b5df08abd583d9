//! # HTTP Utilities
//!
//! Response handling helpers for the GraphQL client: strict JSON parsing
//! with context, and friendly hints for common failure statuses.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Return a user-friendly error message for common HTTP status codes.
///
/// # Arguments
/// * `status_code` - The HTTP status code
///
/// # Returns
/// `Some(error_message)` for known status codes, `None` for others
///
/// # Example
/// ```rust
/// use hashdash_util::http::status_error_message;
///
/// let error_401 = status_error_message(401).unwrap();
/// assert!(error_401.contains("HASHRATE_INDEX_API_KEY"));
/// assert!(error_401.contains("Unauthorized"));
///
/// assert!(status_error_message(404).is_none());
/// ```
pub fn status_error_message(status_code: u16) -> Option<String> {
    match status_code {
        401 => Some("Unauthorized (401). Hint: enter a valid API key or set HASHRATE_INDEX_API_KEY=...".into()),
        403 => Some("Forbidden (403). Hint: the API key is valid but lacks access to this query".into()),
        429 => Some("Too Many Requests (429). Hint: wait before fetching again".into()),
        _ => None,
    }
}

/// True for statuses that mean the credential was rejected.
pub fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Parse HTTP response text into JSON, providing detailed errors on failure.
///
/// Any parse error is decorated with the originating HTTP status code and a
/// truncated preview of the response body. Use this when a JSON response is
/// required and failures must surface instead of degrading to `null`.
///
/// # Errors
/// Returns a [`JsonParseError`] describing the parse failure. The message
/// includes the serde error and up to 200 characters of the body with
/// whitespace collapsed.
pub fn parse_response_json_strict(text: &str, status: Option<StatusCode>) -> Result<Value, JsonParseError> {
    serde_json::from_str::<Value>(text).map_err(|error| {
        let status_note = status
            .map(|code| format!("status {code}"))
            .unwrap_or_else(|| "unknown status".to_string());
        let preview = truncate_response_preview(text, 200);

        JsonParseError::new(status_note, error, preview)
    })
}

fn truncate_response_preview(text: &str, limit: usize) -> String {
    if text.trim().is_empty() {
        return "<empty>".to_string();
    }

    let mut preview = String::new();
    for ch in text.chars() {
        if preview.len() >= limit {
            preview.push_str("...");
            break;
        }
        match ch {
            '\n' | '\r' | '\t' => {
                if !preview.ends_with(' ') {
                    preview.push(' ');
                }
            }
            _ => preview.push(ch),
        }
    }

    preview.trim().to_string()
}

/// Error returned when strict JSON parsing of an HTTP response fails.
#[derive(Debug, Error)]
#[error("failed to parse JSON response ({status_note}): {source}. body preview: {body_preview}")]
pub struct JsonParseError {
    status_note: String,
    #[source]
    source: serde_json::Error,
    body_preview: String,
}

impl JsonParseError {
    pub fn new(status_note: String, source: serde_json::Error, body_preview: String) -> Self {
        Self {
            status_note,
            source,
            body_preview,
        }
    }

    /// Access the truncated response preview captured during parsing.
    pub fn body_preview(&self) -> &str {
        &self.body_preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse_reports_status_and_preview() {
        let error = parse_response_json_strict("<html>\n\tBad Gateway</html>", Some(StatusCode::BAD_GATEWAY)).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("status 502"), "{message}");
        assert_eq!(error.body_preview(), "<html> Bad Gateway</html>");
    }

    #[test]
    fn strict_parse_marks_empty_bodies() {
        let error = parse_response_json_strict("  ", None).unwrap_err();
        assert_eq!(error.body_preview(), "<empty>");
        assert!(error.to_string().contains("unknown status"));
    }

    #[test]
    fn long_previews_are_truncated() {
        let body = "x".repeat(500);
        let error = parse_response_json_strict(&body, None).unwrap_err();
        assert!(error.body_preview().ends_with("..."));
        assert!(error.body_preview().len() <= 203);
    }

    #[test]
    fn auth_statuses_are_detected() {
        assert!(is_auth_failure(StatusCode::UNAUTHORIZED));
        assert!(is_auth_failure(StatusCode::FORBIDDEN));
        assert!(!is_auth_failure(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(status_error_message(403).unwrap().contains("Forbidden"));
    }
}
