//! Error taxonomy for the Voyaga API and extraction of human-readable
//! messages from backend error payloads.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Fallback message when an error payload carries nothing usable.
pub const GENERIC_ERROR: &str = "An error occurred";

/// Message shown when a non-ok response body is not valid JSON.
pub const SERVER_ERROR: &str = "Server error. Please try again.";

/// Message shown when a state-changing request cannot reach the backend.
pub const CONNECT_ERROR: &str = "Cannot connect to server. Is the backend running?";

#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend rejected the request; `message` was extracted from the
    /// error payload via [`extract_error`].
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// 401 with no stored refresh credential to recover with.
    #[error("Unauthorized - please sign in")]
    Unauthorized,

    /// Credential refresh failed; the session has been cleared.
    #[error("Session expired - please sign in again")]
    SessionExpired,

    /// Non-ok response whose body was empty or not JSON.
    #[error("Invalid response from server (status {0})")]
    InvalidResponse(StatusCode),

    /// Ok response whose payload did not match the expected shape.
    #[error("Unexpected response shape: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
}

/// Maximum length for response bodies quoted in logs
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Truncate a response body to avoid logging excessive data
pub fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LENGTH {
        body.to_string()
    } else {
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..MAX_ERROR_BODY_LENGTH],
            body.len()
        )
    }
}

// ============================================================================
// Error message extraction
// ============================================================================

/// Ordered extraction strategies, tried in sequence. Each returns the
/// message it found, or `None` to let the next strategy run.
const STRATEGIES: &[fn(&Value) -> Option<String>] = &[
    literal_string,
    detail_field,
    non_field_errors,
    first_key,
];

/// Extract a human-readable error message from a backend error payload.
///
/// The backend (Django REST Framework) reports errors in several shapes:
/// a plain string, `{"detail": "..."}`, `{"non_field_errors": ["..."]}`,
/// or a per-field map like `{"email": ["already exists"]}`. Strategies are
/// tried in that order, falling back to [`GENERIC_ERROR`].
pub fn extract_error(data: &Value) -> String {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(data))
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}

fn literal_string(data: &Value) -> Option<String> {
    data.as_str().map(str::to_string)
}

fn detail_field(data: &Value) -> Option<String> {
    data.get("detail").map(stringify)
}

fn non_field_errors(data: &Value) -> Option<String> {
    data.get("non_field_errors")?.as_array()?.first().map(stringify)
}

/// Per-field validation map: report the first field in document order.
/// List values are joined as "field: message".
fn first_key(data: &Value) -> Option<String> {
    let (key, value) = data.as_object()?.iter().next()?;
    match value.as_array() {
        Some(items) => {
            let msg = items.first().map(stringify).unwrap_or_default();
            Some(format!("{}: {}", key, msg))
        }
        None => Some(stringify(value)),
    }
}

/// Render a JSON value the way the UI would: strings without quotes,
/// everything else in its JSON form.
fn stringify(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
