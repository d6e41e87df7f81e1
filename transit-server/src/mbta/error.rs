//! MBTA client error types.

use crate::domain::RouteType;

/// Errors that can occur when fetching from the MBTA API.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}{}", format_body(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The route filter matched nothing, or the route listing failed
    #[error("invalid route type(s) {}: {reason}", format_types(.route_types))]
    InvalidFilter {
        route_types: Vec<RouteType>,
        reason: String,
    },

    /// An expected relationship or included item is absent.
    ///
    /// The API drops `included` when it throttles a client, so this is
    /// usually transient.
    #[error("malformed response (missing {missing}); API throttling likely reached, please wait a minute and try again")]
    MalformedResponse { missing: String },

    /// The `included` section holds a resource type we never asked for
    #[error("unexpected included item type: {0}")]
    UnexpectedItemType(String),

    /// Rate limited by the API
    #[error("rate limited by MBTA API; please wait a minute and try again")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized: check MBTA_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Mock fixture could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

impl MbtaError {
    /// Whether waiting and trying again is likely to succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MbtaError::MalformedResponse { .. } | MbtaError::RateLimited
        )
    }

    pub(crate) fn missing(what: impl Into<String>) -> Self {
        MbtaError::MalformedResponse {
            missing: what.into(),
        }
    }
}

fn format_body(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

fn format_types(types: &[RouteType]) -> String {
    let codes: Vec<String> = types.iter().map(|t| t.code().to_string()).collect();
    format!("[{}]", codes.join(", "))
}
