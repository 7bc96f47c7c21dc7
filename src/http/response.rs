//! Relay errors and their HTTP representation.
//!
//! # Responsibilities
//! - Classify every way a search can fail
//! - Map each class to a status code in one place
//! - Render a JSON body with an `error` field (and `details` for upstream errors)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const MISSING_QUERY_MESSAGE: &str = "Query parameter \"q\" is required.";
pub const NOT_CONFIGURED_MESSAGE: &str = "Server configuration error.";
pub const UPSTREAM_STATUS_MESSAGE: &str = "Failed to fetch data from OpenAlex API.";
pub const UNREACHABLE_MESSAGE: &str = "No response received from OpenAlex API.";
pub const INTERNAL_MESSAGE: &str = "Internal server error while contacting OpenAlex API.";

/// Every failure a search request can end in.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The `q` parameter was absent or empty.
    #[error("query parameter \"q\" is missing")]
    MissingQuery,

    /// No upstream base URL is configured.
    #[error("upstream base URL is not configured")]
    NotConfigured,

    /// The upstream answered with a non-success status.
    #[error("upstream responded with status {status}")]
    UpstreamStatus { status: u16, details: Value },

    /// The request was sent but no response came back.
    #[error("no response from upstream: {0}")]
    Unreachable(String),

    /// Anything else while building or dispatching the request.
    #[error("failed to contact upstream: {0}")]
    Internal(String),
}

impl RelayError {
    /// Status code returned to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingQuery => StatusCode::BAD_REQUEST,
            RelayError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::Unreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::MissingQuery => "missing_query",
            RelayError::NotConfigured => "not_configured",
            RelayError::UpstreamStatus { .. } => "upstream_status",
            RelayError::Unreachable(_) => "unreachable",
            RelayError::Internal(_) => "internal",
        }
    }

    /// Body sent to the caller.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            RelayError::MissingQuery => ErrorBody::new(MISSING_QUERY_MESSAGE),
            RelayError::NotConfigured => ErrorBody::new(NOT_CONFIGURED_MESSAGE),
            RelayError::UpstreamStatus { details, .. } => ErrorBody {
                error: UPSTREAM_STATUS_MESSAGE.to_string(),
                details: Some(details.clone()),
            },
            RelayError::Unreachable(_) => ErrorBody::new(UNREACHABLE_MESSAGE),
            RelayError::Internal(_) => ErrorBody::new(INTERNAL_MESSAGE),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

/// JSON error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}
