//! `GET /search` relay handler.

use std::time::Instant;

use axum::{
    extract::{RawQuery, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;

use crate::http::request::request_id;
use crate::http::response::RelayError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Query parameters accepted by `/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    /// Parse a raw query string, keeping the first `q` value.
    pub fn from_query(raw: Option<&str>) -> Self {
        let q = raw.and_then(|raw| {
            url::form_urlencoded::parse(raw.as_bytes())
                .find(|(key, _)| key == "q")
                .map(|(_, value)| value.into_owned())
        });
        Self { q }
    }

    /// The query, if present and non-empty.
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

/// Forward a title search to the upstream API.
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> Result<Json<Value>, RelayError> {
    let start_time = Instant::now();
    let request_id = request_id(&headers);
    let params = SearchParams::from_query(raw.as_deref());

    let result = relay(&state, &params).await;

    match &result {
        Ok(_) => {
            tracing::debug!(request_id = %request_id, "Search relayed");
            metrics::record_search("ok", 200, start_time);
        }
        Err(err) => {
            log_failure(request_id, err);
            metrics::record_search(err.kind(), err.status_code().as_u16(), start_time);
        }
    }

    result.map(Json)
}

async fn relay(state: &AppState, params: &SearchParams) -> Result<Value, RelayError> {
    let query = params.query().ok_or(RelayError::MissingQuery)?;

    if !state.upstream.is_configured() {
        return Err(RelayError::NotConfigured);
    }

    state.upstream.search(query).await
}

fn log_failure(request_id: &str, err: &RelayError) {
    match err {
        RelayError::MissingQuery => {
            tracing::debug!(request_id = %request_id, "Rejected search without query");
        }
        RelayError::NotConfigured => {
            tracing::error!(
                request_id = %request_id,
                "OPENALEX_BASE_URL is not configured"
            );
        }
        RelayError::UpstreamStatus { status, details } => {
            tracing::error!(
                request_id = %request_id,
                status = status,
                details = %details,
                "Upstream responded with an error status"
            );
        }
        RelayError::Unreachable(reason) => {
            tracing::error!(
                request_id = %request_id,
                error = %reason,
                "No response received from upstream"
            );
        }
        RelayError::Internal(reason) => {
            tracing::error!(
                request_id = %request_id,
                error = %reason,
                "Error setting up upstream request"
            );
        }
    }
}
