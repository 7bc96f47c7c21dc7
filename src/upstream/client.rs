//! Outbound client for the scholarly-works API.
//!
//! # Responsibilities
//! - Build the filtered `/works` search URL from the configured base
//! - Issue a single GET per search (no retries, client-default timeouts)
//! - Classify failures: upstream status, no response, anything else

use serde_json::Value;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::response::RelayError;

/// Client for the upstream API. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Option<String>,
    mailto: Option<String>,
}

impl UpstreamClient {
    /// Create a client from the upstream section of the configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("scholar-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            mailto: config.mailto.clone(),
        })
    }

    /// Whether a base URL is configured.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Build `<base>/works?filter=title.search:<encoded query>`.
    pub fn search_url(&self, query: &str) -> Result<Url, RelayError> {
        let base = self.base_url.as_deref().ok_or(RelayError::NotConfigured)?;

        let mut raw = format!(
            "{}/works?filter=title.search:{}",
            base.trim_end_matches('/'),
            urlencoding::encode(query)
        );
        if let Some(mailto) = &self.mailto {
            raw.push_str("&mailto=");
            raw.push_str(&urlencoding::encode(mailto));
        }

        Url::parse(&raw).map_err(|e| RelayError::Internal(format!("invalid upstream URL '{}': {}", raw, e)))
    }

    /// Run a title search and return the upstream JSON document untouched.
    pub async fn search(&self, query: &str) -> Result<Value, RelayError> {
        let url = self.search_url(query)?;

        tracing::info!(url = %url, "Forwarding search request");

        let response = self.http.get(url).send().await.map_err(classify_send_error)?;
        let status = response.status();

        // A body cut off mid-stream means no complete response arrived.
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Unreachable(e.to_string()))?;
        let body = decode_body(&bytes);

        if status.is_success() {
            Ok(body)
        } else {
            Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
                details: body,
            })
        }
    }
}

/// Map a transport error to the relay's error classes.
fn classify_send_error(err: reqwest::Error) -> RelayError {
    if err.is_builder() {
        RelayError::Internal(err.to_string())
    } else if err.is_connect() || err.is_timeout() || err.is_request() || err.is_redirect() {
        RelayError::Unreachable(err.to_string())
    } else {
        RelayError::Internal(err.to_string())
    }
}

/// JSON when possible, otherwise the raw text as a JSON string.
fn decode_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base_url: Option<&str>, mailto: Option<&str>) -> UpstreamClient {
        UpstreamClient::new(&UpstreamConfig {
            base_url: base_url.map(String::from),
            mailto: mailto.map(String::from),
        })
        .unwrap()
    }

    #[test]
    fn builds_filtered_search_url() {
        let url = client(Some("https://api.openalex.org"), None)
            .search_url("machine learning")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.openalex.org/works?filter=title.search:machine%20learning"
        );
    }

    #[test]
    fn keeps_base_path_and_trims_trailing_slash() {
        let url = client(Some("http://localhost:8080/v1/"), None)
            .search_url("graphs")
            .unwrap();
        assert_eq!(url.path(), "/v1/works");
        assert_eq!(url.query(), Some("filter=title.search:graphs"));
    }

    #[test]
    fn encodes_reserved_characters() {
        let url = client(Some("https://api.openalex.org"), None)
            .search_url("a&b=c/d?")
            .unwrap();
        assert_eq!(url.query(), Some("filter=title.search:a%26b%3Dc%2Fd%3F"));
    }

    #[test]
    fn appends_mailto_when_configured() {
        let url = client(Some("https://api.openalex.org"), Some("ops@example.org"))
            .search_url("rust")
            .unwrap();
        assert_eq!(
            url.query(),
            Some("filter=title.search:rust&mailto=ops%40example.org")
        );
    }

    #[test]
    fn missing_base_url_is_not_configured() {
        let client = client(None, None);
        assert!(!client.is_configured());
        assert!(matches!(client.search_url("x"), Err(RelayError::NotConfigured)));
    }

    #[test]
    fn unparsable_base_url_is_internal() {
        let err = client(Some("not a url"), None).search_url("x").unwrap_err();
        assert!(matches!(err, RelayError::Internal(_)));
    }

    #[test]
    fn decodes_json_or_falls_back_to_text() {
        assert_eq!(decode_body(br#"{"meta":{"count":0}}"#), json!({ "meta": { "count": 0 } }));
        assert_eq!(decode_body(b"Bad Gateway"), json!("Bad Gateway"));
        assert_eq!(decode_body(b""), json!(""));
    }

    #[tokio::test]
    async fn search_without_base_url_makes_no_call() {
        let err = client(None, None).search("anything").await.unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured));
    }
}
