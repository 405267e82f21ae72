//! Blocking HTTP helpers shared by the registry-backed ecosystems.
//!
//! Requests carry the crate's `User-Agent` and have no timeout or retry: a
//! registry outage fails the run.

use crate::defaults;
use log::debug;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Upper bound on a registry response body. Package metadata for very old
/// packages runs to several megabytes.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// A failed registry request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum HttpError {
    /// The server answered 404
    #[error("{url} returned 404 Not Found")]
    NotFound { url: String },
    /// Any other transport, status or decoding failure
    #[error("{url}: {message}")]
    Failed { url: String, message: String },
}

/// Append percent-encoded path segments to `base`.
pub(crate) fn build_url(base: &str, segments: &[&str]) -> Result<Url, HttpError> {
    let failed = |message: String| HttpError::Failed {
        url: base.to_string(),
        message,
    };

    let mut url = Url::parse(base).map_err(|e| failed(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| failed("URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET `url` and return the body as text.
pub(crate) fn get_text(url: &str) -> Result<String, HttpError> {
    debug!("GET {}", url);

    let user_agent = defaults::user_agent();
    let mut response = ureq::get(url)
        .header("User-Agent", user_agent.as_str())
        .call()
        .map_err(|e| match e {
            ureq::Error::StatusCode(404) => HttpError::NotFound {
                url: url.to_string(),
            },
            other => HttpError::Failed {
                url: url.to_string(),
                message: format!("HTTP request failed: {}", other),
            },
        })?;

    response
        .body_mut()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_to_string()
        .map_err(|e| HttpError::Failed {
            url: url.to_string(),
            message: format!("failed to read response: {}", e),
        })
}

/// GET `url` and decode the body as JSON.
pub(crate) fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, HttpError> {
    let body = get_text(url)?;
    serde_json::from_str(&body).map_err(|e| HttpError::Failed {
        url: url.to_string(),
        message: format!("invalid JSON: {}", e),
    })
}
