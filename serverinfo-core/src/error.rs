//! Error types for the fetch and render boundaries
//!
//! Neither error ever leaves a poller: fetch errors become "no snapshot this
//! tick" and shape errors abort one render pass. They are typed so that the
//! boundary can log something useful.

use thiserror::Error;

/// Failure while turning an HTTP response into a snapshot
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed JSON from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {url} is not a JSON object")]
    NotAnObject { url: String },
}

/// A field the view updater needs is missing or has the wrong type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("missing field `{0}`")]
    Missing(String),

    #[error("field `{key}` is not {expected}")]
    WrongType { key: String, expected: &'static str },

    #[error("field `{key}` has unparseable value {value:?}")]
    InvalidNumber { key: String, value: String },
}

impl ShapeError {
    pub(crate) fn wrong_type(key: &str, expected: &'static str) -> Self {
        ShapeError::WrongType {
            key: key.to_string(),
            expected,
        }
    }
}
