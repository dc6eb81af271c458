//! Error types for the HTTP boundary and configuration loading.
//!
//! ERROR HANDLING
//! ==============
//! These errors stop at the session coordinator. `SessionLoader` folds every
//! one of them into "not authenticated", and the route guard never sees them.
//! Only ordinary API callers receive `ApiError` values, after the 401
//! interceptor has run its side effect.

/// Failure to obtain any HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out after {0} ms")]
    Timeout(u64),
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure of a request issued through [`crate::net::api::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("session expired or invalid")]
    Unauthorized,
    #[error("unexpected status: {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status carried by this error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status(status) => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
