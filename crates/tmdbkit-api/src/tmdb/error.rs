//! `TmdbError` - the single error type returned by TMDB requests.

use std::error::Error as StdError;

/// Where a request failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The per-call timeout elapsed before a response arrived.
    Timeout,
    /// DNS, connect, TLS, or body read failure.
    Transport,
    /// The server answered with a status other than 200.
    HttpStatus,
    /// A 200 response whose body did not match the expected shape.
    Decode,
    /// The client was closed before the request was issued.
    Closed,
}

/// TMDB API request failure.
///
/// Every request method returns exactly one of these per failed call.
/// Callers branch on [`TmdbError::kind`] instead of matching message text.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbError {
    kind: ErrorKind,
    status_code: Option<u16>,
    message: String,
    body: Option<String>,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl TmdbError {
    /// Request exceeded the configured timeout.
    pub(crate) fn timeout(path: &str, source: reqwest::Error) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            status_code: None,
            message: format!("request timed out: {path}"),
            body: None,
            source: Some(Box::new(source)),
        }
    }

    /// Transport-level failure other than a timeout.
    pub(crate) fn transport(path: &str, source: reqwest::Error) -> Self {
        Self {
            kind: ErrorKind::Transport,
            status_code: None,
            message: format!("request failed: {source} ({path})"),
            body: None,
            source: Some(Box::new(source)),
        }
    }

    /// Non-200 response. `message` is already resolved by the caller.
    pub(crate) fn http_status(status_code: u16, message: String, body: String) -> Self {
        Self {
            kind: ErrorKind::HttpStatus,
            status_code: Some(status_code),
            message,
            body: Some(body),
            source: None,
        }
    }

    /// 200 response that failed to decode.
    pub(crate) fn decode(path: &str, source: serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Decode,
            status_code: None,
            message: format!("failed to decode JSON response: {path}: {source}"),
            body: None,
            source: Some(Box::new(source)),
        }
    }

    /// Request attempted after [`super::TmdbClient::close`].
    pub(crate) fn closed(path: &str) -> Self {
        Self {
            kind: ErrorKind::Closed,
            status_code: None,
            message: format!("client is closed: {path}"),
            body: None,
            source: None,
        }
    }

    /// Failure origin.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status code, present only for [`ErrorKind::HttpStatus`].
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw response body, present only for [`ErrorKind::HttpStatus`].
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.kind == ErrorKind::Timeout
    }
}

/// Result alias for TMDB requests.
pub type Result<T> = std::result::Result<T, TmdbError>;
