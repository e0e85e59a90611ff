//! HTTP error types.

/// Transport and API failures when talking to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpErrorKind {
    /// The request never produced a response (DNS, TLS, connection reset)
    #[display("Transport failure: {}", _0)]
    Transport(String),
    /// The endpoint answered with a non-success status
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
}

/// HTTP error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", kind, line, file)]
pub struct HttpError {
    /// The kind of error that occurred
    pub kind: HttpErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Create a new HttpError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use maas_error::{HttpError, HttpErrorKind};
    ///
    /// let err = HttpError::new(HttpErrorKind::Api {
    ///     status: 503,
    ///     message: "unavailable".to_string(),
    /// });
    /// assert_eq!(err.status(), Some(503));
    /// ```
    #[track_caller]
    pub fn new(kind: HttpErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a transport failure.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(HttpErrorKind::Transport(message.into()))
    }

    /// Status code of an API error, if the endpoint answered.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            HttpErrorKind::Api { status, .. } => Some(*status),
            HttpErrorKind::Transport(_) => None,
        }
    }
}
