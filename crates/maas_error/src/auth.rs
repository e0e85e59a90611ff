//! Authentication error types.

/// Credential discovery or token refresh failure.
///
/// Ambient credentials that are absent, unreadable or rejected by the
/// remote service all surface as an `AuthError`.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Authentication Error: {} at line {} in {}", message, line, file)]
pub struct AuthError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new AuthError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use maas_error::AuthError;
    ///
    /// let err = AuthError::new("no application default credentials found");
    /// assert!(err.to_string().contains("Authentication Error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
