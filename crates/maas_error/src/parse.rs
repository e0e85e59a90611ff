//! Response parsing error types.

/// The response body did not match the chat completion schema.
///
/// The body is retained so callers can persist what the server sent.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Parse Error: {} at line {} in {}", message, line, file)]
pub struct ParseError {
    /// Deserializer message
    pub message: String,
    /// Raw response body
    pub body: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ParseError {
    /// Create a new ParseError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use maas_error::ParseError;
    ///
    /// let err = ParseError::new("missing field `choices`", "{}");
    /// assert_eq!(err.body, "{}");
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>, body: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            body: body.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
