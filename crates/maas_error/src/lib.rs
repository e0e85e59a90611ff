//! Error types for the maas hosted-model client.
//!
//! Every concern gets its own error struct that records where it was
//! raised. [`MaasError`] unifies them for callers that only need `?`.

mod auth;
mod batch;
mod config;
mod http;
mod io;
mod parse;

pub use auth::AuthError;
pub use batch::{BatchError, BatchErrorKind};
pub use config::ConfigError;
pub use http::{HttpError, HttpErrorKind};
pub use io::IoError;
pub use parse::ParseError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum MaasErrorKind {
    /// Configuration error
    #[display("{}", _0)]
    Config(ConfigError),
    /// Credential error
    #[display("{}", _0)]
    Auth(AuthError),
    /// Transport or API error
    #[display("{}", _0)]
    Http(HttpError),
    /// Response schema mismatch
    #[display("{}", _0)]
    Parse(ParseError),
    /// Filesystem error
    #[display("{}", _0)]
    Io(IoError),
    /// Batch-level error
    #[display("{}", _0)]
    Batch(BatchError),
}

/// maas error with kind discrimination.
#[derive(Debug, derive_more::Display)]
#[display("maas Error: {}", _0)]
pub struct MaasError(Box<MaasErrorKind>);

impl MaasError {
    /// Create a new error from a kind.
    pub fn new(kind: MaasErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MaasErrorKind {
        &self.0
    }

    /// True for credential failures.
    pub fn is_auth(&self) -> bool {
        matches!(self.kind(), MaasErrorKind::Auth(_))
    }

    /// True when the endpoint answered but the body was not a completion.
    pub fn is_parse(&self) -> bool {
        matches!(self.kind(), MaasErrorKind::Parse(_))
    }
}

impl std::error::Error for MaasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            MaasErrorKind::Config(e) => Some(e),
            MaasErrorKind::Auth(e) => Some(e),
            MaasErrorKind::Http(e) => Some(e),
            MaasErrorKind::Parse(e) => Some(e),
            MaasErrorKind::Io(e) => Some(e),
            MaasErrorKind::Batch(e) => Some(e),
        }
    }
}

// Generic From implementation for any type that converts to MaasErrorKind
impl<T> From<T> for MaasError
where
    T: Into<MaasErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for maas operations.
pub type MaasResult<T> = std::result::Result<T, MaasError>;
