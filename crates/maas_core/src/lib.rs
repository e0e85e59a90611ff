//! Core data types for the maas hosted-model client.
//!
//! This crate holds the immutable client configuration, the chat
//! completion wire format and the tracing bootstrap shared by the binaries.

mod config;
mod observability;
mod request;
mod response;
mod role;

pub use config::{
    ConfigOverrides, DEFAULT_LOCATION, DEFAULT_MAX_TOKENS, DEFAULT_MODEL_ID, DEFAULT_PROJECT_ID,
    DEFAULT_TEMPERATURE, DEFAULT_TOP_P, MaasConfig, MaasConfigBuilder, MaasConfigBuilderError,
};
pub use observability::{LogFormat, init_tracing};
pub use request::{ChatMessage, ChatRequest, ChatRequestBuilder, ContentPart};
pub use response::{ChatCompletion, Choice, ResponseMessage, Usage};
pub use role::Role;
