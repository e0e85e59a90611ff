//! Client for OpenAI-compatible models hosted on Vertex AI Model-as-a-Service.
//!
//! [`MaasClient`] authenticates with ambient Google Cloud credentials, sends
//! single-turn chat completion requests and parses the typed response.
//! [`CompletionClient`] is the seam the batch driver programs against.

mod client;
mod credentials;
mod driver;

pub use client::MaasClient;
pub use credentials::{
    ACCESS_TOKEN_ENV, ApplicationDefaultCredentials, CLOUD_PLATFORM_SCOPE, StaticToken,
    TokenSource, discover_credentials,
};
pub use driver::CompletionClient;
