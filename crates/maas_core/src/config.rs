//! Client configuration.
//!
//! [`MaasConfig`] is built once and handed to whatever needs it. Settings are
//! layered: built-in defaults, then an optional TOML file, then `MAAS_*`
//! environment variables, then command-line flags. Each layer is expressed
//! as a [`ConfigOverrides`] and applied with [`MaasConfig::apply`].

use derive_getters::Getters;
use maas_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Placeholder project used when none is configured.
pub const DEFAULT_PROJECT_ID: &str = "YOUR-PROJECT-ID";
/// Default Vertex AI region.
pub const DEFAULT_LOCATION: &str = "us-central1";
/// Default hosted model.
pub const DEFAULT_MODEL_ID: &str = "openai/gpt-oss-20b-maas";
/// Default generation cap.
pub const DEFAULT_MAX_TOKENS: u32 = 8192;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default nucleus-sampling threshold.
pub const DEFAULT_TOP_P: f32 = 1.0;

/// Immutable settings for one client instance.
///
/// Fields are private; read them through the generated getters. Use
/// [`MaasConfig::builder`] or [`MaasConfig::apply`] to produce a new value.
///
/// # Examples
///
/// ```
/// use maas_core::MaasConfig;
///
/// let config = MaasConfig::builder()
///     .project_id("my-project")
///     .max_tokens(256u32)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.location(), "us-central1");
/// assert_eq!(*config.max_tokens(), 256);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct MaasConfig {
    /// Google Cloud project hosting the endpoint
    #[builder(default = "DEFAULT_PROJECT_ID.to_string()")]
    project_id: String,
    /// Region of the endpoint, e.g. `us-central1`
    #[builder(default = "DEFAULT_LOCATION.to_string()")]
    location: String,
    /// Model identifier sent in each request
    #[builder(default = "DEFAULT_MODEL_ID.to_string()")]
    model_id: String,
    /// Maximum tokens to generate
    #[builder(default = "DEFAULT_MAX_TOKENS")]
    max_tokens: u32,
    /// Sampling temperature
    #[builder(default = "DEFAULT_TEMPERATURE")]
    temperature: f32,
    /// Nucleus-sampling threshold
    #[builder(default = "DEFAULT_TOP_P")]
    top_p: f32,
    /// Base URL override; replaces the derived Vertex AI endpoint
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
}

impl MaasConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("project_id", &self.project_id),
            ("location", &self.location),
            ("model_id", &self.model_id),
        ] {
            if let Some(v) = value
                && v.trim().is_empty()
            {
                return Err(format!("{name} must not be empty"));
            }
        }
        if let Some(0) = self.max_tokens {
            return Err("max_tokens must be a positive integer".to_string());
        }
        if let Some(t) = self.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return Err(format!("temperature must be within [0, 2], got {t}"));
        }
        if let Some(p) = self.top_p
            && !(p > 0.0 && p <= 1.0)
        {
            return Err(format!("top_p must be within (0, 1], got {p}"));
        }
        if let Some(Some(url)) = &self.endpoint
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(format!("endpoint must be an http(s) URL, got {url}"));
        }
        Ok(())
    }
}

impl Default for MaasConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            endpoint: None,
        }
    }
}

impl MaasConfig {
    /// Creates a builder seeded with the defaults.
    pub fn builder() -> MaasConfigBuilder {
        MaasConfigBuilder::default()
    }

    /// Creates a builder pre-filled with this configuration's values.
    pub fn to_builder(&self) -> MaasConfigBuilder {
        let mut builder = MaasConfigBuilder::default();
        builder
            .project_id(self.project_id.clone())
            .location(self.location.clone())
            .model_id(self.model_id.clone())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .top_p(self.top_p)
            .endpoint(self.endpoint.clone());
        builder
    }

    /// Returns a new configuration with every `Some` override applied.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the merged values fail validation.
    pub fn apply(&self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut builder = self.to_builder();
        if let Some(v) = &overrides.project_id {
            builder.project_id(v.clone());
        }
        if let Some(v) = &overrides.location {
            builder.location(v.clone());
        }
        if let Some(v) = &overrides.model_id {
            builder.model_id(v.clone());
        }
        if let Some(v) = overrides.max_tokens {
            builder.max_tokens(v);
        }
        if let Some(v) = overrides.temperature {
            builder.temperature(v);
        }
        if let Some(v) = overrides.top_p {
            builder.top_p(v);
        }
        if let Some(v) = &overrides.endpoint {
            builder.endpoint(Some(v.clone()));
        }
        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {e}")))
    }

    /// Loads defaults overlaid with `MAAS_*` environment variables.
    ///
    /// Reads `MAAS_PROJECT_ID`, `MAAS_LOCATION`, `MAAS_MODEL_ID`,
    /// `MAAS_MAX_TOKENS`, `MAAS_TEMPERATURE`, `MAAS_TOP_P` and
    /// `MAAS_ENDPOINT`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env()
    }

    /// Returns this configuration overlaid with `MAAS_*` environment variables.
    pub fn apply_env(&self) -> Result<Self, ConfigError> {
        self.apply(&ConfigOverrides::from_env()?)
    }

    /// Loads defaults overlaid with the settings of a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::default().apply(&ConfigOverrides::from_file(path)?)
    }

    /// Base URL of the OpenAI-compatible endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use maas_core::MaasConfig;
    ///
    /// let config = MaasConfig::builder().project_id("p1").build().unwrap();
    /// assert_eq!(
    ///     config.endpoint_url(),
    ///     "https://us-central1-aiplatform.googleapis.com/v1beta1/projects/p1/locations/us-central1/endpoints/openapi"
    /// );
    /// ```
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://{location}-aiplatform.googleapis.com/v1beta1/projects/{project}/locations/{location}/endpoints/openapi",
                location = self.location,
                project = self.project_id,
            ),
        }
    }

    /// Full URL of the chat completions route.
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint_url())
    }

    /// True while the project is still the shipped placeholder.
    pub fn has_placeholder_project(&self) -> bool {
        self.project_id == DEFAULT_PROJECT_ID
    }
}

/// One layer of optional settings.
///
/// Deserializes from TOML (every key optional, unknown keys rejected) and
/// can be read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub project_id: Option<String>,
    pub location: Option<String>,
    pub model_id: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub endpoint: Option<String>,
}

impl ConfigOverrides {
    /// Reads overrides from `MAAS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through an arbitrary key lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Ok(Self {
            project_id: get("MAAS_PROJECT_ID"),
            location: get("MAAS_LOCATION"),
            model_id: get("MAAS_MODEL_ID"),
            max_tokens: parse_var("MAAS_MAX_TOKENS", get("MAAS_MAX_TOKENS"))?,
            temperature: parse_var("MAAS_TEMPERATURE", get("MAAS_TEMPERATURE"))?,
            top_p: parse_var("MAAS_TOP_P", get("MAAS_TOP_P"))?,
            endpoint: get("MAAS_ENDPOINT"),
        })
    }

    /// Reads overrides from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading configuration file");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::new(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Combines two layers; values set in `higher` win.
    pub fn merge(self, higher: ConfigOverrides) -> Self {
        Self {
            project_id: higher.project_id.or(self.project_id),
            location: higher.location.or(self.location),
            model_id: higher.model_id.or(self.model_id),
            max_tokens: higher.max_tokens.or(self.max_tokens),
            temperature: higher.temperature.or(self.temperature),
            top_p: higher.top_p.or(self.top_p),
            endpoint: higher.endpoint.or(self.endpoint),
        }
    }
}

fn parse_var<T>(key: &str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|v| {
        v.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::new(format!("{key}={v:?} is not valid: {e}")))
    })
    .transpose()
}
