//! Runtime configuration
//!
//! A [`Config`] is built once at start-up, validated eagerly, and handed to the
//! components that talk to the completion service. A missing API key is a
//! [`Error::Config`] before any model is loaded or any request is sent.
//!
//! # Usage
//!
//! ```ignore
//! use nanguide_lib::config::Config;
//!
//! // From GROQ_API_KEY (+ optional GROQ_MODEL / GROQ_BASE_URL)
//! let config = Config::from_env()?;
//!
//! // Or explicitly
//! let config = Config::new("gsk_...")?.with_temperature(0.2)?;
//! ```

use std::fmt;

use reqwest::Url;

use crate::{Error, Result};

/// Environment variable holding the completion-service API key
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the model identifier
pub const MODEL_ENV: &str = "GROQ_MODEL";
/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "GROQ_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_COLLECTION: &str = "documents";

/// Validated settings for retrieval and generation.
#[derive(Clone)]
pub struct Config {
    api_key: String,
    base_url: Url,
    model: String,
    temperature: f32,
    top_k: usize,
    collection: String,
}

impl Config {
    /// Create a configuration with default settings.
    ///
    /// Fails if `api_key` is empty or whitespace.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(Error::Config(format!("{API_KEY_ENV} is not set")));
        }

        Ok(Self {
            api_key,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
            collection: DEFAULT_COLLECTION.to_string(),
        })
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(API_KEY_ENV).unwrap_or_default())?;

        if let Some(model) = lookup(MODEL_ENV) {
            config = config.with_model(model)?;
        }
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(&base_url)?;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(Error::Config("model must not be empty".to_string()));
        }
        self.model = model;
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Sampling temperature, accepted in `0.0..=2.0`.
    pub fn with_temperature(mut self, temperature: f32) -> Result<Self> {
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            return Err(Error::Config(format!(
                "temperature must be between 0.0 and 2.0, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }

    /// Number of documents retrieved as context per query.
    pub fn with_top_k(mut self, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(Error::Config("top_k must be at least 1".to_string()));
        }
        self.top_k = top_k;
        Ok(self)
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Result<Self> {
        let collection = collection.into();
        if collection.trim().is_empty() {
            return Err(Error::Config("collection name must not be empty".to_string()));
        }
        self.collection = collection;
        Ok(self)
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    #[must_use]
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("top_k", &self.top_k)
            .field("collection", &self.collection)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("invalid base URL {raw:?}: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::Config(format!(
            "base URL must use http or https, got {scheme:?}"
        ))),
    }
}
