//! HTTP-based `ActivityGenerator` for Ollama-compatible services.
//!
//! This module provides [`HttpActivityGenerator`], an implementation of the
//! [`ActivityGenerator`] trait that posts prompts to the `generate` endpoint
//! of a text-generation service.
//!
//! # Architecture
//!
//! The [`ActivityGenerator`] trait is synchronous so the planner stays
//! embeddable in synchronous contexts. This generator bridges the async HTTP
//! call to the sync interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use caravan_core::ActivityGenerator;
//! use caravan_data::HttpActivityGenerator;
//!
//! let generator = HttpActivityGenerator::new("http://localhost:11434/api")?;
//! let text = generator.generate("List three activities in Fes")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use caravan_core::{ActivityGenerator, GenerationError};
use reqwest::{Client, StatusCode};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::ollama::{GenerateRequest, GenerateResponse};

/// Error type for [`HttpActivityGenerator`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The configured base URL is not an absolute URL.
    BaseUrl(url::ParseError),
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BaseUrl(err) => write!(f, "invalid generation service URL: {err}"),
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BaseUrl(err) => Some(err),
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default user agent for generation requests.
pub const DEFAULT_USER_AGENT: &str = "caravan-generation/0.1";

/// Default base URL of a local Ollama install.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/api";

/// Default model tag.
pub const DEFAULT_MODEL: &str = "llama3.2:1b";

/// Small models on a laptop routinely take a minute to answer.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for [`HttpActivityGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpActivityGeneratorConfig {
    /// Base URL for the service API (e.g., `"http://localhost:11434/api"`).
    pub base_url: String,
    /// Model tag sent with every request.
    pub model: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpActivityGeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpActivityGeneratorConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the model tag.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based activity generator talking to an Ollama-compatible service.
///
/// The generator implements the synchronous [`ActivityGenerator`] trait by
/// internally blocking on asynchronous HTTP requests. It owns a Tokio
/// runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the generator uses its own stored runtime.
/// Inside a multi-threaded runtime (detected via [`Handle::try_current()`]
/// and [`RuntimeFlavor::MultiThread`]) it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it falls back to its own runtime, which blocks
/// the caller's executor for the duration of the request.
pub struct HttpActivityGenerator {
    client: Client,
    config: HttpActivityGeneratorConfig,
    endpoint: String,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpActivityGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpActivityGenerator")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpActivityGenerator {
    /// Create a new generator with the default model and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpActivityGeneratorConfig::new(base_url))
    }

    /// Create a new generator with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpActivityGeneratorConfig) -> Result<Self, ProviderBuildError> {
        Url::parse(&config.base_url).map_err(ProviderBuildError::BaseUrl)?;
        let endpoint = format!("{}/generate", config.base_url.trim_end_matches('/'));
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// Full URL of the `generate` endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpActivityGeneratorConfig {
        &self.config
    }

    async fn generate_async(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest::new(&self.config.model, prompt);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(service_error(status, &text));
        }

        let payload: GenerateResponse =
            response
                .json()
                .await
                .map_err(|err| GenerationError::MalformedResponse {
                    message: err.to_string(),
                })?;
        convert_response(payload)
    }

    /// Convert a reqwest error to a `GenerationError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            return GenerationError::Timeout {
                url: self.endpoint.clone(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return GenerationError::Service {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        GenerationError::Network {
            url: self.endpoint.clone(),
            message: error.to_string(),
        }
    }
}

/// Prefer the service's own `error` field over the raw body.
fn service_error(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<GenerateResponse>(body)
        .ok()
        .and_then(|payload| payload.error)
        .unwrap_or_else(|| body.trim().to_owned());
    GenerationError::Service {
        status: status.as_u16(),
        message,
    }
}

fn convert_response(payload: GenerateResponse) -> Result<String, GenerationError> {
    match (payload.response, payload.error) {
        (_, Some(message)) => Err(GenerationError::MalformedResponse { message }),
        (Some(text), None) => Ok(text),
        (None, None) => Err(GenerationError::MalformedResponse {
            message: "generation response missing `response` field".to_owned(),
        }),
    }
}

impl ActivityGenerator for HttpActivityGenerator {
    /// Post `prompt` and return the generated text.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded. Calls from a `current_thread` runtime fall back to the
    /// internal runtime and block the caller's executor.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }

        log::debug!(
            "requesting activities from {} with model {}",
            self.endpoint,
            self.config.model
        );
        let future = self.generate_async(prompt);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
