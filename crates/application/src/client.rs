//! Scrappey client operations
//!
//! [`ScrappeyClient`] ties the config mapper, the transport port, and the
//! response normalizer together. Every public operation issues exactly
//! one outbound POST and suspends the caller until the reply arrives or
//! the timeout elapses.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use scrappey_domain::{
    Command, DomainError, Envelope, HttpMethod, NormalizedResponse, RequestConfig, SessionCreated,
    SessionList, SessionOptions, SessionStatus, VendorOptions, WebSocketOptions,
};

use crate::error::{ClientError, ClientResult};
use crate::mapper::map_config;
use crate::normalizer::normalize;
use crate::ports::{Transport, TransportRequest};

/// The vendor endpoint used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://publisher.scrappey.com/api/v1";

/// The transport timeout used when neither the client nor the call sets
/// one: five minutes, matching the vendor's slowest scrapes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Immutable client configuration.
///
/// Updates return a new value instead of mutating shared state, so
/// concurrent callers can never observe a half-applied change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default endpoint and timeout.
    ///
    /// An empty key is representable; it fails with
    /// [`ClientError::MissingApiKey`] at call time, before any I/O.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the configuration from the environment.
    ///
    /// `SCRAPPEY_API_KEY` is required; `SCRAPPEY_BASE_URL` and
    /// `SCRAPPEY_TIMEOUT_MS` override the defaults when set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingApiKey`] when the key variable is
    /// unset or empty.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = std::env::var("SCRAPPEY_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("SCRAPPEY_BASE_URL")
            && !base_url.is_empty()
        {
            config.base_url = base_url;
        }
        if let Ok(millis) = std::env::var("SCRAPPEY_TIMEOUT_MS")
            && let Ok(millis) = millis.parse::<u64>()
        {
            config.timeout = Duration::from_millis(millis);
        }
        Ok(config)
    }

    /// Returns a configuration with a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns a configuration with a different default timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The configured endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured default timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Client for the vendor API, generic over the transport.
///
/// Cheap to clone; clones share the transport and the immutable
/// configuration, so concurrent calls are fully independent.
#[derive(Debug)]
pub struct ScrappeyClient<T: Transport> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T: Transport> Clone for ScrappeyClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> ScrappeyClient<T> {
    /// Creates a client from a configuration and a transport.
    #[must_use]
    pub const fn new(config: ClientConfig, transport: Arc<T>) -> Self {
        Self { config, transport }
    }

    /// The client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Request operations
    // ------------------------------------------------------------------

    /// Scrapes with a GET request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get(&self, config: RequestConfig) -> ClientResult<NormalizedResponse> {
        self.execute_as(HttpMethod::Get, config).await
    }

    /// Scrapes with a POST request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn post(&self, config: RequestConfig) -> ClientResult<NormalizedResponse> {
        self.execute_as(HttpMethod::Post, config).await
    }

    /// Scrapes with a PUT request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn put(&self, config: RequestConfig) -> ClientResult<NormalizedResponse> {
        self.execute_as(HttpMethod::Put, config).await
    }

    /// Scrapes with a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn delete(&self, config: RequestConfig) -> ClientResult<NormalizedResponse> {
        self.execute_as(HttpMethod::Delete, config).await
    }

    /// Scrapes with a PATCH request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn patch(&self, config: RequestConfig) -> ClientResult<NormalizedResponse> {
        self.execute_as(HttpMethod::Patch, config).await
    }

    /// Scrapes with the method carried by the configuration.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingUrl`] / [`ClientError::MissingApiKey`] /
    ///   [`DomainError::UnsupportedMethod`] before any I/O;
    /// - [`ClientError::Transport`], [`ClientError::Http`],
    ///   [`ClientError::MalformedReply`] from the call itself;
    /// - [`ClientError::Api`] when the vendor reports failure; the
    ///   normalized response built from the failing envelope is attached.
    pub async fn execute(&self, config: RequestConfig) -> ClientResult<NormalizedResponse> {
        if config.url.trim().is_empty() {
            return Err(ClientError::MissingUrl);
        }
        let command = config.method.command()?;

        let mapped = map_config(&config)?;
        let timeout = config.timeout.unwrap_or(self.config.timeout);
        let value = self
            .dispatch(command, options_payload(&mapped.options)?, timeout)
            .await?;

        let envelope: Envelope = serde_json::from_value(value)
            .map_err(|e| ClientError::MalformedReply(e.to_string()))?;
        let response = normalize(&envelope, &config);

        if envelope.is_error() {
            return Err(ClientError::Api {
                message: envelope.error_message(),
                response: Some(Box::new(response)),
            });
        }
        Ok(response)
    }

    /// Sends a command with a raw option bag and returns the envelope.
    ///
    /// This is the low-level surface behind the typed operations; useful
    /// for vendor features without a dedicated method.
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute), except that an `Api` error carries
    /// no normalized response.
    pub async fn send(&self, command: Command, options: &VendorOptions) -> ClientResult<Envelope> {
        let timeout = options
            .timeout
            .map_or(self.config.timeout, Duration::from_millis);
        let value = self
            .dispatch(command, options_payload(options)?, timeout)
            .await?;

        let envelope: Envelope = serde_json::from_value(value)
            .map_err(|e| ClientError::MalformedReply(e.to_string()))?;
        if envelope.is_error() {
            return Err(ClientError::Api {
                message: envelope.error_message(),
                response: None,
            });
        }
        Ok(envelope)
    }

    // ------------------------------------------------------------------
    // Session operations
    // ------------------------------------------------------------------

    /// Creates a browser session the vendor keeps open between calls.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send), plus [`ClientError::MalformedReply`] when
    /// the reply lacks a session id.
    pub async fn create_session(&self, options: SessionOptions) -> ClientResult<SessionCreated> {
        let payload = object_payload(&options)?;
        let value = self
            .dispatch(Command::SessionCreate, payload, self.config.timeout)
            .await?;
        check_vendor_outcome(&value)?;
        serde_json::from_value(value).map_err(|e| ClientError::MalformedReply(e.to_string()))
    }

    /// Destroys a session.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn destroy_session(&self, session: &str) -> ClientResult<()> {
        let mut payload = Map::new();
        payload.insert("session".to_string(), Value::String(session.to_string()));
        let value = self
            .dispatch(Command::SessionDestroy, payload, self.config.timeout)
            .await?;
        check_vendor_outcome(&value)
    }

    /// Reports whether a session is still alive.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn is_session_active(&self, session: &str) -> ClientResult<bool> {
        let mut payload = Map::new();
        payload.insert("session".to_string(), Value::String(session.to_string()));
        let value = self
            .dispatch(Command::SessionActive, payload, self.config.timeout)
            .await?;
        check_vendor_outcome(&value)?;
        let status: SessionStatus = serde_json::from_value(value)
            .map_err(|e| ClientError::MalformedReply(e.to_string()))?;
        Ok(status.active)
    }

    /// Lists the sessions open for a user.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn list_sessions(&self, user_id: u64) -> ClientResult<SessionList> {
        let mut payload = Map::new();
        payload.insert("userId".to_string(), Value::from(user_id));
        let value = self
            .dispatch(Command::SessionList, payload, self.config.timeout)
            .await?;
        check_vendor_outcome(&value)?;
        serde_json::from_value(value).map_err(|e| ClientError::MalformedReply(e.to_string()))
    }

    /// Opens a WebSocket-backed browser connection; the envelope carries
    /// the vendor's connection data verbatim.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn create_websocket(&self, options: WebSocketOptions) -> ClientResult<Envelope> {
        let payload = object_payload(&options)?;
        let value = self
            .dispatch(Command::WebsocketCreate, payload, self.config.timeout)
            .await?;
        check_vendor_outcome(&value)?;
        serde_json::from_value(value).map_err(|e| ClientError::MalformedReply(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Send pipeline
    // ------------------------------------------------------------------

    async fn execute_as(
        &self,
        method: HttpMethod,
        mut config: RequestConfig,
    ) -> ClientResult<NormalizedResponse> {
        config.method = method;
        self.execute(config).await
    }

    /// One POST: validate the key, merge the command, run the transport,
    /// gate on the endpoint status, and parse the reply JSON.
    async fn dispatch(
        &self,
        command: Command,
        mut payload: Map<String, Value>,
        timeout: Duration,
    ) -> ClientResult<Value> {
        if self.config.api_key.trim().is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        payload.insert(
            "cmd".to_string(),
            Value::String(command.as_str().to_string()),
        );

        let mut endpoint = Url::parse(&self.config.base_url)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.config.base_url)))?;
        endpoint
            .query_pairs_mut()
            .append_pair("key", &self.config.api_key);

        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        debug!(command = %command, timeout_ms, "dispatching vendor call");

        let reply = self
            .transport
            .execute(TransportRequest {
                url: endpoint.into(),
                body: Value::Object(payload),
                timeout,
            })
            .await?;

        if !(200..300).contains(&reply.status) {
            return Err(ClientError::Http {
                status: reply.status,
                body: reply.body,
            });
        }

        serde_json::from_str(&reply.body).map_err(|e| ClientError::MalformedReply(e.to_string()))
    }
}

/// Rejects replies the vendor flagged as failed.
fn check_vendor_outcome(value: &Value) -> ClientResult<()> {
    if value.get("data").and_then(Value::as_str) == Some("error") {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        return Err(ClientError::Api {
            message,
            response: None,
        });
    }
    Ok(())
}

fn options_payload(options: &VendorOptions) -> ClientResult<Map<String, Value>> {
    Ok(options.to_object()?)
}

fn object_payload<S: serde::Serialize>(value: &S) -> ClientResult<Map<String, Value>> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(ClientError::MalformedReply(format!(
            "payload serialized to non-object: {other:?}"
        ))),
    }
}
