use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// Request descriptor handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Full URL with the query string attached, for logs.
    pub fn display_url(&self) -> String {
        match Url::parse_with_params(&self.url, &self.query) {
            Ok(url) => url.to_string(),
            Err(_) => self.url.clone(),
        }
    }
}

/// Failure raised by a [`Transport`] implementation.
///
/// `Status` keeps the response status and raw body so the caller can decode
/// the chain's structured error; `Network` covers every no-response failure.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("{message}")]
    Status {
        message: String,
        status: u16,
        body: String,
    },
    #[error("{message}")]
    Network { message: String },
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } => None,
        }
    }
}

/// Generic request-issuing capability the API layer is built over.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(&self, config: &RequestConfig) -> Result<serde_json::Value, TransportError>;
}

/// Production transport over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, config: &RequestConfig) -> Result<serde_json::Value, TransportError> {
        let url = Url::parse_with_params(&config.url, &config.query)
            .map_err(|err| TransportError::network(format!("invalid url {}: {err}", config.url)))?;

        let builder = match config.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };

        let response = builder
            .send()
            .await
            .map_err(|err| TransportError::network(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::network(err.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                message: format!("Request failed with status code {}", status.as_u16()),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|err| TransportError::network(format!("invalid response body: {err}")))
    }
}
