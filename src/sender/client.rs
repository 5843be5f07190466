use reqwest::{Certificate, Client, ClientBuilder};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("CA bundle error ({path}): {message}")]
    CaBundle { path: PathBuf, message: String },
    #[error("Request timeout: {0}")]
    RequestTimeout(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Network error: {0}")]
    NetworkError(reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub endpoint: String,
    pub ca_bundle_path: PathBuf,
    pub verify_peer: bool,
    /// Carried for configuration compatibility; rustls bounds chain depth
    /// internally and exposes no per-client knob.
    pub verify_depth: u32,
    pub request_timeout: Duration,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.scalyr.com/addEvents".to_string(),
            ca_bundle_path: PathBuf::from("/etc/ssl/certs/ca-bundle.crt"),
            verify_peer: true,
            verify_depth: 5,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTPS client for the ingestion endpoint, built once per forwarder.
///
/// With `verify_peer` enabled the configured CA bundle is the exclusive root
/// store and an unreadable or invalid bundle fails construction. Disabling
/// verification is an explicit, opt-in insecure mode.
#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: Client,
    pub endpoint: Url,
    pub config: SenderConfig,
}

impl HttpClient {
    pub fn new(config: SenderConfig) -> Result<Self, DeliveryError> {
        let endpoint: Url = config.endpoint.parse().map_err(|e| {
            DeliveryError::InvalidConfiguration(format!(
                "Invalid endpoint URL '{}': {e}",
                config.endpoint
            ))
        })?;

        let mut builder = ClientBuilder::new()
            .use_rustls_tls()
            .timeout(config.request_timeout)
            .user_agent(concat!("scalyr-log-forwarder/", env!("CARGO_PKG_VERSION")));

        if config.verify_peer {
            builder = Self::with_ca_bundle(builder, &config.ca_bundle_path)?;
        } else {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(|e| {
            DeliveryError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    fn with_ca_bundle(
        mut builder: ClientBuilder,
        path: &Path,
    ) -> Result<ClientBuilder, DeliveryError> {
        let pem = std::fs::read(path).map_err(|e| DeliveryError::CaBundle {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let certs = Certificate::from_pem_bundle(&pem).map_err(|e| DeliveryError::CaBundle {
            path: path.to_path_buf(),
            message: format!("not a valid PEM bundle: {e}"),
        })?;

        if certs.is_empty() {
            return Err(DeliveryError::CaBundle {
                path: path.to_path_buf(),
                message: "bundle contains no certificates".to_string(),
            });
        }

        // The bundle replaces the built-in roots rather than extending them,
        // matching the original plugin's ca_file semantics.
        builder = builder.tls_built_in_root_certs(false);
        for cert in certs {
            builder = builder.add_root_certificate(cert);
        }
        Ok(builder)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DeliveryError::RequestTimeout(err.to_string())
        } else {
            DeliveryError::NetworkError(err)
        }
    }
}
