use super::{ConfigError, LogLevel};
use crate::sender::SenderConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default)]
pub struct Config {
    /// Write credential authorizing ingestion at the remote endpoint
    #[arg(long, env = "SCALYR_API_WRITE_TOKEN", default_value = "")]
    pub api_write_token: String,

    /// Ingestion endpoint URL
    #[arg(
        long,
        env = "SCALYR_ENDPOINT",
        default_value = "https://www.scalyr.com/addEvents"
    )]
    pub endpoint: String,

    /// CA bundle used to verify the server certificate chain
    #[arg(
        long,
        env = "SCALYR_SSL_CA_BUNDLE_PATH",
        default_value = "/etc/ssl/certs/ca-bundle.crt"
    )]
    pub ssl_ca_bundle_path: PathBuf,

    /// Verify the server certificate chain (disabling is explicitly insecure)
    #[arg(
        long,
        env = "SCALYR_SSL_VERIFY_PEER",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub ssl_verify_peer: bool,

    /// Maximum certificate chain verification depth
    #[arg(long, env = "SCALYR_SSL_VERIFY_DEPTH", default_value = "5")]
    pub ssl_verify_depth: u32,

    /// Static session metadata as a JSON object string, e.g. '{"env":"prod"}'
    #[arg(long, env = "SCALYR_SESSION_INFO")]
    pub session_info: Option<String>,

    /// Label prefixed to tag names in the threads list
    #[arg(long, env = "SCALYR_SOURCE_LABEL", default_value = "Forwarder")]
    pub source_label: String,

    /// Concurrent forwarding workers (currently limited to 1)
    #[arg(long, env = "SCALYR_WORKERS", default_value = "1")]
    pub workers: usize,

    /// Request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout_secs: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Configuration file path (optional)
    #[arg(long, env = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Derived fields (not CLI arguments)
    #[serde(skip)]
    #[arg(skip)]
    pub request_timeout: Duration,

    /// Parsed session metadata; `None` means no `session_info` was set and
    /// the forwarder falls back to its default identity
    #[serde(skip)]
    #[arg(skip)]
    pub session_metadata: Option<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_write_token: String::new(),
            endpoint: "https://www.scalyr.com/addEvents".to_string(),
            ssl_ca_bundle_path: PathBuf::from("/etc/ssl/certs/ca-bundle.crt"),
            ssl_verify_peer: true,
            ssl_verify_depth: 5,
            session_info: None,
            source_label: "Forwarder".to_string(),
            workers: 1,
            request_timeout_secs: 30,
            log_level: LogLevel::Info,
            config_file: None,
            request_timeout: Duration::from_secs(30),
            session_metadata: None,
        }
    }
}

impl Config {
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut config = Config::parse_from(args);

        // A config file takes effect before validation so it can supply
        // required fields like the write token
        if let Some(config_file) = &config.config_file {
            return Config::from_file(config_file);
        }

        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.post_process()?;
        config.validate()?;
        Ok(config)
    }

    pub fn post_process(&mut self) -> Result<(), ConfigError> {
        self.request_timeout = Duration::from_secs(self.request_timeout_secs);

        self.session_metadata = match &self.session_info {
            Some(raw) => {
                let map: HashMap<String, String> = serde_json::from_str(raw).map_err(|e| {
                    ConfigError::InvalidSessionInfo(format!("expected a JSON object: {e}"))
                })?;
                Some(map)
            }
            None => None,
        };

        Ok(())
    }

    pub fn sender_config(&self) -> SenderConfig {
        SenderConfig {
            endpoint: self.endpoint.clone(),
            ca_bundle_path: self.ssl_ca_bundle_path.clone(),
            verify_peer: self.ssl_verify_peer,
            verify_depth: self.ssl_verify_depth,
            request_timeout: self.request_timeout,
        }
    }
}
