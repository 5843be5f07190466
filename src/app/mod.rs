pub mod config;
pub mod logging;

pub use config::{Config, ConfigError, LogLevel};
pub use logging::setup_logging;

use crate::codec;
use crate::forwarder::EventForwarder;
use std::process;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

pub struct App {
    forwarder: EventForwarder,
}

impl App {
    pub fn from_args<I, T>(args: I) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let config = Config::from_args(args)?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        setup_logging(config.log_level);

        info!("Starting scalyr-log-forwarder v{}", env!("CARGO_PKG_VERSION"));
        info!(
            "Configuration: endpoint={}, verify_peer={}, workers={}",
            config.endpoint, config.ssl_verify_peer, config.workers
        );

        let forwarder = EventForwarder::from_config(&config)?;
        Ok(Self { forwarder })
    }

    /// Host-pipeline shim: reads one buffered chunk of encoded records from
    /// stdin and forwards it as a single batch at EOF. Batching policy
    /// (chunk size, flush interval, retry) stays with the host that produced
    /// the chunk.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut chunk = Vec::new();
        tokio::io::stdin().read_to_end(&mut chunk).await?;

        let records = codec::decode_stream(&chunk)?;
        if records.is_empty() {
            info!("No records on stdin, nothing to forward");
            return Ok(());
        }

        let count = records.len();
        let result = self.forwarder.forward(records).await?;
        info!(status = result.status, events = count, "Batch forwarded");

        if !result.is_success() {
            return Err(format!(
                "Ingestion endpoint returned {}: {}",
                result.status, result.body
            )
            .into());
        }
        Ok(())
    }

    pub fn session_id(&self) -> String {
        self.forwarder.session_id()
    }
}

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Main entry point for the application
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    match App::from_args(std::env::args()) {
        Ok(app) => {
            if let Err(e) = app.run().await {
                error!("Forwarding error: {e}");
                process::exit(1);
            }
        }
        Err(e) => {
            error!("Configuration error: {e}");
            process::exit(1);
        }
    }

    Ok(())
}
