use super::{Config, ConfigError};
use url::Url;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Missing credential fails fast; nothing is sent without it
        if self.api_write_token.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "api_write_token is required".to_string(),
            ));
        }

        // Validate endpoint URL
        Url::parse(&self.endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid endpoint URL '{}': {}", self.endpoint, e))
        })?;

        // Session state is owned by a single in-flight send
        if self.workers > 1 {
            return Err(ConfigError::InvalidConfig(format!(
                "workers is currently limited to 1. You specified {}.",
                self.workers
            )));
        }
        if self.workers == 0 {
            return Err(ConfigError::InvalidConfig(
                "workers must be exactly 1".to_string(),
            ));
        }

        if self.ssl_verify_depth == 0 {
            return Err(ConfigError::InvalidConfig(
                "ssl_verify_depth must be at least 1".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidConfig(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
