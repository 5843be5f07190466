use super::config::LogLevel;
use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Initializes the global tracing subscriber once per process. `RUST_LOG`
/// overrides the configured level; HTTP stack noise is capped at warn.
pub fn setup_logging(level: LogLevel) {
    INIT.call_once(|| {
        let default_filter = format!(
            "{},hyper=warn,reqwest=warn,rustls=warn",
            level.as_filter_str()
        );
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .compact(),
            )
            .try_init();
    });
}
