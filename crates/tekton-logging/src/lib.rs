// ABOUTME: Public API for tekton logging infrastructure using tokio-tracing
// ABOUTME: Provides centralized configuration and initialization for structured logging

pub mod config;
pub mod subscriber;

// Re-export tracing macros for convenience
pub use tracing::{Level, Span, debug, error, info, instrument, span, trace, warn};

pub use config::{LogLevel, LoggingConfig};
pub use subscriber::init_subscriber;

use anyhow::Result;

/// Initialize logging with default configuration.
///
/// Convenience wrapper that builds a default [`LoggingConfig`] (honoring
/// `TEKTON_LOG` and friends) and installs the tracing subscriber.
pub fn init_logging() -> Result<()> {
    let config = LoggingConfig::from_env()?;
    init_subscriber(config)
}

/// Initialize logging with custom configuration.
pub fn init_logging_with_config(config: LoggingConfig) -> Result<()> {
    init_subscriber(config)
}
