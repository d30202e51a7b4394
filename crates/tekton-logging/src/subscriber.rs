// ABOUTME: Tracing subscriber initialization and layer composition
// ABOUTME: Combines console fmt or JSON layers with env-filter based filtering

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber with the given configuration.
pub fn init_subscriber(config: LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_new(config.filter_directives())
        .context("Failed to create environment filter")?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json {
        registry
            .with(fmt::layer().with_target(true).json())
            .try_init()?;
    } else if config.pretty_console {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).compact())
            .try_init()?;
    }

    tracing::debug!(
        log_level = %config.level.0,
        json_output = config.json,
        "Tekton logging initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_enough_for_tests() {
        // Second initialization fails because a global subscriber exists;
        // neither call may panic.
        let _ = init_subscriber(LoggingConfig::default());
        let _ = init_subscriber(LoggingConfig::default());
    }
}
