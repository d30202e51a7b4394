// ABOUTME: Configuration structures and environment variable parsing for logging
// ABOUTME: Handles log levels and output format selection

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use tracing::Level;

/// Wrapper for tracing::Level that implements Serialize/Deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let level_str = match self.0 {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        serializer.serialize_str(level_str)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<LogLevel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let level = parse_log_level(&s).map_err(serde::de::Error::custom)?;
        Ok(LogLevel(level))
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

/// Main configuration structure for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub level: LogLevel,

    /// Per-module log level overrides
    pub module_levels: HashMap<String, LogLevel>,

    /// Emit JSON instead of human-readable console output
    pub json: bool,

    /// Pretty-print console output (vs compact)
    pub pretty_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::INFO),
            module_levels: HashMap::new(),
            json: false,
            pretty_console: true,
        }
    }
}

impl LoggingConfig {
    /// Create a new configuration with environment variable overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to this configuration.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // Check TEKTON_LOG first, then RUST_LOG
        if let Ok(level_str) = env::var("TEKTON_LOG") {
            self.level = LogLevel(parse_log_level(&level_str).context("Invalid TEKTON_LOG level")?);
        } else if let Ok(level_str) = env::var("RUST_LOG") {
            self.parse_rust_log(&level_str)?;
        }

        if env::var("TEKTON_LOG_JSON").is_ok() {
            self.json = true;
        }

        Ok(())
    }

    /// Parse a RUST_LOG-style directive list (e.g. "debug" or
    /// "tekton_core=debug,info") into level settings.
    fn parse_rust_log(&mut self, directives: &str) -> Result<()> {
        for directive in directives.split(',') {
            let directive = directive.trim();
            if directive.is_empty() {
                continue;
            }
            match directive.split_once('=') {
                Some((module, level_str)) => {
                    let level = parse_log_level(level_str)
                        .with_context(|| format!("Invalid level in RUST_LOG: {directive}"))?;
                    self.module_levels
                        .insert(module.to_string(), LogLevel(level));
                }
                None => {
                    self.level = LogLevel(
                        parse_log_level(directive)
                            .with_context(|| format!("Invalid level in RUST_LOG: {directive}"))?,
                    );
                }
            }
        }
        Ok(())
    }

    /// Build the env-filter directive string for this configuration.
    pub fn filter_directives(&self) -> String {
        let mut directives = vec![format!("{}", display_level(self.level.0))];
        for (module, level) in &self.module_levels {
            directives.push(format!("{}={}", module, display_level(level.0)));
        }
        directives.join(",")
    }
}

pub(crate) fn parse_log_level(s: &str) -> Result<Level> {
    match s.trim().to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(anyhow!("unknown log level: {other}")),
    }
}

fn display_level(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}
