//! Configuration types for span rotation

use crate::domain::params::{
    SpanParams, DEFAULT_PRODUCER_COUNT, DEFAULT_SPAN_DURATION, DEFAULT_SPRINT_DURATION,
};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Default sidechain identifier
pub const DEFAULT_CHAIN_ID: &str = "15001";

/// Runtime configuration for span rotation
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpanRotationConfig {
    /// Sidechain the spans govern
    pub chain_id: String,

    /// Blocks per span written at genesis
    pub span_duration: u64,

    /// Blocks per sprint written at genesis
    pub sprint_duration: u64,

    /// Producers per span written at genesis
    pub producer_count: u64,

    /// Logging
    pub log: LogConfig,
}

impl Default for SpanRotationConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            span_duration: DEFAULT_SPAN_DURATION,
            sprint_duration: DEFAULT_SPRINT_DURATION,
            producer_count: DEFAULT_PRODUCER_COUNT,
            log: LogConfig::default(),
        }
    }
}

impl SpanRotationConfig {
    /// Load configuration from `QC_*` environment variables.
    ///
    /// Unset variables take their defaults. Values that fail to parse are
    /// logged and replaced by the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            chain_id: lookup("QC_SPAN_CHAIN_ID").unwrap_or(defaults.chain_id),
            span_duration: parse_or(&lookup, "QC_SPAN_DURATION", defaults.span_duration),
            sprint_duration: parse_or(&lookup, "QC_SPRINT_DURATION", defaults.sprint_duration),
            producer_count: parse_or(&lookup, "QC_PRODUCER_COUNT", defaults.producer_count),
            log: LogConfig {
                level: lookup("QC_LOG_LEVEL")
                    .or_else(|| lookup("RUST_LOG"))
                    .unwrap_or(defaults.log.level),
                json: lookup("QC_JSON_LOGS")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(defaults.log.json),
            },
        }
    }

    /// Parameter registry contents for genesis
    pub fn params(&self) -> SpanParams {
        SpanParams::new(self.span_duration, self.sprint_duration, self.producer_count)
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `qc_18_span_rotation=debug`
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(
                key,
                value = %raw,
                default = %default,
                "[qc-18] Invalid configuration value, using default"
            );
            default
        }),
    }
}
