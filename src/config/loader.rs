// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_BATCH_SIZE, DEFAULT_DATA_SOURCE, DEFAULT_WATERMARK_SECONDS, DEFAULT_WINDOW_SECONDS,
    MAX_WINDOW_SECONDS,
};
use crate::errors::{ConfigError, FailureStrategy};
use crate::records::RecordKind;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main configuration structure for a record pipeline.
///
/// Names the record kind the pipeline handles, how processor failures are
/// treated, how records are batched and windowed, and the processors that
/// form the pipeline. Loaded from YAML, or from TOML when the file has a
/// `.toml` extension.
///
/// # Example
/// ```yaml
/// kind: sensor_reading
/// data_source: kafka_stream
/// failure_strategy: fail_fast
/// executor_options:
///   batch_size: 100
/// window:
///   size_seconds: 300
///   watermark_seconds: 600
/// processors:
///   - id: validate
///     processor: validate
///   - id: enrich
///     processor: enrich
///     depends_on: [validate]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub kind: RecordKind,
    #[serde(default = "default_data_source")]
    pub data_source: String,
    #[serde(default)]
    pub failure_strategy: FailureStrategy,
    #[serde(default)]
    pub executor_options: ExecutorOptions,
    #[serde(default)]
    pub window: Option<WindowConfig>,
    pub processors: Vec<ProcessorConfig>,
}

fn default_data_source() -> String {
    DEFAULT_DATA_SOURCE.to_string()
}

/// Executor-specific configuration options.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutorOptions {
    /// Records per batch in stream mode (defaults to 100)
    pub batch_size: Option<usize>,
}

impl ExecutorOptions {
    pub fn batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }
}

/// Event-time window settings for stream mode. Absent means no windowing.
///
/// ```yaml
/// window:
///   size_seconds: 300      # 5 minute tumbling windows
///   watermark_seconds: 600 # close windows 10 minutes behind the newest event
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_seconds")]
    pub size_seconds: u64,
    #[serde(default = "default_watermark_seconds")]
    pub watermark_seconds: u64,
}

fn default_window_seconds() -> u64 {
    DEFAULT_WINDOW_SECONDS
}

fn default_watermark_seconds() -> u64 {
    DEFAULT_WATERMARK_SECONDS
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size_seconds: DEFAULT_WINDOW_SECONDS,
            watermark_seconds: DEFAULT_WATERMARK_SECONDS,
        }
    }
}

impl WindowConfig {
    /// Window length, capped at `MAX_WINDOW_SECONDS`.
    pub fn size(&self) -> chrono::Duration {
        bounded_seconds(self.size_seconds)
    }

    /// Watermark delay, capped at `MAX_WINDOW_SECONDS`.
    pub fn watermark_delay(&self) -> chrono::Duration {
        bounded_seconds(self.watermark_seconds)
    }
}

fn bounded_seconds(seconds: u64) -> chrono::Duration {
    chrono::Duration::seconds(seconds.min(MAX_WINDOW_SECONDS) as i64)
}

/// Configuration for a single processor in the pipeline.
///
/// # Fields
/// * `id` - Unique identifier for this processor
/// * `processor` - Local implementation name (`validate`, `enrich`, `aggregate`)
/// * `depends_on` - Processor IDs that must run first
/// * `options` - Additional processor-specific configuration options
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessorConfig {
    pub id: String,
    pub processor: String,
    #[serde(default)]
    pub depends_on: Vec<String>, // defaults empty
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>,
}

/// Load a config from a YAML or TOML file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let cfg = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(cfg)
}

/// Load a config and run every validation check against it.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
