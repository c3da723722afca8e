// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors that can occur while validating a pipeline configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A circular dependency was detected between processors
    #[error("Cyclic dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// The cycle path showing the circular dependency
        cycle: Vec<String>,
    },

    /// A processor references a dependency that doesn't exist
    #[error("Processor '{processor_id}' depends on '{missing_dependency}' which does not exist")]
    UnresolvedDependency {
        processor_id: String,
        missing_dependency: String,
    },

    /// Two processors share an ID
    #[error("Duplicate processor ID: '{processor_id}'")]
    DuplicateProcessorId { processor_id: String },

    /// The `processor` name has no local implementation
    #[error("Processor '{processor_id}' names unknown implementation '{processor}'")]
    UnknownProcessor {
        processor_id: String,
        processor: String,
    },

    /// A size option that must be positive was zero
    #[error("Option '{option}' must be greater than zero")]
    ZeroSize { option: &'static str },

    /// A duration option exceeded its ceiling
    #[error("Option '{option}' is {value}, above the maximum of {max}")]
    SizeTooLarge {
        option: &'static str,
        value: u64,
        max: u64,
    },
}

/// Errors raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration validation failed:\n{}", render_validation_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn render_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
