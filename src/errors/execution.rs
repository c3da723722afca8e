// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use thiserror::Error;

/// How the pipeline reacts when a processor reports an error.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    /// Abort the batch on the first processor error
    #[default]
    FailFast,
    /// Skip the failed processor and keep the current batch
    ContinueOnError,
}

/// Errors raised while executing a pipeline or a stream run
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("Processor '{processor_id}' failed ({code}): {message}")]
    ProcessorFailed {
        processor_id: String,
        code: u16,
        message: String,
    },

    #[error("Processor '{processor_id}' is not registered")]
    ProcessorNotFound { processor_id: String },

    #[error("Pipeline graph contains a cycle through: {}", .remaining.join(", "))]
    CycleDetected { remaining: Vec<String> },

    #[error("Stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
