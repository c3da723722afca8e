// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for processor map creation and processor instantiation.

use thiserror::Error;

/// Errors that can occur during processor map creation
#[derive(Debug, Error)]
pub enum ProcessorMapError {
    /// The configured implementation name is not a known local processor
    #[error("Unknown local processor implementation '{processor}' for processor '{processor_id}'")]
    UnknownImplementation {
        processor_id: String,
        processor: String,
    },

    /// A processor option had the wrong shape
    #[error("Invalid option '{option}' for processor '{processor_id}': {reason}")]
    InvalidOption {
        processor_id: String,
        option: String,
        reason: String,
    },
}
