// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised when raw input cannot be turned into a record
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Unknown record kind '{0}' (expected user_event, sensor_reading or transaction)")]
    UnknownKind(String),
}
