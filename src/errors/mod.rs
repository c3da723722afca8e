// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod execution;
mod processor_map;
mod record;

pub use config::{ConfigError, ValidationError};
pub use execution::{ExecutionError, FailureStrategy};
pub use processor_map::ProcessorMapError;
pub use record::RecordError;
