// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor execution and lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Processor instantiation from configuration
//! * Processor execution (start, completion, failure)
//! * Failures tolerated under `continue_on_error`

use std::fmt::{Display, Formatter};

/// Processor instantiated from configuration.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct ProcessorCreated<'a> {
    pub processor_id: &'a str,
    pub implementation: &'a str,
}

impl Display for ProcessorCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' created from implementation '{}'",
            self.processor_id, self.implementation
        )
    }
}

/// Processor execution started.
///
/// # Log Level
/// `debug!` - Per-batch detail
///
/// # Example
/// ```
/// use record_pipeline::observability::messages::processor::ProcessorExecutionStarted;
///
/// let msg = ProcessorExecutionStarted {
///     processor_id: "enrich",
///     input_records: 100,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ProcessorExecutionStarted<'a> {
    pub processor_id: &'a str,
    pub input_records: usize,
}

impl Display for ProcessorExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' execution started: input={} records",
            self.processor_id, self.input_records
        )
    }
}

/// Processor execution completed successfully.
///
/// # Log Level
/// `debug!` - Per-batch detail
pub struct ProcessorExecutionCompleted<'a> {
    pub processor_id: &'a str,
    pub input_records: usize,
    pub output_records: usize,
    pub duration: std::time::Duration,
}

impl Display for ProcessorExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' completed: input={} records, output={} records, duration={:?}",
            self.processor_id, self.input_records, self.output_records, self.duration
        )
    }
}

/// Processor reported an error outcome.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ProcessorExecutionFailed<'a> {
    pub processor_id: &'a str,
    pub code: u16,
    pub message: &'a str,
}

impl Display for ProcessorExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' execution failed ({}): {}",
            self.processor_id, self.code, self.message
        )
    }
}

/// Processor failed but the pipeline keeps the current batch and moves on.
///
/// # Log Level
/// `warn!` - Degraded but continuing
pub struct ProcessorFailureIgnored<'a> {
    pub processor_id: &'a str,
    pub message: &'a str,
}

impl Display for ProcessorFailureIgnored<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Continuing past failed processor '{}': {}",
            self.processor_id, self.message
        )
    }
}
