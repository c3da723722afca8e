// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration, batch and stream lifecycle events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Configuration loaded and validated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub kind: &'a str,
    pub processor_count: usize,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded config '{}': kind={}, processors={}",
            self.path, self.kind, self.processor_count
        )
    }
}

/// Configuration rejected by validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConfigValidationFailed<'a> {
    pub path: &'a str,
    pub error_count: usize,
}

impl Display for ConfigValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Config '{}' failed validation with {} error(s)",
            self.path, self.error_count
        )
    }
}

/// Stream run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use record_pipeline::observability::messages::pipeline::PipelineStarted;
///
/// let msg = PipelineStarted {
///     kind: "transaction",
///     processor_count: 3,
///     batch_size: 50,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Pipeline started: kind=transaction, processors=3, batch_size=50"
/// );
/// ```
pub struct PipelineStarted<'a> {
    pub kind: &'a str,
    pub processor_count: usize,
    pub batch_size: usize,
}

impl Display for PipelineStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline started: kind={}, processors={}, batch_size={}",
            self.kind, self.processor_count, self.batch_size
        )
    }
}

/// One batch went through every processor.
///
/// # Log Level
/// `debug!` - Per-batch detail
pub struct BatchProcessed {
    pub batch_number: usize,
    pub input_records: usize,
    pub output_records: usize,
    pub duration: Duration,
}

impl Display for BatchProcessed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Batch {} processed: input={} records, output={} records, duration={:?}",
            self.batch_number, self.input_records, self.output_records, self.duration
        )
    }
}

/// A batch was abandoned because a processor failed under fail-fast.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct BatchFailed<'a> {
    pub batch_number: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for BatchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Batch {} failed: {}", self.batch_number, self.error)
    }
}

/// Stream input exhausted and all output written.
///
/// # Log Level
/// `info!` - Important operational event
pub struct StreamCompleted {
    pub lines_read: usize,
    pub unparseable_lines: usize,
    pub batches: usize,
    pub windows_emitted: usize,
    pub duration: Duration,
}

impl Display for StreamCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stream completed: lines={}, unparseable={}, batches={}, windows={}, duration={:?}",
            self.lines_read, self.unparseable_lines, self.batches, self.windows_emitted, self.duration
        )
    }
}
