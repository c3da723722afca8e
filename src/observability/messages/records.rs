// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for per-record events: rejections, unreadable input and
//! window emission.

use std::fmt::{Display, Formatter};

/// A record failed validation and was filtered out.
///
/// # Log Level
/// `debug!` - Expected, high-volume
pub struct RecordRejected<'a> {
    pub kind: &'a str,
    pub rejection: &'a dyn std::error::Error,
}

impl Display for RecordRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected {} record: {}", self.kind, self.rejection)
    }
}

/// An input line was not a JSON object.
///
/// # Log Level
/// `warn!` - Bad input, skipped
pub struct UnparseableLine<'a> {
    pub line_number: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for UnparseableLine<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping unparseable input line {}: {}",
            self.line_number, self.error
        )
    }
}

/// A record was not added to any window.
///
/// # Log Level
/// `debug!` - Expected when producers lag
pub struct RecordNotWindowed<'a> {
    pub kind: &'a str,
    pub late_total: usize,
    pub unparseable_total: usize,
}

impl Display for RecordNotWindowed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dropped {} record from windowing: late={}, no_timestamp={}",
            self.kind, self.late_total, self.unparseable_total
        )
    }
}

/// A window group closed and was written out.
///
/// # Log Level
/// `debug!` - Per-window detail
///
/// # Example
/// ```
/// use record_pipeline::observability::messages::records::WindowEmitted;
///
/// let msg = WindowEmitted {
///     kind: "user_event",
///     key: "click",
///     window_start: "2024-01-01T10:00:00Z",
///     count: 12,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Window emitted: kind=user_event, key=click, start=2024-01-01T10:00:00Z, count=12"
/// );
/// ```
pub struct WindowEmitted<'a> {
    pub kind: &'a str,
    pub key: &'a str,
    pub window_start: &'a str,
    pub count: usize,
}

impl Display for WindowEmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Window emitted: kind={}, key={}, start={}, count={}",
            self.kind, self.key, self.window_start, self.count
        )
    }
}
