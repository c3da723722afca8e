// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON-lines stream processing.
//!
//! [`StreamRunner`] reads one JSON object per line, groups records into
//! batches, runs each batch through a [`PipelineExecutor`] and writes one
//! JSON line per batch summary and per closed window.

use serde::Serialize;
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::aggregation::{WindowedAggregator, WindowedSummary};
use crate::config::{Config, RuntimeBuilder};
use crate::engine::{PipelineExecutor, PipelineMetadata};
use crate::errors::{ExecutionError, ProcessorMapError};
use crate::observability::messages::pipeline::{
    BatchFailed, BatchProcessed, PipelineStarted, StreamCompleted,
};
use crate::observability::messages::records::{RecordNotWindowed, UnparseableLine, WindowEmitted};
use crate::records::{Record, RecordKind};

/// One line of runner output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamOutput {
    BatchSummary(BatchSummary),
    Window(WindowedSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub batch: usize,
    pub kind: RecordKind,
    pub input_records: usize,
    pub output_records: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_processors: Vec<String>,
    pub metadata: PipelineMetadata,
}

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub lines_read: usize,
    pub unparseable_lines: usize,
    pub records_in: usize,
    pub records_out: usize,
    pub batches: usize,
    pub windows_emitted: usize,
    pub dropped_late: usize,
    pub dropped_no_timestamp: usize,
}

/// Drives a pipeline over a stream of JSON lines.
pub struct StreamRunner {
    executor: PipelineExecutor,
    kind: RecordKind,
    batch_size: usize,
    window: Option<WindowedAggregator>,
}

impl StreamRunner {
    pub fn new(executor: PipelineExecutor, kind: RecordKind, batch_size: usize) -> Self {
        Self {
            executor,
            kind,
            batch_size: batch_size.max(1),
            window: None,
        }
    }

    /// Also aggregate each batch's output records into event-time windows.
    pub fn with_window(mut self, aggregator: WindowedAggregator) -> Self {
        self.window = Some(aggregator);
        self
    }

    /// Build the executor and window settings a config describes.
    pub fn from_config(cfg: &Config) -> Result<Self, ProcessorMapError> {
        let executor = RuntimeBuilder::from_config(cfg)?;
        Ok(Self::from_parts(cfg, executor))
    }

    /// Same as [`StreamRunner::from_config`] with a prebuilt executor.
    pub fn from_parts(cfg: &Config, executor: PipelineExecutor) -> Self {
        let runner = Self::new(executor, cfg.kind, cfg.executor_options.batch_size());
        match &cfg.window {
            Some(window) => runner.with_window(WindowedAggregator::new(
                cfg.kind,
                window.size(),
                window.watermark_delay(),
            )),
            None => runner,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Consume `reader` to the end, writing output lines to `writer`.
    ///
    /// Blank lines are skipped. Lines that are not UTF-8 JSON objects are
    /// counted and logged, never fatal. Open windows are flushed once the
    /// input ends.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<StreamStats, ExecutionError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            "{}",
            PipelineStarted {
                kind: self.kind.as_str(),
                processor_count: self.executor.processor_count(),
                batch_size: self.batch_size,
            }
        );

        let started = Instant::now();
        let mut stats = StreamStats::default();
        let mut pending: Vec<Record> = Vec::with_capacity(self.batch_size);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            stats.lines_read += 1;

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(error) => {
                    stats.unparseable_lines += 1;
                    tracing::warn!(
                        "{}",
                        UnparseableLine {
                            line_number: stats.lines_read,
                            error: &error,
                        }
                    );
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match Record::from_json_str(line) {
                Ok(record) => pending.push(record),
                Err(error) => {
                    stats.unparseable_lines += 1;
                    tracing::warn!(
                        "{}",
                        UnparseableLine {
                            line_number: stats.lines_read,
                            error: &error,
                        }
                    );
                }
            }

            if pending.len() >= self.batch_size {
                let batch = std::mem::take(&mut pending);
                self.process_batch(batch, &mut stats, &mut writer).await?;
            }
        }

        if !pending.is_empty() {
            self.process_batch(pending, &mut stats, &mut writer).await?;
        }

        if let Some(window) = self.window.as_mut() {
            let remaining = window.flush();
            stats.dropped_late = window.dropped_late();
            stats.dropped_no_timestamp = window.dropped_unparseable();
            write_windows(remaining, &mut stats, &mut writer).await?;
        }

        writer.flush().await?;

        tracing::info!(
            "{}",
            StreamCompleted {
                lines_read: stats.lines_read,
                unparseable_lines: stats.unparseable_lines,
                batches: stats.batches,
                windows_emitted: stats.windows_emitted,
                duration: started.elapsed(),
            }
        );

        Ok(stats)
    }

    async fn process_batch<W>(
        &mut self,
        batch: Vec<Record>,
        stats: &mut StreamStats,
        writer: &mut W,
    ) -> Result<(), ExecutionError>
    where
        W: AsyncWrite + Unpin,
    {
        stats.batches += 1;
        stats.records_in += batch.len();
        let batch_number = stats.batches;
        let input_records = batch.len();
        let started = Instant::now();

        let result = match self.executor.execute(self.kind, batch).await {
            Ok(result) => result,
            Err(error) => {
                tracing::error!(
                    "{}",
                    BatchFailed {
                        batch_number,
                        error: &error,
                    }
                );
                return Err(error);
            }
        };

        stats.records_out += result.records.len();
        tracing::debug!(
            "{}",
            BatchProcessed {
                batch_number,
                input_records,
                output_records: result.records.len(),
                duration: started.elapsed(),
            }
        );

        let summary = StreamOutput::BatchSummary(BatchSummary {
            batch: batch_number,
            kind: self.kind,
            input_records,
            output_records: result.records.len(),
            failed_processors: result.failed,
            metadata: result.metadata,
        });
        write_line(&summary, writer).await?;

        if let Some(window) = self.window.as_mut() {
            for record in &result.records {
                if !window.on_record(record) {
                    tracing::debug!(
                        "{}",
                        RecordNotWindowed {
                            kind: self.kind.as_str(),
                            late_total: window.dropped_late(),
                            unparseable_total: window.dropped_unparseable(),
                        }
                    );
                }
            }
            let closed = window.drain_closed();
            write_windows(closed, stats, writer).await?;
        }

        Ok(())
    }
}

async fn write_windows<W>(
    windows: Vec<WindowedSummary>,
    stats: &mut StreamStats,
    writer: &mut W,
) -> Result<(), ExecutionError>
where
    W: AsyncWrite + Unpin,
{
    for summary in windows {
        let window_start = summary.window_start.to_rfc3339();
        tracing::debug!(
            "{}",
            WindowEmitted {
                kind: summary.kind.as_str(),
                key: &summary.key,
                window_start: &window_start,
                count: summary.count,
            }
        );
        stats.windows_emitted += 1;
        write_line(&StreamOutput::Window(summary), writer).await?;
    }
    Ok(())
}

async fn write_line<W>(output: &StreamOutput, writer: &mut W) -> Result<(), ExecutionError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(output)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DependencyGraph, ProcessorMap};
    use crate::errors::FailureStrategy;
    use serde_json::Value;

    fn passthrough(kind: RecordKind, batch_size: usize) -> StreamRunner {
        let executor = PipelineExecutor::new(
            ProcessorMap::new(),
            DependencyGraph::new(),
            FailureStrategy::FailFast,
        );
        StreamRunner::new(executor, kind, batch_size)
    }

    fn output_lines(bytes: &[u8]) -> Vec<Value> {
        String::from_utf8_lossy(bytes)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_batches_by_size() {
        let input = (0..5)
            .map(|i| format!(r#"{{"user_id": {}}}"#, i))
            .collect::<Vec<_>>()
            .join("\n");
        let mut out = Vec::new();

        let stats = passthrough(RecordKind::UserEvent, 2)
            .run(input.as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(stats.batches, 3);
        assert_eq!(stats.records_in, 5);
        assert_eq!(stats.records_out, 5);

        let lines = output_lines(&out);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["type"], "batch_summary");
        assert_eq!(lines[0]["input_records"], 2);
        assert_eq!(lines[2]["batch"], 3);
        assert_eq!(lines[2]["input_records"], 1);
    }

    #[tokio::test]
    async fn test_skips_blank_and_unparseable_lines() {
        let input = "{\"user_id\": 1}\n\nnot json\n[1, 2]\n{\"user_id\": 2}\n";
        let mut out = Vec::new();

        let stats = passthrough(RecordKind::UserEvent, 100)
            .run(input.as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(stats.lines_read, 5);
        assert_eq!(stats.unparseable_lines, 2);
        assert_eq!(stats.records_in, 2);
        assert_eq!(stats.batches, 1);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let mut input = b"{\"user_id\": 1}\n".to_vec();
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"user_id\": 2}");
        let mut out = Vec::new();

        let stats = passthrough(RecordKind::UserEvent, 100)
            .run(&input[..], &mut out)
            .await
            .unwrap();

        assert_eq!(stats.lines_read, 3);
        assert_eq!(stats.unparseable_lines, 1);
        assert_eq!(stats.records_in, 2);
        assert_eq!(stats.batches, 1);
        assert_eq!(output_lines(&out)[0]["input_records"], 2);
    }

    #[tokio::test]
    async fn test_empty_input_writes_nothing() {
        let mut out = Vec::new();
        let stats = passthrough(RecordKind::Transaction, 10)
            .run(&b""[..], &mut out)
            .await
            .unwrap();
        assert_eq!(stats, StreamStats::default());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_windows_are_flushed_at_end() {
        let input = [
            r#"{"user_id": 1, "event_type": "click", "timestamp": "2024-01-01T10:00:00Z"}"#,
            r#"{"user_id": 2, "event_type": "click", "timestamp": "2024-01-01T10:01:00Z"}"#,
            r#"{"user_id": 3, "event_type": "login", "timestamp": "2024-01-01T10:02:00Z"}"#,
            r#"{"user_id": 4, "event_type": "login"}"#,
        ]
        .join("\n");
        let mut out = Vec::new();

        let window = WindowedAggregator::new(
            RecordKind::UserEvent,
            chrono::Duration::minutes(5),
            chrono::Duration::minutes(10),
        );
        let stats = passthrough(RecordKind::UserEvent, 10)
            .with_window(window)
            .run(input.as_bytes(), &mut out)
            .await
            .unwrap();

        assert_eq!(stats.windows_emitted, 2);
        assert_eq!(stats.dropped_no_timestamp, 1);

        let lines = output_lines(&out);
        let windows: Vec<&Value> = lines.iter().filter(|l| l["type"] == "window").collect();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0]["key"], "click");
        assert_eq!(windows[0]["count"], 2);
        assert_eq!(windows[1]["key"], "login");
    }
}
