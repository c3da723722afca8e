// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;

use crate::config::{DependencyGraph, ProcessorMap};
use crate::engine::PipelineMetadata;
use crate::errors::{ExecutionError, FailureStrategy};
use crate::observability::messages::processor::{
    ProcessorExecutionCompleted, ProcessorExecutionFailed, ProcessorExecutionStarted,
    ProcessorFailureIgnored,
};
use crate::records::{Record, RecordKind};
use crate::traits::{Outcome, ProcessorIntent, ProcessorRequest};

/// What one batch looks like after every processor ran.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// The canonical batch after the last Transform processor
    pub records: Vec<Record>,
    pub metadata: PipelineMetadata,
    /// Processors that failed and were skipped under `continue_on_error`
    pub failed: Vec<String>,
}

/// Runs a batch through the configured processors in dependency order.
///
/// ## Canonical batch
///
/// The executor keeps one current batch. Every processor receives it along
/// with the metadata reported so far:
///
/// - **Transform processors** replace the batch with their output
/// - **Analyze processors** only contribute metadata; their output is dropped
///
/// ## Failures
///
/// A processor that answers with `Outcome::Error` aborts the batch under
/// `FailureStrategy::FailFast`. Under `ContinueOnError` it is recorded in
/// [`PipelineResult::failed`] and the batch carries on unchanged.
pub struct PipelineExecutor {
    processors: ProcessorMap,
    graph: DependencyGraph,
    failure_strategy: FailureStrategy,
}

impl PipelineExecutor {
    pub fn new(
        processors: ProcessorMap,
        graph: DependencyGraph,
        failure_strategy: FailureStrategy,
    ) -> Self {
        Self {
            processors,
            graph,
            failure_strategy,
        }
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    pub fn failure_strategy(&self) -> FailureStrategy {
        self.failure_strategy
    }

    /// Execute every processor once over `records`.
    pub async fn execute(
        &self,
        kind: RecordKind,
        records: Vec<Record>,
    ) -> Result<PipelineResult, ExecutionError> {
        let order = self.graph.topological_order()?;

        let mut canonical = records;
        let mut metadata = PipelineMetadata::new();
        let mut failed = Vec::new();

        for processor_id in order {
            let processor = self
                .processors
                .get(&processor_id)
                .ok_or_else(|| ExecutionError::ProcessorNotFound {
                    processor_id: processor_id.clone(),
                })?;

            tracing::debug!(
                "{}",
                ProcessorExecutionStarted {
                    processor_id: &processor_id,
                    input_records: canonical.len(),
                }
            );

            // The batch is cloned so it survives a failure under continue_on_error.
            let request = ProcessorRequest {
                kind,
                records: canonical.clone(),
                metadata: metadata.as_map().clone(),
            };

            let started = Instant::now();
            let response = processor.process(request).await;

            match response.outcome {
                Outcome::NextBatch(batch) => {
                    tracing::debug!(
                        "{}",
                        ProcessorExecutionCompleted {
                            processor_id: &processor_id,
                            input_records: canonical.len(),
                            output_records: batch.len(),
                            duration: started.elapsed(),
                        }
                    );
                    if processor.declared_intent() == ProcessorIntent::Transform {
                        canonical = batch;
                    }
                    if let Some(reported) = response.metadata {
                        metadata.merge_processor_metadata(&processor_id, reported);
                    }
                }
                Outcome::Error(detail) => {
                    tracing::error!(
                        "{}",
                        ProcessorExecutionFailed {
                            processor_id: &processor_id,
                            code: detail.code,
                            message: &detail.message,
                        }
                    );
                    match self.failure_strategy {
                        FailureStrategy::FailFast => {
                            return Err(ExecutionError::ProcessorFailed {
                                processor_id,
                                code: detail.code,
                                message: detail.message,
                            });
                        }
                        FailureStrategy::ContinueOnError => {
                            tracing::warn!(
                                "{}",
                                ProcessorFailureIgnored {
                                    processor_id: &processor_id,
                                    message: &detail.message,
                                }
                            );
                            failed.push(processor_id);
                        }
                    }
                }
            }
        }

        Ok(PipelineResult {
            records: canonical,
            metadata,
            failed,
        })
    }
}

impl std::fmt::Debug for PipelineExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineExecutor")
            .field("processors", &self.processors)
            .field("failure_strategy", &self.failure_strategy)
            .finish()
    }
}
