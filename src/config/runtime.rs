// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{Config, DependencyGraph, ProcessorMap};
use crate::engine::PipelineExecutor;
use crate::enrichment::{Clock, Enricher, SystemClock};
use crate::errors::ProcessorMapError;

/// Pipeline runtime builder - turns a validated configuration into an executor.
///
/// Creates the processor registry, the dependency graph and the shared
/// [`Enricher`], and hands them to a [`PipelineExecutor`] configured with the
/// config's failure strategy.
///
/// ```
/// use record_pipeline::config::{Config, RuntimeBuilder};
///
/// let config: Config = serde_yaml::from_str(r#"
/// kind: user_event
/// processors:
///   - id: validate
///     processor: validate
///   - id: enrich
///     processor: enrich
///     depends_on: [validate]
/// "#).unwrap();
///
/// let executor = RuntimeBuilder::from_config(&config).unwrap();
/// assert_eq!(executor.processor_count(), 2);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build an executor whose enrich processors stamp wall-clock time.
    pub fn from_config(cfg: &Config) -> Result<PipelineExecutor, ProcessorMapError> {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    /// Build an executor whose enrich processors read time from `clock`.
    pub fn with_clock(
        cfg: &Config,
        clock: Arc<dyn Clock>,
    ) -> Result<PipelineExecutor, ProcessorMapError> {
        let enricher = Enricher::new(clock, cfg.data_source.clone());
        let processors = ProcessorMap::from_config(cfg, &enricher)?;
        let graph = DependencyGraph::from_config(cfg);
        Ok(PipelineExecutor::new(processors, graph, cfg.failure_strategy))
    }
}
