// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use super::processors::*;
use crate::config::ProcessorConfig;
use crate::enrichment::Enricher;
use crate::errors::ProcessorMapError;
use crate::traits::Processor;

const IMPLEMENTATIONS: [&str; 3] = ["validate", "enrich", "aggregate"];

/// Factory for creating local (in-process) processor instances
pub struct LocalProcessorFactory;

impl LocalProcessorFactory {
    /// Create a processor instance from configuration
    ///
    /// The `processor` field in the config determines which processor to create:
    /// - "validate" -> ValidateProcessor
    /// - "enrich" -> EnrichProcessor (optional `data_source` option overrides the tag)
    /// - "aggregate" -> AggregateProcessor
    ///
    /// `enricher` supplies the clock and default `data_source` for enrich
    /// processors.
    pub fn create_processor(
        config: &ProcessorConfig,
        enricher: &Enricher,
    ) -> Result<Arc<dyn Processor>, ProcessorMapError> {
        match config.processor.as_str() {
            "validate" => Ok(Arc::new(ValidateProcessor::new())),
            "enrich" => {
                let enricher = match config.options.get("data_source") {
                    None => enricher.clone(),
                    Some(value) => {
                        let tag = value.as_str().ok_or_else(|| ProcessorMapError::InvalidOption {
                            processor_id: config.id.clone(),
                            option: "data_source".to_string(),
                            reason: "expected a string".to_string(),
                        })?;
                        enricher.with_data_source(tag)
                    }
                };
                Ok(Arc::new(EnrichProcessor::new(enricher)))
            }
            "aggregate" => Ok(Arc::new(AggregateProcessor::new())),
            other => Err(ProcessorMapError::UnknownImplementation {
                processor_id: config.id.clone(),
                processor: other.to_string(),
            }),
        }
    }

    /// List all available local processor implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        IMPLEMENTATIONS.to_vec()
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(impl_name: &str) -> bool {
        IMPLEMENTATIONS.contains(&impl_name)
    }
}
