// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::LocalProcessorFactory;
use crate::config::Config;
use crate::enrichment::Enricher;
use crate::errors::ProcessorMapError;
use crate::observability::messages::processor::ProcessorCreated;
use crate::traits::Processor;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping processor IDs to their implementations.
///
/// Processors are held as `Arc<dyn Processor>`; cloning the map shares them.
#[derive(Clone, Default)]
pub struct ProcessorMap(pub HashMap<String, Arc<dyn Processor>>);

impl ProcessorMap {
    /// Create a new empty processor map
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Create a ProcessorMap from configuration, resolving all processors.
    ///
    /// `enricher` is shared by every enrich processor that does not
    /// override its `data_source`.
    pub fn from_config(cfg: &Config, enricher: &Enricher) -> Result<Self, ProcessorMapError> {
        let mut registry = HashMap::new();

        for p in &cfg.processors {
            let processor = LocalProcessorFactory::create_processor(p, enricher)?;
            tracing::debug!(
                "{}",
                ProcessorCreated {
                    processor_id: &p.id,
                    implementation: &p.processor,
                }
            );
            registry.insert(p.id.clone(), processor);
        }

        Ok(Self(registry))
    }

    /// Insert a processor into the map
    pub fn insert(&mut self, id: String, processor: Arc<dyn Processor>) {
        self.0.insert(id, processor);
    }

    /// Get a processor by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Processor>> {
        self.0.get(id)
    }

    /// Check if a processor exists
    pub fn contains_key(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Get all processor IDs
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ProcessorMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&String> = self.0.keys().collect();
        ids.sort();
        f.debug_struct("ProcessorMap")
            .field("processor_count", &self.0.len())
            .field("processor_ids", &ids)
            .finish()
    }
}

impl From<HashMap<String, Arc<dyn Processor>>> for ProcessorMap {
    fn from(map: HashMap<String, Arc<dyn Processor>>) -> Self {
        Self(map)
    }
}
