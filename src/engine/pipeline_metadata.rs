// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::records::Record;

/// Metadata reported by each processor during one batch, keyed by processor ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PipelineMetadata {
    metadata: BTreeMap<String, Record>,
}

impl PipelineMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what `processor_id` reported. A later report from the same
    /// processor is merged over the earlier one.
    pub fn merge_processor_metadata(&mut self, processor_id: &str, reported: Record) {
        match self.metadata.get_mut(processor_id) {
            Some(existing) => {
                for (key, value) in reported.into_inner() {
                    existing.insert(key, value);
                }
            }
            None => {
                self.metadata.insert(processor_id.to_string(), reported);
            }
        }
    }

    pub fn get_processor_metadata(&self, processor_id: &str) -> Option<&Record> {
        self.metadata.get(processor_id)
    }

    pub fn get_metadata_value(&self, processor_id: &str, key: &str) -> Option<&Value> {
        self.metadata.get(processor_id)?.get(key)
    }

    pub fn list_processors(&self) -> Vec<&str> {
        self.metadata.keys().map(|s| s.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Snapshot handed to the next processor as upstream metadata.
    pub fn as_map(&self) -> &BTreeMap<String, Record> {
        &self.metadata
    }
}
