// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::records::{Record, RecordKind};

/// Whether a processor's output replaces the canonical batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorIntent {
    /// Output becomes the batch seen by downstream processors
    Transform,
    /// Output is ignored; only metadata is kept
    Analyze,
}

/// A batch of same-kind records plus whatever upstream processors reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorRequest {
    pub kind: RecordKind,
    pub records: Vec<Record>,
    /// Metadata reported so far, keyed by processor ID
    pub metadata: BTreeMap<String, Record>,
}

impl ProcessorRequest {
    pub fn new(kind: RecordKind, records: Vec<Record>) -> Self {
        Self {
            kind,
            records,
            metadata: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NextBatch(Vec<Record>),
    Error(ErrorDetail),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorResponse {
    pub outcome: Outcome,
    pub metadata: Option<Record>,
}

impl ProcessorResponse {
    pub fn batch(records: Vec<Record>) -> Self {
        Self {
            outcome: Outcome::NextBatch(records),
            metadata: None,
        }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error(ErrorDetail {
                code,
                message: message.into(),
            }),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Record) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse;

    fn name(&self) -> &'static str;

    fn declared_intent(&self) -> ProcessorIntent;
}
