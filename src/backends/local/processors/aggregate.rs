// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::aggregation::aggregate;
use crate::traits::{Processor, ProcessorIntent, ProcessorRequest, ProcessorResponse};

/// Aggregate processor - summarizes the batch it receives
///
/// Analyze-only: the summary travels as metadata under the processor's ID
/// and the canonical batch is left untouched. An empty batch yields an
/// empty summary.
pub struct AggregateProcessor;

impl AggregateProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AggregateProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Processor for AggregateProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let summary = aggregate(&req.records, req.kind);
        ProcessorResponse::batch(Vec::new()).with_metadata(summary)
    }

    fn name(&self) -> &'static str {
        "aggregate"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Analyze
    }
}
