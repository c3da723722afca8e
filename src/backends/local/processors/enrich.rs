// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::enrichment::Enricher;
use crate::records::Record;
use crate::traits::{Processor, ProcessorIntent, ProcessorRequest, ProcessorResponse};

/// Enrich processor - appends the derived fields for the batch kind to every record
pub struct EnrichProcessor {
    enricher: Enricher,
}

impl EnrichProcessor {
    pub fn new(enricher: Enricher) -> Self {
        Self { enricher }
    }
}

#[async_trait]
impl Processor for EnrichProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let enriched: Vec<Record> = req
            .records
            .iter()
            .map(|record| self.enricher.enrich(record, req.kind))
            .collect();

        let metadata = Record::new()
            .with("enriched", enriched.len())
            .with("data_source", self.enricher.data_source());

        ProcessorResponse::batch(enriched).with_metadata(metadata)
    }

    fn name(&self) -> &'static str {
        "enrich"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Transform
    }
}
