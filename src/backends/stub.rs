// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::records::Record;
use crate::traits::{Processor, ProcessorIntent, ProcessorRequest, ProcessorResponse};

/// Appends its tag to each record's `trail` field and reports how many
/// records it saw.
pub struct TaggingProcessor {
    pub tag: &'static str,
    pub intent: ProcessorIntent,
}

impl TaggingProcessor {
    pub fn transform(tag: &'static str) -> Self {
        Self {
            tag,
            intent: ProcessorIntent::Transform,
        }
    }

    pub fn analyze(tag: &'static str) -> Self {
        Self {
            tag,
            intent: ProcessorIntent::Analyze,
        }
    }
}

#[async_trait::async_trait]
impl Processor for TaggingProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let seen = req.records.len();
        let tagged = req
            .records
            .into_iter()
            .map(|mut record| {
                let trail = match record.text("trail") {
                    Some(trail) => format!("{}>{}", trail, self.tag),
                    None => self.tag.to_string(),
                };
                record.insert("trail", trail);
                record
            })
            .collect();

        let upstream: Vec<Value> = req.metadata.keys().map(|k| Value::from(k.as_str())).collect();
        ProcessorResponse::batch(tagged).with_metadata(
            Record::new()
                .with("seen", seen)
                .with("upstream", upstream),
        )
    }

    fn name(&self) -> &'static str {
        "tagging"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        self.intent
    }
}

/// A processor that always fails for testing failure scenarios
pub struct FailingProcessor;

#[async_trait::async_trait]
impl Processor for FailingProcessor {
    async fn process(&self, _req: ProcessorRequest) -> ProcessorResponse {
        ProcessorResponse::error(500, "Simulated processor failure")
    }

    fn name(&self) -> &'static str {
        "failing"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Transform
    }
}
