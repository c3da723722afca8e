// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::observability::messages::records::RecordRejected;
use crate::records::Record;
use crate::traits::{Processor, ProcessorIntent, ProcessorRequest, ProcessorResponse};
use crate::validation::validate;

/// Validate processor - keeps the records that pass validation for the batch kind
///
/// Reports `accepted`, `rejected` and a per-reason `rejections` count as
/// metadata. A rejected record is never an error outcome.
pub struct ValidateProcessor;

impl ValidateProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ValidateProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Processor for ValidateProcessor {
    async fn process(&self, req: ProcessorRequest) -> ProcessorResponse {
        let kind = req.kind;
        let mut accepted = Vec::with_capacity(req.records.len());
        let mut rejections: BTreeMap<&'static str, usize> = BTreeMap::new();

        for record in req.records {
            match validate(&record, kind) {
                Ok(()) => accepted.push(record),
                Err(rejection) => {
                    tracing::debug!(
                        "{}",
                        RecordRejected {
                            kind: kind.as_str(),
                            rejection: &rejection,
                        }
                    );
                    *rejections.entry(rejection.reason()).or_insert(0) += 1;
                }
            }
        }

        let rejected: usize = rejections.values().sum();
        let reasons: Map<String, Value> = rejections
            .into_iter()
            .map(|(reason, count)| (reason.to_string(), Value::from(count)))
            .collect();

        let metadata = Record::new()
            .with("accepted", accepted.len())
            .with("rejected", rejected)
            .with("rejections", reasons);

        ProcessorResponse::batch(accepted).with_metadata(metadata)
    }

    fn name(&self) -> &'static str {
        "validate"
    }

    fn declared_intent(&self) -> ProcessorIntent {
        ProcessorIntent::Transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordKind;
    use crate::traits::Outcome;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[tokio::test]
    async fn test_keeps_only_valid_records() {
        let request = ProcessorRequest::new(
            RecordKind::Transaction,
            vec![
                record(json!({"transaction_id": "t1", "user_id": 1, "amount": 10.0, "currency": "USD", "timestamp": "x"})),
                record(json!({"transaction_id": "t2", "user_id": 1, "amount": 10.0, "currency": "JPY", "timestamp": "x"})),
                record(json!({"transaction_id": "t3", "user_id": 1, "amount": -1.0, "currency": "USD", "timestamp": "x"})),
                record(json!({"transaction_id": "t4", "user_id": 1, "currency": "USD", "timestamp": "x"})),
            ],
        );

        let response = ValidateProcessor::new().process(request).await;

        match response.outcome {
            Outcome::NextBatch(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].text("transaction_id"), Some("t1"));
            }
            Outcome::Error(e) => panic!("unexpected error: {:?}", e),
        }

        let metadata = response.metadata.unwrap();
        assert_eq!(metadata.number("accepted"), Some(1.0));
        assert_eq!(metadata.number("rejected"), Some(3.0));
        assert_eq!(
            metadata.get("rejections"),
            Some(&json!({"missing_field": 1, "non_positive_amount": 1, "unsupported_currency": 1}))
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let response = ValidateProcessor::new()
            .process(ProcessorRequest::new(RecordKind::UserEvent, vec![]))
            .await;

        assert_eq!(response.outcome, Outcome::NextBatch(vec![]));
        assert_eq!(response.metadata.unwrap().number("rejected"), Some(0.0));
    }

    #[test]
    fn test_declared_intent() {
        assert_eq!(ValidateProcessor::new().declared_intent(), ProcessorIntent::Transform);
        assert_eq!(ValidateProcessor::new().name(), "validate");
    }
}
