// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Batch and windowed aggregation of stream records.
//!
//! The batch functions reduce an already-materialized slice of same-kind
//! records to one summary. They are single-pass, read fields with defaults,
//! and return `None` for an empty slice; [`aggregate`] turns that into an
//! empty record for callers that want a plain mapping.
//!
//! [`WindowedAggregator`] is the stateful counterpart used by the stream
//! runner: event-time tumbling windows closed by a watermark.

mod sensor;
mod transactions;
mod user_events;
mod window;

pub use sensor::{aggregate_sensor_data, SensorSummary};
pub use transactions::{aggregate_transactions, TransactionSummary};
pub use user_events::{aggregate_user_events, UserEventSummary};
pub use window::{Window, WindowedAggregator, WindowedSummary};

use serde::Serialize;
use serde_json::Value;

use crate::records::{Record, RecordKind};

/// Summary of one batch, whichever kind it was.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    UserEvents(UserEventSummary),
    SensorReadings(SensorSummary),
    Transactions(TransactionSummary),
}

impl Summary {
    pub fn kind(&self) -> RecordKind {
        match self {
            Summary::UserEvents(_) => RecordKind::UserEvent,
            Summary::SensorReadings(_) => RecordKind::SensorReading,
            Summary::Transactions(_) => RecordKind::Transaction,
        }
    }

    /// The summary as a flat record.
    pub fn into_record(self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Record::from(map),
            _ => Record::new(),
        }
    }
}

/// Summarize `records` with the rules for `kind`. `None` for an empty batch.
pub fn summarize(records: &[Record], kind: RecordKind) -> Option<Summary> {
    match kind {
        RecordKind::UserEvent => aggregate_user_events(records).map(Summary::UserEvents),
        RecordKind::SensorReading => aggregate_sensor_data(records).map(Summary::SensorReadings),
        RecordKind::Transaction => aggregate_transactions(records).map(Summary::Transactions),
    }
}

/// Summarize `records` into a record; empty for an empty batch.
pub fn aggregate(records: &[Record], kind: RecordKind) -> Record {
    summarize(records, kind)
        .map(Summary::into_record)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_aggregate_empty_is_empty_record() {
        for kind in RecordKind::ALL {
            assert!(aggregate(&[], kind).is_empty(), "kind {}", kind);
        }
    }

    #[test]
    fn test_aggregate_transactions_as_record() {
        let records = vec![
            Record::try_from(json!({"amount": 10.0, "currency": "USD"})).unwrap(),
            Record::try_from(json!({"amount": 30.0, "currency": "EUR", "merchant": "m"})).unwrap(),
        ];

        let summary = aggregate(&records, RecordKind::Transaction);

        assert_eq!(summary.number("total_transactions"), Some(2.0));
        assert_eq!(summary.number("avg_amount"), Some(20.0));
        assert_eq!(
            summary.get("currency_totals"),
            Some(&json!({"EUR": 30.0, "USD": 10.0}))
        );
        assert_eq!(
            summary.get("merchant_counts"),
            Some(&json!({"m": 1, "unknown": 1}))
        );
    }

    #[test]
    fn test_summarize_reports_kind() {
        let records = vec![Record::new().with("user_id", 1).with("event_type", "click")];
        let summary = summarize(&records, RecordKind::UserEvent).unwrap();
        assert_eq!(summary.kind(), RecordKind::UserEvent);

        let record = summary.into_record();
        assert_eq!(record.get("event_type_counts"), Some(&json!({"click": 1})));
        assert_eq!(record.number("avg_events_per_user"), Some(1.0));
    }
}
